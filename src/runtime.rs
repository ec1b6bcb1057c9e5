use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

use crate::App;

/// Everything that can advance the app. Quiet intervals on the input
/// channel become `Tick` pulses, so the countdown keeps moving while
/// the player does nothing.
#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of input events. Production uses a crossterm reader thread;
/// tests feed a plain channel.
pub trait EventSource: Send + 'static {
    fn recv_timeout(&self, timeout: Duration) -> Result<Event, RecvTimeoutError>;
}

pub struct CrosstermEvents {
    rx: Receiver<Event>,
}

impl CrosstermEvents {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            while let Ok(ev) = event::read() {
                let mapped = match ev {
                    CtEvent::Key(key) => Some(Event::Key(key)),
                    CtEvent::Resize(_, _) => Some(Event::Resize),
                    _ => None,
                };
                if let Some(ev) = mapped {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEvents {
    fn recv_timeout(&self, timeout: Duration) -> Result<Event, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-fed event source for headless tests.
pub struct TestEventSource {
    rx: Receiver<Event>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<Event>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<Event, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Serializes the game: keys and ticks reach the app one at a time, on
/// one thread, so the countdown and the input router can never race and
/// a session's countdown cannot outlive the session.
pub struct Runner<E: EventSource> {
    source: E,
    tick: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(source: E, tick: Duration) -> Self {
        Self { source, tick }
    }

    /// Wait for the next event, up to one tick interval, and apply it to
    /// the app. Returns `true` when the app asked to quit. A source that
    /// hangs up leaves only the tick stream, so the game keeps running.
    pub fn drive(&self, app: &mut App) -> bool {
        let event = match self.source.recv_timeout(self.tick) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => Event::Tick,
        };
        match event {
            Event::Tick => {
                app.on_tick();
                false
            }
            Event::Resize => false,
            Event::Key(key) => app.on_key(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Difficulty, Kind};
    use crate::{AppState, TICKS_PER_SECOND};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn quiet_runner() -> (mpsc::Sender<Event>, Runner<TestEventSource>) {
        let (tx, rx) = mpsc::channel();
        (tx, Runner::new(TestEventSource::new(rx), Duration::from_millis(1)))
    }

    #[test]
    fn quiet_intervals_advance_the_countdown() {
        let (_tx, runner) = quiet_runner();
        let mut app = App::new(Some(1), Some(Kind::Story), Some(Difficulty::Easy));
        app.start_session();
        let start = app.game.session().unwrap().time_remaining_secs;

        for _ in 0..TICKS_PER_SECOND {
            assert!(!runner.drive(&mut app));
        }
        assert_eq!(app.game.session().unwrap().time_remaining_secs, start - 1);
    }

    #[test]
    fn key_events_flow_into_the_router() {
        let (tx, runner) = quiet_runner();
        tx.send(key(KeyCode::Enter)).unwrap();
        let mut app = App::new(Some(1), None, None);

        assert!(!runner.drive(&mut app));
        assert_eq!(app.state, AppState::Playing);
    }

    #[test]
    fn quit_key_stops_the_loop() {
        let (tx, runner) = quiet_runner();
        tx.send(key(KeyCode::Char('q'))).unwrap();
        let mut app = App::new(Some(1), None, None);

        assert!(runner.drive(&mut app));
    }

    #[test]
    fn resize_is_a_no_op() {
        let (tx, runner) = quiet_runner();
        tx.send(Event::Resize).unwrap();
        let mut app = App::new(Some(1), None, None);

        assert!(!runner.drive(&mut app));
        assert_eq!(app.state, AppState::Menu);
    }

    #[test]
    fn disconnected_source_keeps_ticking() {
        let (tx, runner) = quiet_runner();
        drop(tx);
        let mut app = App::new(Some(1), Some(Kind::Puzzle), Some(Difficulty::Hard));
        app.start_session();
        let start = app.game.session().unwrap().time_remaining_secs;

        for _ in 0..TICKS_PER_SECOND {
            assert!(!runner.drive(&mut app));
        }
        assert_eq!(app.game.session().unwrap().time_remaining_secs, start - 1);
    }
}
