use crate::content::{ChallengeKind, TYPING_TARGET_WORD};
use crate::score::{final_score, Ledger};
use crate::session::{Kind, Session};
use crate::TICKS_PER_SECOND;

/// How long a notice stays on screen, in ticks (3 seconds).
pub const NOTICE_TTL_TICKS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient, fire-and-forget message. Decayed by the tick stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    ttl_ticks: u32,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            ttl_ticks: NOTICE_TTL_TICKS,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            ttl_ticks: NOTICE_TTL_TICKS,
        }
    }
}

/// The session controller: owns the one active session, the transient
/// input counters, and the score ledger. All mutation happens on the
/// event-loop thread, one event at a time.
#[derive(Debug, Default)]
pub struct Game {
    session: Option<Session>,
    clicks: u32,
    space_presses: u32,
    entry: String,
    notice: Option<Notice>,
    ledger: Ledger,
    ticks_until_second: u64,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `session` the active one. Any previous active session is
    /// discarded without scoring, the counters and entry buffer reset,
    /// and the countdown starts from a fresh second boundary.
    pub fn start(&mut self, session: Session) {
        self.session = Some(session);
        self.clicks = 0;
        self.space_presses = 0;
        self.entry.clear();
        self.ticks_until_second = TICKS_PER_SECOND;
        self.notice = Some(Notice::success("New game session started!"));
    }

    /// Drop the active session without scoring it (menu return / quit).
    pub fn abandon(&mut self) -> Option<Session> {
        self.session.take()
    }

    /// Advance one tick: decay the notice and, while a session is
    /// active, step the countdown once per whole second of ticks.
    pub fn on_tick(&mut self) {
        if let Some(notice) = &mut self.notice {
            notice.ttl_ticks = notice.ttl_ticks.saturating_sub(1);
            if notice.ttl_ticks == 0 {
                self.notice = None;
            }
        }

        if self.session.is_none() {
            return;
        }
        self.ticks_until_second -= 1;
        if self.ticks_until_second == 0 {
            self.ticks_until_second = TICKS_PER_SECOND;
            self.step_second();
        }
    }

    /// One whole-second countdown step. Expiry is a defined terminal
    /// outcome, not an error: the session fails with score zero.
    fn step_second(&mut self) {
        let Some(session) = &mut self.session else {
            return;
        };
        if session.time_remaining_secs <= 1 {
            session.time_remaining_secs = 0;
            self.end(false);
        } else {
            session.time_remaining_secs -= 1;
        }
    }

    /// Story sessions complete on a single explicit acknowledgment.
    pub fn complete_story(&mut self) {
        if matches!(&self.session, Some(s) if s.kind == Kind::Story) {
            self.end(true);
        }
    }

    /// Compare the entry against the riddle answer, trimmed and
    /// lowercased on both sides. A miss leaves the session active and
    /// the entry untouched so the player can edit and retry.
    pub fn submit_answer(&mut self) {
        let Some(answer) = self
            .session
            .as_ref()
            .and_then(|s| s.puzzle.as_ref())
            .map(|p| p.answer.trim().to_lowercase())
        else {
            return;
        };
        if self.entry.trim().to_lowercase() == answer {
            self.end(true);
        } else {
            self.notice = Some(Notice::error("Incorrect answer. Try again!"));
        }
    }

    /// One press of the click-challenge button.
    pub fn click(&mut self) {
        let Some(target) = self.active_challenge_target(ChallengeKind::ClickRepeat) else {
            return;
        };
        self.clicks += 1;
        if self.clicks >= target {
            self.end(true);
        }
    }

    /// One spacebar press. Only counts while a spacebar challenge is
    /// active; the caller routes space here instead of into the entry
    /// buffer in that case.
    pub fn press_space(&mut self) {
        let Some(target) = self.active_challenge_target(ChallengeKind::SpacebarRepeat) else {
            return;
        };
        self.space_presses += 1;
        if self.space_presses >= target {
            self.end(true);
        }
    }

    /// Append a character to the entry buffer (puzzle answers and the
    /// typing challenge). The typing challenge checks the whole buffer
    /// on every change, case-insensitively, against the fixed word.
    pub fn push_char(&mut self, c: char) {
        if !self.accepts_text() {
            return;
        }
        self.entry.push(c);
        self.check_typed_word();
    }

    pub fn backspace(&mut self) {
        if !self.accepts_text() {
            return;
        }
        self.entry.pop();
        self.check_typed_word();
    }

    fn check_typed_word(&mut self) {
        if self.active_challenge_target(ChallengeKind::TypeWord).is_some()
            && self.entry.eq_ignore_ascii_case(TYPING_TARGET_WORD)
        {
            self.end(true);
        }
    }

    /// Terminal transition. Scores the session, folds it into the
    /// ledger, and empties the active slot; the countdown stops because
    /// nothing is left to tick.
    fn end(&mut self, completed: bool) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        session.completed = completed;
        session.score = final_score(session.difficulty, session.time_remaining_secs, completed);
        self.notice = Some(if completed {
            Notice::success(format!("Session completed! Score: {}", session.score))
        } else {
            Notice::error("Session over! Time ran out")
        });
        self.ledger.record(session);
    }

    fn accepts_text(&self) -> bool {
        match &self.session {
            Some(s) if s.kind == Kind::Puzzle => true,
            Some(s) => matches!(
                s.challenge.as_ref(),
                Some(c) if c.kind == ChallengeKind::TypeWord
            ),
            None => false,
        }
    }

    fn active_challenge_target(&self, kind: ChallengeKind) -> Option<u32> {
        self.session
            .as_ref()
            .and_then(|s| s.challenge.as_ref())
            .filter(|c| c.kind == kind)
            .map(|c| c.target)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// True when space should be counted rather than typed.
    pub fn space_is_counted(&self) -> bool {
        self.active_challenge_target(ChallengeKind::SpacebarRepeat)
            .is_some()
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn space_presses(&self) -> u32 {
        self.space_presses
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}
