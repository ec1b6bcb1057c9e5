use crate::session::{Difficulty, Session};

/// How many terminal sessions the history keeps, most recent first.
pub const HISTORY_CAP: usize = 5;

/// Points per second left on the clock at completion.
const POINTS_PER_SECOND: u32 = 10;

/// Score for a terminal session. Failure is always worth zero; completion
/// pays for remaining time plus the difficulty bonus.
pub fn final_score(difficulty: Difficulty, time_remaining_secs: u32, completed: bool) -> u32 {
    if !completed {
        return 0;
    }
    time_remaining_secs * POINTS_PER_SECOND + difficulty.bonus()
}

/// Running total and short history of terminal sessions. Owned by the
/// controller; the total is never decremented and only resets with the
/// process.
#[derive(Debug, Default)]
pub struct Ledger {
    total: u64,
    recent: Vec<Session>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a terminal session into the running total and prepend it to
    /// the history, evicting the oldest entry past the cap.
    pub fn record(&mut self, session: Session) {
        debug_assert!(session.completed || session.score == 0);
        self.total += session.score as u64;
        self.recent.insert(0, session);
        self.recent.truncate(HISTORY_CAP);
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Terminal sessions, most recent first.
    pub fn recent(&self) -> &[Session] {
        &self.recent
    }
}
