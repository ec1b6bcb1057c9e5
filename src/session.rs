use crate::content::{self, ChallengeKind};
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

/// Which of the three challenge flavors a session presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Kind {
    Story,
    Puzzle,
    Challenge,
}

pub const KINDS: [Kind; 3] = [Kind::Story, Kind::Puzzle, Kind::Challenge];

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

pub const DIFFICULTIES: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

impl Difficulty {
    /// Base time budget in seconds before the random extension.
    pub fn base_secs(&self) -> u32 {
        match self {
            Difficulty::Easy => 120,
            Difficulty::Medium => 90,
            Difficulty::Hard => 60,
        }
    }

    /// Flat bonus added to the score of a completed session.
    pub fn bonus(&self) -> u32 {
        match self {
            Difficulty::Easy => 200,
            Difficulty::Medium => 300,
            Difficulty::Hard => 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzlePayload {
    pub question: String,
    pub answer: String,
    pub hints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengePayload {
    pub kind: ChallengeKind,
    pub task: String,
    pub target: u32,
    /// Progress counter carried on the record. The controller tracks its
    /// own transient counters and never writes this field.
    pub current: u32,
}

/// One game session. Created by [`generate_session`], mutated by the
/// controller while active, then moved into the history once terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub kind: Kind,
    pub difficulty: Difficulty,
    pub objective: String,
    pub story: Option<String>,
    pub puzzle: Option<PuzzlePayload>,
    pub challenge: Option<ChallengePayload>,
    pub time_limit_secs: u32,
    pub time_remaining_secs: u32,
    pub score: u32,
    pub completed: bool,
}

impl Session {
    /// Fraction of the time budget still available, for the timer gauge.
    pub fn time_fraction(&self) -> f64 {
        self.time_remaining_secs as f64 / self.time_limit_secs as f64
    }
}

/// Monotonic suffix so two sessions generated in the same millisecond
/// still get distinct ids.
static ID_SUFFIX: AtomicU64 = AtomicU64::new(0);

fn next_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = ID_SUFFIX.fetch_add(1, Ordering::Relaxed);
    format!("{millis}-{suffix}")
}

/// Random extension added on top of the difficulty's base time budget.
const TIME_JITTER_SECS: u32 = 30;

/// Generate a fully random session from the content tables.
pub fn generate_session(rng: &mut impl Rng) -> Session {
    generate_session_with(rng, None, None)
}

/// Generate a session, optionally pinning the kind and/or difficulty
/// (used by the CLI flags). Pinning replaces only the draw it names; the
/// template and time jitter stay random.
pub fn generate_session_with(
    rng: &mut impl Rng,
    kind: Option<Kind>,
    difficulty: Option<Difficulty>,
) -> Session {
    let kind = kind.unwrap_or_else(|| *KINDS.choose(rng).unwrap());
    let difficulty = difficulty.unwrap_or_else(|| *DIFFICULTIES.choose(rng).unwrap());

    let time_limit_secs = difficulty.base_secs() + rng.gen_range(0..TIME_JITTER_SECS);

    let mut session = Session {
        id: next_id(),
        kind,
        difficulty,
        objective: String::new(),
        story: None,
        puzzle: None,
        challenge: None,
        time_limit_secs,
        time_remaining_secs: time_limit_secs,
        score: 0,
        completed: false,
    };

    match kind {
        Kind::Story => {
            let template = content::STORY_TEMPLATES.choose(rng).unwrap();
            session.objective = template.objective();
            session.story = Some(session.objective.clone());
        }
        Kind::Puzzle => {
            let riddle = content::RIDDLES.choose(rng).unwrap();
            session.objective = format!("Solve the riddle: {}", riddle.question);
            session.puzzle = Some(PuzzlePayload {
                question: riddle.question.to_string(),
                answer: riddle.answer.to_string(),
                hints: riddle.hints.iter().map(|h| h.to_string()).collect(),
            });
        }
        Kind::Challenge => {
            let task = content::CHALLENGE_TASKS.choose(rng).unwrap();
            session.objective = format!("{} {} {}", task.task, task.target, task.unit);
            session.challenge = Some(ChallengePayload {
                kind: task.kind,
                task: task.task.to_string(),
                target: task.target,
                current: 0,
            });
        }
    }

    session
}
