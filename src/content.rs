//! Fixed content tables the session generator draws from.
//!
//! The tables are deliberately small and compiled in; every session is a
//! random combination of one entry here with a kind and a difficulty.

/// Ingredients for a story objective sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryTemplate {
    pub setting: &'static str,
    pub character: &'static str,
    pub goal: &'static str,
    pub twist: &'static str,
}

impl StoryTemplate {
    /// Combine the parts into the objective sentence shown to the player.
    pub fn objective(&self) -> String {
        format!(
            "As a {} in {}, {}. But beware: {}.",
            self.character, self.setting, self.goal, self.twist
        )
    }
}

pub const STORY_TEMPLATES: [StoryTemplate; 4] = [
    StoryTemplate {
        setting: "a mysterious abandoned space station",
        character: "lost astronaut",
        goal: "restore power before oxygen runs out",
        twist: "an unknown entity is watching your every move",
    },
    StoryTemplate {
        setting: "an ancient underground temple",
        character: "brave explorer",
        goal: "decode the cryptic hieroglyphs",
        twist: "the temple rearranges itself every hour",
    },
    StoryTemplate {
        setting: "a glitching digital world",
        character: "rogue AI",
        goal: "fix the corrupted code fragments",
        twist: "your own memories are being deleted",
    },
    StoryTemplate {
        setting: "a time-traveling laboratory",
        character: "mad scientist",
        goal: "prevent a temporal paradox",
        twist: "your past actions are creating new timelines",
    },
];

/// A riddle with its answer and progressively more specific hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Riddle {
    pub question: &'static str,
    pub answer: &'static str,
    pub hints: [&'static str; 3],
}

pub const RIDDLES: [Riddle; 3] = [
    Riddle {
        question: "I speak without a mouth and hear without ears. What am I?",
        answer: "echo",
        hints: [
            "It's a phenomenon",
            "It repeats what you say",
            "You hear it in canyons",
        ],
    },
    Riddle {
        question: "The more you take, the more you leave behind. What am I?",
        answer: "footsteps",
        hints: [
            "It's related to movement",
            "You make them while walking",
            "They show where you've been",
        ],
    },
    Riddle {
        question: "I have cities, but no houses. I have mountains, but no trees. What am I?",
        answer: "map",
        hints: [
            "It's used for navigation",
            "It shows geographical features",
            "It's flat but represents 3D world",
        ],
    },
];

/// Distinguishes how a challenge task is driven by the input router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeKind {
    /// Repeatedly press the "button" (enter).
    ClickRepeat,
    /// Repeatedly press the spacebar.
    SpacebarRepeat,
    /// Type a fixed word exactly once.
    TypeWord,
}

/// One entry in the challenge task table. The `task` text is what the
/// player sees; `kind` is what the router dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeTask {
    pub kind: ChallengeKind,
    pub task: &'static str,
    pub target: u32,
    pub unit: &'static str,
}

pub const CHALLENGE_TASKS: [ChallengeTask; 3] = [
    ChallengeTask {
        kind: ChallengeKind::ClickRepeat,
        task: "Click the button exactly",
        target: 15,
        unit: "times",
    },
    ChallengeTask {
        kind: ChallengeKind::SpacebarRepeat,
        task: "Press Spacebar",
        target: 20,
        unit: "times",
    },
    ChallengeTask {
        kind: ChallengeKind::TypeWord,
        task: "Type the word 'dynamic'",
        target: 1,
        unit: "correctly",
    },
];

/// The literal the typing challenge matches against (case-insensitive).
pub const TYPING_TARGET_WORD: &str = "dynamic";
