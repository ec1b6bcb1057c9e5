use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

use dynamo::runtime::{CrosstermEvents, Runner};
use dynamo::session::{Difficulty, Kind};
use dynamo::{App, TICK_RATE_MS};

/// randomized mini-challenge tui
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal mini-game that deals out randomized timed sessions: acknowledge a story, solve a riddle, or beat a click/spacebar/typing challenge before the countdown runs out."
)]
pub struct Cli {
    /// seed for the session generator (reproducible sessions)
    #[clap(short, long)]
    seed: Option<u64>,

    /// always deal sessions of this kind
    #[clap(short = 'k', long, value_enum)]
    kind: Option<KindArg>,

    /// always deal sessions of this difficulty
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<DifficultyArg>,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum KindArg {
    Story,
    Puzzle,
    Challenge,
}

impl KindArg {
    fn as_kind(&self) -> Kind {
        match self {
            KindArg::Story => Kind::Story,
            KindArg::Puzzle => Kind::Puzzle,
            KindArg::Challenge => Kind::Challenge,
        }
    }
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl DifficultyArg {
    fn as_difficulty(&self) -> Difficulty {
        match self {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(
        cli.seed,
        cli.kind.map(|k| k.as_kind()),
        cli.difficulty.map(|d| d.as_difficulty()),
    );
    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEvents::new(), Duration::from_millis(TICK_RATE_MS));

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        if runner.drive(app) {
            break;
        }
    }

    Ok(())
}
