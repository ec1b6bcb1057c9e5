use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};

use crate::content::ChallengeKind;
use crate::game::{Notice, NoticeKind};
use crate::session::{Kind, Session};
use crate::util::{format_time, percent};
use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match (self.state, self.game.session()) {
            (AppState::Playing, Some(session)) => render_playing(self, session, area, buf),
            _ => render_menu(self, area, buf),
        }
    }
}

fn notice_line(notice: Option<&Notice>) -> Line<'_> {
    match notice {
        Some(n) => {
            let style = match n.kind {
                NoticeKind::Success => Style::default().fg(Color::Green),
                NoticeKind::Error => Style::default().fg(Color::Red),
            };
            Line::from(Span::styled(n.message.as_str(), style)).alignment(Alignment::Center)
        }
        None => Line::default(),
    }
}

fn render_menu(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(1)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(2), // total score
            Constraint::Length(1), // notice
            Constraint::Min(4),    // history
            Constraint::Length(1), // legend
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "dynamo",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "every session is a new adventure",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ])
    .alignment(Alignment::Center);
    title.render(chunks[0], buf);

    let total = Paragraph::new(Span::styled(
        format!("total score: {}", app.game.ledger().total()),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    total.render(chunks[1], buf);

    Paragraph::new(notice_line(app.game.notice())).render(chunks[2], buf);

    render_history(app, chunks[3], buf);

    let legend = Paragraph::new(Span::styled(
        "(n)ew session / (q)uit",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    legend.render(chunks[4], buf);
}

fn render_history(app: &App, area: Rect, buf: &mut Buffer) {
    let recent = app.game.ledger().recent();
    if recent.is_empty() {
        let empty = Paragraph::new("no sessions played yet")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("recent games"));
        empty.render(area, buf);
        return;
    }

    let rows: Vec<Line> = recent
        .iter()
        .map(|s| {
            let (mark, mark_style) = if s.completed {
                ("✓", Style::default().fg(Color::Green))
            } else {
                ("✗", Style::default().fg(Color::Red))
            };
            let elapsed = s.time_limit_secs - s.time_remaining_secs;
            Line::from(vec![
                Span::styled(mark, mark_style),
                Span::raw(format!(
                    " {:<6} {:<9} {:>5}  ",
                    s.difficulty.to_string(),
                    s.kind.to_string(),
                    format_time(elapsed),
                )),
                Span::styled(
                    s.score.to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    let history = Paragraph::new(rows)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("recent games"));
    history.render(area, buf);
}

fn render_playing(app: &App, session: &Session, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(1)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(4), // objective
            Constraint::Min(4),    // kind-specific body
            Constraint::Length(3), // time gauge
            Constraint::Length(1), // notice
            Constraint::Length(1), // legend
        ])
        .split(area);

    let difficulty_color = match session.difficulty {
        crate::session::Difficulty::Easy => Color::Green,
        crate::session::Difficulty::Medium => Color::Yellow,
        crate::session::Difficulty::Hard => Color::Red,
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{} mode", session.kind),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            session.difficulty.to_string().to_uppercase(),
            Style::default()
                .fg(difficulty_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(format_time(session.time_remaining_secs)),
    ]))
    .alignment(Alignment::Center);
    header.render(chunks[0], buf);

    let objective = Paragraph::new(session.objective.as_str())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("objective"));
    objective.render(chunks[1], buf);

    match session.kind {
        Kind::Story => render_story_body(session, chunks[2], buf),
        Kind::Puzzle => render_puzzle_body(app, session, chunks[2], buf),
        Kind::Challenge => render_challenge_body(app, session, chunks[2], buf),
    }

    let time_gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("time"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .label(format_time(session.time_remaining_secs))
        .ratio(session.time_fraction());
    time_gauge.render(chunks[3], buf);

    Paragraph::new(notice_line(app.game.notice())).render(chunks[4], buf);

    let legend = Paragraph::new(Span::styled(
        "(esc) abandon / (ctrl-n) new session / (ctrl-c) quit",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    legend.render(chunks[5], buf);
}

fn render_story_body(session: &Session, area: Rect, buf: &mut Buffer) {
    let flavor = session.story.as_deref().unwrap_or_default();
    let body = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("\"{flavor}\""),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from("(enter) complete the story"),
    ])
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("story"));
    body.render(area, buf);
}

fn render_puzzle_body(app: &App, session: &Session, area: Rect, buf: &mut Buffer) {
    let hints = session.puzzle.as_ref().map(|p| p.hints.len()).unwrap_or(0);
    let body = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("your answer: "),
            Span::styled(
                app.game.entry(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("█", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Line::default(),
        Line::from(Span::styled(
            format!("hints available: {hints}"),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from("(enter) submit"),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("riddle"));
    body.render(area, buf);
}

fn render_challenge_body(app: &App, session: &Session, area: Rect, buf: &mut Buffer) {
    let Some(challenge) = session.challenge.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(3)])
        .split(area);

    let (prompt, current) = match challenge.kind {
        ChallengeKind::ClickRepeat => (
            format!(
                "[ click! ] press enter  ({}/{})",
                app.game.clicks(),
                challenge.target
            ),
            app.game.clicks(),
        ),
        ChallengeKind::SpacebarRepeat => (
            format!(
                "press the SPACEBAR  ({}/{})",
                app.game.space_presses(),
                challenge.target
            ),
            app.game.space_presses(),
        ),
        ChallengeKind::TypeWord => (
            format!("type the word: {}█", app.game.entry()),
            u32::from(!app.game.entry().is_empty()),
        ),
    };

    let body = Paragraph::new(prompt)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("challenge"));
    body.render(chunks[0], buf);

    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("progress"))
        .gauge_style(Style::default().fg(Color::Yellow))
        .percent(percent(current.min(challenge.target), challenge.target));
    progress.render(chunks[1], buf);
}
