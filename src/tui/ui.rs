use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::widgets::{courses, login, question, results};
use super::{App, Screen};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Help bar
        ])
        .split(f.area());

    draw_title(f, app, chunks[0]);
    draw_content(f, app, chunks[1]);
    draw_status(f, app, chunks[2]);
    draw_help_bar(f, app, chunks[3]);
}

fn draw_title(f: &mut Frame, app: &App, area: Rect) {
    let subtitle = match app.screen {
        Screen::Login => "Welcome".to_string(),
        Screen::Courses => "Select a Course".to_string(),
        Screen::Question => match &app.session {
            Some(s) => format!("{}: Question {}/{}", s.course(), s.position(), s.total()),
            None => "Quiz".to_string(),
        },
        Screen::Results => "Quiz Complete".to_string(),
    };

    let title = Paragraph::new(Line::from(vec![Span::styled(
        subtitle,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )]))
    .block(Block::default().borders(Borders::ALL).title(" Quiz Bowl "));

    f.render_widget(title, area);
}

fn draw_content(f: &mut Frame, app: &App, area: Rect) {
    match app.screen {
        Screen::Login => login::draw(f, app, area),
        Screen::Courses => courses::draw(f, app, area),
        Screen::Question => question::draw(f, app, area),
        Screen::Results => results::draw(f, app, area),
    }
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let status = match &app.status {
        Some(msg) => Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::LightRed),
        )),
        None => Line::from(""),
    };
    f.render_widget(Paragraph::new(status), area);
}

fn draw_help_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled("j/k", Style::default().fg(Color::Cyan)),
        Span::raw(" Move  "),
    ];

    match app.screen {
        Screen::Login => {
            spans.extend(vec![
                Span::styled("<CR>", Style::default().fg(Color::Cyan)),
                Span::raw(" Choose  "),
            ]);
        }
        Screen::Courses => {
            spans.extend(vec![
                Span::styled("<CR>", Style::default().fg(Color::Cyan)),
                Span::raw(" Start  "),
                Span::styled("^r", Style::default().fg(Color::Cyan)),
                Span::raw(" Refresh  "),
                Span::styled("<Esc>", Style::default().fg(Color::Cyan)),
                Span::raw(" Back  "),
            ]);
        }
        Screen::Question => {
            let enter_label = if app.feedback.is_some() {
                " Next  "
            } else {
                " Submit  "
            };
            spans.extend(vec![
                Span::styled("<CR>", Style::default().fg(Color::Cyan)),
                Span::raw(enter_label),
                Span::styled("<Esc>", Style::default().fg(Color::Cyan)),
                Span::raw(" Abandon  "),
            ]);
        }
        Screen::Results => {
            spans.extend(vec![
                Span::styled("<CR>", Style::default().fg(Color::Cyan)),
                Span::raw(" Another quiz  "),
            ]);
        }
    }

    spans.extend(vec![
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::raw(" Quit"),
    ]);

    let help = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));

    f.render_widget(help, area);
}
