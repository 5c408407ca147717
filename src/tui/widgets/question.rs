use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::models::AnswerKey;
use crate::session::AnswerOutcome;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let Some(session) = &app.session else {
        return;
    };
    let Ok(question) = session.current_question() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // Question text
            Constraint::Length(6), // Options
            Constraint::Length(3), // Feedback
        ])
        .split(area);

    let text = Paragraph::new(question.question.clone())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Question ")
                .title_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(text, chunks[0]);

    // Options keep their on-screen A-D letters regardless of selection state;
    // once a submission is scored, the correct row is highlighted.
    let scored = app.feedback.is_some();
    let correct_index = question.correct_index();
    let items: Vec<ListItem> = question
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let letter = AnswerKey::from_index(i).map(|k| k.as_str()).unwrap_or("?");
            let chosen = app.selected_option == Some(i);

            let style = if scored && correct_index == Some(i) {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if chosen && scored {
                Style::default().fg(Color::Red)
            } else if chosen {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let marker = if chosen { ">" } else { " " };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} {}) ", marker, letter), Style::default().fg(Color::DarkGray)),
                Span::styled((*option).to_string(), style),
            ]))
        })
        .collect();

    let options = List::new(items).block(Block::default().borders(Borders::ALL).title(" Options "));
    f.render_widget(options, chunks[1]);

    let feedback = match &app.feedback {
        Some((AnswerOutcome::Correct, _)) => Line::from(Span::styled(
            "Correct!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Some((AnswerOutcome::Incorrect, correct)) => Line::from(Span::styled(
            format!("Incorrect. The correct answer was: {}", correct),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            format!("Score so far: {}", session.score()),
            Style::default().fg(Color::Gray),
        )),
    };
    let feedback =
        Paragraph::new(feedback).block(Block::default().borders(Borders::ALL).title(" Result "));
    f.render_widget(feedback, chunks[2]);
}
