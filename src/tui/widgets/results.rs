use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let Some(summary) = &app.summary else {
        return;
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Quiz Complete!",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("You scored ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} out of {}", summary.score, summary.total),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(".", Style::default().fg(Color::Gray)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Final score: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.1} / 10", summary.scaled),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let card = Paragraph::new(text).centered().block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Results ")
            .title_style(Style::default().fg(Color::Magenta)),
    );
    f.render_widget(card, area);
}
