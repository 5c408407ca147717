use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    if app.courses.items.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from("No courses found in the question bank."),
            Line::from("Run `quizbowl init --seed` and refresh with ^r."),
        ])
        .centered()
        .block(Block::default().borders(Borders::ALL).title(" Courses "));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .courses
        .items
        .iter()
        .enumerate()
        .map(|(i, course)| {
            let style = if app.courses.selected == Some(i) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(course.clone(), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Courses ")
            .title_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, area);
}
