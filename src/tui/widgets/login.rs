use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::tui::App;

const LOGIN_ROWS: u16 = 4;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(LOGIN_ROWS),
            Constraint::Min(0),
        ])
        .split(area);

    let banner = Paragraph::new(vec![
        Line::from(""),
        Line::from("Welcome to Quiz Bowl").style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ])
    .centered();
    f.render_widget(banner, chunks[0]);

    let items: Vec<ListItem> = app
        .menu
        .items
        .iter()
        .enumerate()
        .map(|(i, choice)| {
            let style = if app.menu.selected == Some(i) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(format!("  {}", choice)).style(style))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Menu "));
    f.render_widget(list, chunks[1]);
}
