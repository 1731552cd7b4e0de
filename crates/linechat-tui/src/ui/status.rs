//! Status bar
//!
//! User, mode, selected room and the last status message.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let room = match app.current_room() {
        Some((room, true)) => format!(" | room {room} (entered)"),
        Some((room, false)) => format!(" | room {room}"),
        None => " | no room".to_owned(),
    };

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            app.user().to_owned(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" | {}", app.mode())),
        Span::raw(room),
    ];
    if let Some(message) = app.status_message() {
        spans.push(Span::styled(format!(" | {message}"), Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
