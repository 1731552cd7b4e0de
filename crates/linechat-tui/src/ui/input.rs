//! Input line
//!
//! Displays the edit buffer with the cursor at its visual column.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::App;

const BORDER: u16 = 1;

/// Render the input box.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(format!(" Input [{}] ", app.mode()));

    let edit = app.edit();
    let inner_width = area.width.saturating_sub(2 * BORDER);
    let cursor = u16::try_from(edit.visual_offset()).unwrap_or(u16::MAX);
    // Keep the cursor inside the box by scrolling long lines left.
    let scroll = cursor.saturating_sub(inner_width.saturating_sub(1));

    let paragraph = Paragraph::new(edit.display_text())
        .style(Style::default().fg(Color::White))
        .scroll((0, scroll))
        .block(block);
    frame.render_widget(paragraph, area);

    let cursor_x = area.x.saturating_add(BORDER).saturating_add(cursor - scroll);
    let cursor_y = area.y.saturating_add(BORDER);
    frame.set_cursor_position((cursor_x, cursor_y));
}
