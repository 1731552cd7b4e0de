//! Main text pane
//!
//! Draws a [`Region`] with line 0 at the top.

use linechat_app::Region;
use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, List, ListItem},
};

const BORDER_SIZE: u16 = 2;

/// Render as many region lines as fit.
pub fn render(frame: &mut Frame, region: Region<'_>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(format!(" {} ", region.title()));

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let items: Vec<ListItem> = (0..region.line_count().min(visible_height))
        .map(|n| ListItem::new(region.line(n)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
