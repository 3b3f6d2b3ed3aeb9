//! Sidebar navigation list.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::{App, NAV_ITEMS};

use super::Palette;

pub fn render(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let block = Block::default()
        .title(" iPrescribe ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::with_capacity(NAV_ITEMS.len());
    for (i, item) in NAV_ITEMS.iter().enumerate() {
        let style = if i == app.nav_index {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.dim)
        };
        let marker = if i == app.nav_index { "> " } else { "  " };
        lines.push(Line::styled(format!("{marker}{item}"), style));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}
