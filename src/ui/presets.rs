//! The "Set timer" preset strip.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph},
    Frame,
};

use crate::app::App;
use crate::clock::format_clock;
use crate::constants::layout::PRESET_CHIP_WIDTH;

use super::colors;
use super::utils::scroll_offset;

/// Draws the preset chips, keeping the selected one in view.
pub fn draw_presets(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .padding(Padding::top(1))
        .title(Line::from(Span::styled(
            "Set timer",
            Style::default().fg(colors::SELECTION_TEXT).bold(),
        )))
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(colors::PANEL));

    let inner_width = area.width.saturating_sub(2);
    let visible = (inner_width / PRESET_CHIP_WIDTH).max(1) as usize;
    let first = scroll_offset(app.selected, app.presets.len(), visible);

    let mut spans: Vec<Span> = Vec::new();
    if first > 0 {
        spans.push(Span::styled("‹", Style::default().fg(colors::MUTED)));
    }
    for (idx, millis) in app.presets.iter().enumerate().skip(first).take(visible) {
        let style = if idx == app.selected {
            Style::default()
                .bg(colors::SELECTION)
                .fg(colors::SELECTION_TEXT)
                .bold()
        } else {
            Style::default().bg(colors::CHIP).fg(colors::SELECTION_TEXT)
        };
        spans.push(Span::styled(format!(" {} ", format_clock(*millis)), style));
        spans.push(Span::styled(" ", Style::default()));
    }
    if first + visible < app.presets.len() {
        spans.push(Span::styled("›", Style::default().fg(colors::MUTED)));
    }

    let strip = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(strip, area);
}
