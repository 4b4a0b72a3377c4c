//! Clock header revealed while a timer runs.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::clock::{format_clock, format_time};
use crate::crossfade::SceneLook;

/// Draws the countdown on the palette background, pinned to the bottom row.
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App, look: &SceneLook) {
    if area.height == 0 {
        return;
    }

    let (minutes, seconds) = format_time(app.scene.countdown_ms);
    let text_style = Style::default().fg(look.text.into()).bold();
    let faint_style = Style::default().fg(look.text.into());

    let mut spans = vec![
        Span::styled(minutes, text_style),
        Span::styled(" : ", text_style),
        Span::styled(seconds, text_style),
    ];
    if let Some(plan) = app.scene.plan() {
        spans.push(Span::styled(
            format!("  / {}", format_clock(plan.total_ms)),
            faint_style,
        ));
    }

    let mut lines = vec![Line::from(""); area.height as usize - 1];
    lines.push(Line::from(spans));

    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(look.palette.into()));
    frame.render_widget(header, area);
}
