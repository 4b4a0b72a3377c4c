//! Help overlay rendering.

use ratatui::{
    style::{Color, Style, Stylize},
    symbols,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::constants::dialog;

use super::colors;
use super::utils::centered_rect;

/// Draws a help overlay popup.
pub fn draw_help_overlay(frame: &mut Frame) {
    let area = centered_rect(dialog::HELP_WIDTH, dialog::HELP_HEIGHT, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let help = Paragraph::new(get_help_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::PRIMARY))
                .border_set(symbols::border::DOUBLE)
                .title(Line::from(vec![
                    Span::styled(" Help ", Style::default().fg(Color::White).bold()),
                    Span::styled(
                        "- Press any key to close ",
                        Style::default().fg(colors::MUTED),
                    ),
                ])),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help, area);
}

/// One `key  description` row.
fn key_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled("    ", Style::default()),
        Span::styled(format!("{key:<18}"), Style::default().fg(colors::KEY).bold()),
        Span::styled(desc, Style::default().fg(Color::White)),
    ])
}

/// Returns the help text content.
fn get_help_text() -> Text<'static> {
    let section_style = Style::default().fg(colors::PRIMARY).bold();

    Text::from(vec![
        Line::from(""),
        Line::from(Span::styled("  TIMER", section_style)),
        Line::from(""),
        key_line("h / Left", "Shorter preset"),
        key_line("l / Right", "Longer preset"),
        key_line("g / Home", "Shortest preset (00:05)"),
        key_line("G / End", "Longest preset (05:00)"),
        key_line("Enter / Space", "Start, or restart, the countdown"),
        Line::from(""),
        Line::from(Span::styled("  GENERAL", section_style)),
        Line::from(""),
        key_line("? / F1", "Show this help"),
        key_line("q / Esc / Ctrl+C", "Quit application"),
        Line::from(""),
        Line::from(Span::styled(
            "  Each run turns day into night, or night back into day.",
            Style::default().fg(colors::MUTED),
        )),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> Vec<String> {
        get_help_text()
            .lines
            .iter()
            .filter_map(|line| line.spans.get(1))
            .map(|span| span.content.trim().to_string())
            .collect()
    }

    #[test]
    fn test_help_lists_every_binding() {
        let keys = keys();
        for key in [
            "h / Left",
            "l / Right",
            "g / Home",
            "G / End",
            "Enter / Space",
            "? / F1",
            "q / Esc / Ctrl+C",
        ] {
            assert!(keys.iter().any(|k| k == key), "missing {key}");
        }
    }
}
