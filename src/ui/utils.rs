//! Layout helpers shared by the renderers.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Returns a rectangle of the given percentage size centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// First item to show so that `selected` stays visible in a strip of
/// `visible` items, keeping it centered where possible.
pub fn scroll_offset(selected: usize, len: usize, visible: usize) -> usize {
    if visible == 0 || len <= visible {
        return 0;
    }
    selected
        .saturating_sub(visible / 2)
        .min(len - visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_fits_everything() {
        assert_eq!(scroll_offset(5, 10, 10), 0);
        assert_eq!(scroll_offset(5, 10, 0), 0);
    }

    #[test]
    fn test_scroll_offset_centers_and_clamps() {
        assert_eq!(scroll_offset(0, 60, 7), 0);
        assert_eq!(scroll_offset(30, 60, 7), 27);
        assert_eq!(scroll_offset(59, 60, 7), 53);
    }
}
