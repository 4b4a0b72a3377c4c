//! Color theme definitions for the UI.
//!
//! All color constants are defined here for consistency and easy theme changes.

use ratatui::style::Color;

use crate::crossfade::Rgb;
use crate::windows::WindowColor;

/// Primary accent color (used for titles, highlights)
pub const PRIMARY: Color = Color::Rgb(56, 189, 248); // Bright cyan
/// Background for the selected preset
pub const SELECTION: Color = Color::Rgb(99, 102, 241); // Indigo
/// Text on selection
pub const SELECTION_TEXT: Color = Color::White;
/// Muted text color
pub const MUTED: Color = Color::Rgb(148, 163, 184); // Brighter gray
/// Error/danger color
pub const ERROR: Color = Color::Rgb(251, 113, 133); // Bright rose
/// Success color
pub const SUCCESS: Color = Color::Rgb(74, 222, 128); // Bright green
/// Border color
pub const BORDER: Color = Color::Rgb(129, 140, 248); // Light indigo
/// Key highlight color (for keyboard shortcuts)
pub const KEY: Color = Color::Rgb(244, 114, 182); // Bright pink

/// Background of the preset bar
pub const PANEL: Color = Color::Rgb(0x04, 0x06, 0x16); // Near black
/// Preset chip background
pub const CHIP: Color = Color::Rgb(0x0E, 0x66, 0xFF); // Vivid blue

/// The sun
pub const SUN: Rgb = Rgb::hex(0xFFC857);
/// Stars at full opacity
pub const STAR: Rgb = Rgb::hex(0xFFFFFF);
/// Far skyline, blended into the sky
pub const SKYLINE_FAR: Rgb = Rgb::hex(0x1B2A59);
/// Near skyline, blended into the sky
pub const SKYLINE_NEAR: Rgb = Rgb::hex(0x10183A);
/// Front building wall
pub const BUILDING: Rgb = Rgb::hex(0x13204A);
/// Window glass in daylight
pub const WINDOW_DAY: Rgb = Rgb::hex(0x2F71CF);
/// Lit window at night
pub const WINDOW_NIGHT: Rgb = Rgb::hex(0xFFFDD8);

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Terminal color of a window light.
pub fn window(color: WindowColor) -> Color {
    match color {
        WindowColor::Day => WINDOW_DAY.into(),
        WindowColor::Night => WINDOW_NIGHT.into(),
    }
}
