//! UI rendering module.
//!
//! This module handles all the terminal UI rendering using Ratatui.
//! Each part of the screen is rendered by a separate submodule for clarity.

mod city;
mod colors;
mod header;
mod help;
mod presets;
mod status;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use tokio::time::Instant;

use crate::app::App;
use crate::constants::{fade::PANEL_OFFSET, layout};
use crate::crossfade::SceneLook;

use city::CityView;
use header::draw_header;
use help::draw_help_overlay;
use presets::draw_presets;
use status::{draw_commands_bar, draw_status_bar};

/// Main draw function - lays out the screen and samples the cross-fades once.
pub fn draw(frame: &mut Frame, app: &App) {
    let look = SceneLook::at(&app.scene, Instant::now());

    // The city slides down to reveal the clock while a timer runs
    let clock_height =
        (layout::CLOCK_HEIGHT as f64 * look.panel / PANEL_OFFSET).round() as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(clock_height),
            Constraint::Min(0), // City
            Constraint::Length(layout::PRESET_BAR_HEIGHT),
            Constraint::Length(layout::COMMANDS_BAR_HEIGHT),
            Constraint::Length(layout::STATUS_BAR_HEIGHT),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app, &look);
    frame.render_widget(CityView::new(&app.scene, look), chunks[1]);
    draw_presets(frame, chunks[2], app);
    draw_commands_bar(frame, chunks[3], app);
    draw_status_bar(frame, chunks[4], app);

    if app.show_help {
        draw_help_overlay(frame);
    }
}
