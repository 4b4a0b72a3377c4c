//! Application-wide constants.
//!
//! Centralizes magic numbers and configuration values for maintainability.

use std::time::Duration;

/// Event polling timeout - also the frame period of the cross-fade animations.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(33);

/// Countdown timing.
pub mod timer {
    use std::time::Duration;

    /// Size of one countdown tick in milliseconds.
    pub const TICK_MS: u64 = 10;
    /// Period of the tick loop.
    pub const TICK: Duration = Duration::from_millis(TICK_MS);
    /// Shortest selectable duration.
    pub const PRESET_MIN_MS: u64 = 5_000;
    /// Longest selectable duration.
    pub const PRESET_MAX_MS: u64 = 300_000;
    /// Distance between two neighbouring presets.
    pub const PRESET_STEP_MS: u64 = 5_000;
    /// The run is split into this many activation slots (44 windows plus margin).
    pub const ACTIVATION_DIVISOR: u64 = 51;
    /// Star trigger as a fraction of the run when leaving Day (numerator, denominator).
    pub const STAR_TRIGGER_FROM_DAY: (u64, u64) = (3, 5);
    /// Star trigger as a fraction of the run when leaving Night.
    pub const STAR_TRIGGER_FROM_NIGHT: (u64, u64) = (2, 5);
}

/// Building geometry.
pub mod windows {
    /// Number of lit windows on the front building.
    pub const WINDOW_COUNT: usize = 44;
    /// Window columns on the building front.
    pub const COLUMNS: usize = 4;
    /// Windows per column.
    pub const PER_COLUMN: usize = WINDOW_COUNT / COLUMNS;
}

/// Cross-fade animation constants, in the layout units of a 360x640 screen.
pub mod fade {
    use std::time::Duration;

    /// Duration of the clock panel slide.
    pub const PANEL_SLIDE: Duration = Duration::from_millis(200);
    /// Panel offset while a timer is running.
    pub const PANEL_OFFSET: f64 = 128.0;
    /// Horizontal sun travel from noon to night.
    pub const SUN_TRAVEL_X: f64 = 320.0;
    /// Vertical sun travel from noon to night.
    pub const SUN_TRAVEL_Y: f64 = 732.0;
    /// Control points of the clock text easing curve.
    pub const TEXT_EASING: (f64, f64, f64, f64) = (0.6, 0.0, 1.0, 0.0);
}

/// Layout dimensions for the main UI structure.
pub mod layout {
    /// Clock header height when fully revealed.
    pub const CLOCK_HEIGHT: u16 = 3;
    /// Preset bar height.
    pub const PRESET_BAR_HEIGHT: u16 = 4;
    /// Commands bar height.
    pub const COMMANDS_BAR_HEIGHT: u16 = 2;
    /// Status bar height.
    pub const STATUS_BAR_HEIGHT: u16 = 1;
    /// Width of one preset chip including its gap.
    pub const PRESET_CHIP_WIDTH: u16 = 9;
}

/// Dialog dimensions (percentages of screen size).
pub mod dialog {
    /// Help overlay width percentage.
    pub const HELP_WIDTH: u16 = 60;
    /// Help overlay height percentage.
    pub const HELP_HEIGHT: u16 = 60;
}
