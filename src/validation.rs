//! Validation of user-selected timer durations.

use crate::constants::timer::{PRESET_MAX_MS, PRESET_MIN_MS, PRESET_STEP_MS};

/// Validation result with error message.
pub type ValidationResult = Result<(), String>;

/// Validates a countdown duration in milliseconds.
///
/// Rules:
/// - Must be at least 5 seconds
/// - Must be at most 5 minutes
/// - Must be a whole multiple of 5 seconds
pub fn validate_duration(millis: u64) -> ValidationResult {
    if millis < PRESET_MIN_MS {
        return Err(format!(
            "Timer must run for at least {} seconds",
            PRESET_MIN_MS / 1_000
        ));
    }

    if millis > PRESET_MAX_MS {
        return Err(format!(
            "Timer can run for at most {} minutes",
            PRESET_MAX_MS / 60_000
        ));
    }

    if millis % PRESET_STEP_MS != 0 {
        return Err(format!(
            "Timer must be a multiple of {} seconds, got {millis} ms",
            PRESET_STEP_MS / 1_000
        ));
    }

    Ok(())
}

/// Returns every selectable duration, shortest first.
pub fn preset_durations() -> Vec<u64> {
    (PRESET_MIN_MS..=PRESET_MAX_MS)
        .step_by(PRESET_STEP_MS as usize)
        .collect()
}
