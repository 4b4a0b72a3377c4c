//! Application state and logic.
//!
//! This module contains the preset selection, the coordinator handle and the
//! scene snapshot the renderer draws from.

use anyhow::Result;
use chrono::Local;
use tracing::info;

use crate::clock::format_clock;
use crate::coordinator::{Coordinator, Scene, TimerPhase};
use crate::event::Action;
use crate::validation::preset_durations;

/// Status message to display to the user.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// The message text
    pub text: String,
    /// Whether this is an error message
    pub is_error: bool,
}

/// Main application state.
pub struct App {
    /// Owner of the countdown and its tick loop
    coordinator: Coordinator,
    /// Scene as of the last frame
    pub scene: Scene,
    /// Selectable durations in milliseconds
    pub presets: Vec<u64>,
    /// Index of the highlighted preset
    pub selected: usize,
    /// Status message to display
    pub status: Option<StatusMessage>,
    /// Help visibility
    pub show_help: bool,
}

impl App {
    /// Creates a new application instance.
    pub fn new() -> Self {
        Self::with_coordinator(Coordinator::new())
    }

    /// Creates an application driving the given coordinator.
    pub fn with_coordinator(coordinator: Coordinator) -> Self {
        Self {
            coordinator,
            scene: Scene::new(),
            presets: preset_durations(),
            selected: 0,
            status: None,
            show_help: false,
        }
    }

    /// Duration of the highlighted preset.
    pub fn selected_duration(&self) -> Option<u64> {
        self.presets.get(self.selected).copied()
    }

    /// Refreshes the scene snapshot before drawing a frame.
    pub fn sync(&mut self) -> Result<()> {
        let scene = self.coordinator.snapshot()?;

        let finished = self.scene.timer == TimerPhase::Running
            && scene.timer == TimerPhase::Idle
            && self.scene.generation == scene.generation;
        if finished {
            let at = Local::now().format("%H:%M:%S");
            info!("Timer finished at {}", at);
            self.set_status(&format!("Finished at {at}"), false);
        }

        self.scene = scene;
        Ok(())
    }

    /// Handles an action and returns true if the app should quit.
    pub fn handle_event(&mut self, action: Action) -> Result<bool> {
        // Handle help toggle from anywhere
        if action == Action::Help {
            self.show_help = !self.show_help;
            return Ok(false);
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return Ok(false);
        }

        match action {
            Action::Quit => return Ok(true),
            Action::Previous => self.select_previous(),
            Action::Next => self.select_next(),
            Action::First => self.selected = 0,
            Action::Last => self.selected = self.presets.len().saturating_sub(1),
            Action::Start => self.start_selected()?,
            Action::Help => {}
        }
        Ok(false)
    }

    // --- Selection helpers ---

    fn select_previous(&mut self) {
        let len = self.presets.len();
        if len == 0 {
            return;
        }
        self.selected = if self.selected == 0 { len - 1 } else { self.selected - 1 };
    }

    fn select_next(&mut self) {
        let len = self.presets.len();
        if len == 0 {
            return;
        }
        self.selected = if self.selected >= len - 1 { 0 } else { self.selected + 1 };
    }

    /// Starts (or restarts) the countdown with the highlighted preset.
    fn start_selected(&mut self) -> Result<()> {
        let Some(duration) = self.selected_duration() else {
            return Ok(());
        };

        match self.coordinator.start(duration) {
            Ok(_) => {
                let at = Local::now().format("%H:%M:%S");
                self.set_status(
                    &format!("Timer {} started at {at}", format_clock(duration)),
                    false,
                );
            }
            Err(e) => self.set_status(&format!("Cannot start timer: {e}"), true),
        }

        self.sync()
    }

    fn set_status(&mut self, text: &str, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.to_string(),
            is_error,
        });
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
