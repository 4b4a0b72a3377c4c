//! The lit windows of the front building.
//!
//! Each run consumes a freshly shuffled activation queue, one window per
//! activation slot, until the queue is exhausted.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::windows::WINDOW_COUNT;

/// The two colors a window can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowColor {
    /// Cool blue glass reflecting daylight
    Day,
    /// Warm light from inside
    Night,
}

/// A single window on the building front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLight {
    /// Position on the building, 0..44
    pub index: usize,
    /// Current color
    pub color: WindowColor,
}

/// The ordered set of window lights plus their activation queue.
#[derive(Debug, Clone)]
pub struct WindowLightSet {
    lights: Vec<WindowLight>,
    queue: VecDeque<usize>,
}

impl WindowLightSet {
    /// Creates a set with every window at the day color and nothing queued.
    pub fn new() -> Self {
        Self {
            lights: (0..WINDOW_COUNT)
                .map(|index| WindowLight {
                    index,
                    color: WindowColor::Day,
                })
                .collect(),
            queue: VecDeque::new(),
        }
    }

    /// Queues every window in a fresh random order.
    ///
    /// Current colors are left untouched.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<usize> = (0..WINDOW_COUNT).collect();
        order.shuffle(rng);
        self.queue = order.into();
    }

    /// Pops the next queued window and paints it `color`.
    ///
    /// Returns the window index, or `None` once the queue is exhausted.
    pub fn activate_next(&mut self, color: WindowColor) -> Option<usize> {
        let index = self.queue.pop_front()?;
        self.lights[index].color = color;
        Some(index)
    }

    /// All windows in index order.
    pub fn lights(&self) -> &[WindowLight] {
        &self.lights
    }

    /// Number of windows still waiting for activation.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Remaining activation order.
    pub fn queued(&self) -> impl Iterator<Item = usize> + '_ {
        self.queue.iter().copied()
    }
}

impl Default for WindowLightSet {
    fn default() -> Self {
        Self::new()
    }
}
