//! Continuous cross-fade curves.
//!
//! These run on wall-clock time, separate from the discrete countdown ticks.
//! A [`Transition`] records the level on screen when the fade began and the
//! phase it is heading to. Curves are evaluated on demand from the current
//! instant, so a fade recorded mid-way carries on from where the last one was.

use std::time::Duration;

use tokio::time::Instant;

use crate::constants::fade::{PANEL_OFFSET, SUN_TRAVEL_X, SUN_TRAVEL_Y, TEXT_EASING};
use crate::coordinator::{CityPhase, Scene, SkyPhase, TimerPhase};

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Builds a color from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Linear interpolation toward `other`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// Sky and building palette from noon to midnight.
pub const CITY_KEYFRAMES: [Rgb; 6] = [
    Rgb::hex(0xF6EFEB),
    Rgb::hex(0xFAC9AE),
    Rgb::hex(0xE1697A),
    Rgb::hex(0xA8536A),
    Rgb::hex(0x823F61),
    Rgb::hex(0x0C122E),
];

/// Clock text during the day.
pub const DAY_TEXT: Rgb = Rgb::hex(0x164EAF);
/// Clock text at night.
pub const NIGHT_TEXT: Rgb = Rgb::hex(0xFFFFFF);

/// A phase with a resting level on a `0..=1` scale.
///
/// Every eased curve except the palette interpolates between levels and
/// maps the result to its own units.
pub trait Level: Copy {
    fn level(self) -> f64;
}

impl Level for CityPhase {
    fn level(self) -> f64 {
        match self {
            CityPhase::Day => 0.0,
            CityPhase::Night => 1.0,
        }
    }
}

impl Level for SkyPhase {
    fn level(self) -> f64 {
        match self {
            SkyPhase::Empty => 0.0,
            SkyPhase::Stars => 1.0,
        }
    }
}

impl Level for TimerPhase {
    fn level(self) -> f64 {
        match self {
            TimerPhase::Idle => 0.0,
            TimerPhase::Running => 1.0,
        }
    }
}

/// A timed fade from level `from` toward `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<T> {
    pub target: T,
    /// Level on screen when the fade was recorded
    pub from: f64,
    pub started_at: Instant,
    pub duration: Duration,
}

impl<T: Level> Transition<T> {
    pub fn new(target: T, from: f64, started_at: Instant, duration: Duration) -> Self {
        Self {
            target,
            from: from.clamp(0.0, 1.0),
            started_at,
            duration,
        }
    }

    /// Fraction of the fade completed at `now`, in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Level at `now`, with `ease` applied to the progress.
    pub fn level_at(&self, now: Instant, ease: fn(f64) -> f64) -> f64 {
        let to = self.target.level();
        self.from + (to - self.from) * ease(self.progress(now))
    }
}

/// Level of `fade` at `now`, or the level of `resting` when no fade was recorded.
pub fn level_of<T: Level>(
    fade: Option<&Transition<T>>,
    resting: T,
    now: Instant,
    ease: fn(f64) -> f64,
) -> f64 {
    fade.map_or(resting.level(), |f| f.level_at(now, ease))
}

fn linear(p: f64) -> f64 {
    p
}

/// Easing of the clock text color.
pub fn text_ease(p: f64) -> f64 {
    let (x1, y1, x2, y2) = TEXT_EASING;
    cubic_bezier(x1, y1, x2, y2, p)
}

/// Palette color while fading toward `target`.
///
/// The palette always replays its keyframes from the start of the run.
pub fn city_palette(target: CityPhase, progress: f64) -> Rgb {
    let p = progress.clamp(0.0, 1.0);
    // Toward Day the keyframes play backwards.
    let p = match target {
        CityPhase::Night => p,
        CityPhase::Day => 1.0 - p,
    };
    let segments = (CITY_KEYFRAMES.len() - 1) as f64;
    let scaled = p * segments;
    let index = (scaled.floor() as usize).min(CITY_KEYFRAMES.len() - 2);
    CITY_KEYFRAMES[index].lerp(CITY_KEYFRAMES[index + 1], scaled - index as f64)
}

/// Clock text color at `level` between day and night.
pub fn text_color(level: f64) -> Rgb {
    DAY_TEXT.lerp(NIGHT_TEXT, level)
}

/// Sun offset from its noon position, in layout units.
pub fn sun_offset(level: f64) -> (f64, f64) {
    let travelled = level.clamp(0.0, 1.0);
    (SUN_TRAVEL_X * travelled, SUN_TRAVEL_Y * travelled)
}

/// How far the city panel has slid away from the clock, in layout units.
pub fn panel_offset(level: f64) -> f64 {
    PANEL_OFFSET * level.clamp(0.0, 1.0)
}

/// Evaluates a CSS-style cubic Bézier easing curve at `x`.
///
/// The curve runs from (0, 0) to (1, 1); `x1` and `x2` must lie in `[0, 1]`
/// so that x(t) is monotonic and bisection converges.
pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    let bezier = |a: f64, b: f64, t: f64| {
        let u = 1.0 - t;
        3.0 * u * u * t * a + 3.0 * u * t * t * b + t * t * t
    };

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..40 {
        let mid = (lo + hi) / 2.0;
        if bezier(x1, x2, mid) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bezier(y1, y2, (lo + hi) / 2.0)
}

/// Current level of every eased fade on `scene`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Levels {
    pub sun: f64,
    pub text: f64,
    pub stars: f64,
    pub panel: f64,
}

impl Levels {
    pub fn at(scene: &Scene, now: Instant) -> Self {
        Self {
            sun: level_of(scene.city_fade.as_ref(), scene.city, now, linear),
            text: level_of(scene.text_fade.as_ref(), scene.city, now, text_ease),
            stars: level_of(scene.stars_fade.as_ref(), scene.sky, now, linear),
            panel: level_of(scene.panel_slide.as_ref(), scene.timer, now, linear),
        }
    }
}

/// Every continuous value the renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLook {
    pub palette: Rgb,
    pub text: Rgb,
    pub sun: (f64, f64),
    pub stars: f64,
    pub panel: f64,
}

impl SceneLook {
    /// Samples all fades recorded on `scene` at `now`.
    pub fn at(scene: &Scene, now: Instant) -> Self {
        let palette = match scene.city_fade {
            Some(fade) => city_palette(fade.target, fade.progress(now)),
            None => city_palette(scene.city, 1.0),
        };
        let levels = Levels::at(scene, now);

        Self {
            palette,
            text: text_color(levels.text),
            sun: sun_offset(levels.sun),
            stars: levels.stars,
            panel: panel_offset(levels.panel),
        }
    }
}
