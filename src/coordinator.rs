//! Timer-driven animation coordinator.
//!
//! A single countdown drives every discrete piece of the scene: the clock,
//! the window lights and the sky. All mutation goes through [`Scene`], which
//! is shared with the renderer behind one mutex so that a tick is always
//! observed as a whole.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::clock::format_clock;
use crate::constants::fade::PANEL_SLIDE;
use crate::constants::timer::{
    ACTIVATION_DIVISOR, STAR_TRIGGER_FROM_DAY, STAR_TRIGGER_FROM_NIGHT, TICK, TICK_MS,
};
use crate::crossfade::{Levels, Transition};
use crate::validation::validate_duration;
use crate::windows::{WindowColor, WindowLightSet};

/// Whether a countdown is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
}

/// Palette of the city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityPhase {
    Day,
    Night,
}

impl CityPhase {
    pub fn toggled(self) -> Self {
        match self {
            CityPhase::Day => CityPhase::Night,
            CityPhase::Night => CityPhase::Day,
        }
    }
}

/// Whether the star field is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyPhase {
    Empty,
    Stars,
}

impl SkyPhase {
    pub fn toggled(self) -> Self {
        match self {
            SkyPhase::Empty => SkyPhase::Stars,
            SkyPhase::Stars => SkyPhase::Empty,
        }
    }
}

/// Everything derived from the selected duration when a run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPlan {
    /// Length of the run
    pub total_ms: u64,
    /// Accumulated time after which the next window lights up
    pub activation_period_ms: u64,
    /// Remaining time below which the sky flips
    pub star_trigger_ms: u64,
    /// Sky the run is heading toward
    pub next_sky: SkyPhase,
    /// City the run is heading toward
    pub next_city: CityPhase,
    /// Color windows are painted during the run
    pub window_target: WindowColor,
}

impl RunPlan {
    /// Plans a run of `total_ms` starting from the given phases.
    pub fn new(total_ms: u64, city: CityPhase, sky: SkyPhase) -> Self {
        let (num, den) = match city {
            CityPhase::Day => STAR_TRIGGER_FROM_DAY,
            CityPhase::Night => STAR_TRIGGER_FROM_NIGHT,
        };
        let window_target = match city {
            CityPhase::Day => WindowColor::Night,
            CityPhase::Night => WindowColor::Day,
        };

        Self {
            total_ms,
            activation_period_ms: total_ms / ACTIVATION_DIVISOR,
            star_trigger_ms: total_ms * num / den,
            next_sky: sky.toggled(),
            next_city: city.toggled(),
            window_target,
        }
    }
}

/// Progress of the run in flight.
#[derive(Debug, Clone, Copy)]
struct ActiveRun {
    plan: RunPlan,
    since_activation_ms: u64,
    sky_flipped: bool,
}

/// What one tick changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// An activation slot elapsed on this tick
    pub activation_due: bool,
    /// Window lit on this tick, if the queue still had one
    pub activated: Option<usize>,
    /// The sky flipped on this tick
    pub sky_flipped: bool,
    /// The countdown reached zero on this tick
    pub finished: bool,
}

/// The whole observable state of the screen.
#[derive(Debug, Clone)]
pub struct Scene {
    pub timer: TimerPhase,
    pub city: CityPhase,
    pub sky: SkyPhase,
    /// Remaining time of the current run, never negative
    pub countdown_ms: u64,
    pub windows: WindowLightSet,
    /// Incremented on every run start; a tick loop only mutates its own generation
    pub generation: u64,
    /// Palette and sun
    pub city_fade: Option<Transition<CityPhase>>,
    /// Clock text, on its own easing
    pub text_fade: Option<Transition<CityPhase>>,
    pub stars_fade: Option<Transition<SkyPhase>>,
    pub panel_slide: Option<Transition<TimerPhase>>,
    run: Option<ActiveRun>,
}

impl Scene {
    /// Idle daytime scene with an empty sky and every window at the day color.
    pub fn new() -> Self {
        Self {
            timer: TimerPhase::Idle,
            city: CityPhase::Day,
            sky: SkyPhase::Empty,
            countdown_ms: 0,
            windows: WindowLightSet::new(),
            generation: 0,
            city_fade: None,
            text_fade: None,
            stars_fade: None,
            panel_slide: None,
            run: None,
        }
    }

    /// Plan of the run in flight.
    pub fn plan(&self) -> Option<RunPlan> {
        self.run.map(|run| run.plan)
    }

    /// Starts a run of `total_ms`, superseding any run in flight.
    ///
    /// The city flips immediately; its cross-fade runs for the whole duration.
    /// Fades pick up from whatever is on screen at `now`.
    pub fn begin<R: Rng + ?Sized>(&mut self, total_ms: u64, rng: &mut R, now: Instant) -> RunPlan {
        let plan = RunPlan::new(total_ms, self.city, self.sky);
        let levels = Levels::at(self, now);

        self.windows.reset(rng);
        self.timer = TimerPhase::Running;
        self.city = plan.next_city;
        self.countdown_ms = total_ms;
        self.generation += 1;
        self.run = Some(ActiveRun {
            plan,
            since_activation_ms: 0,
            sky_flipped: false,
        });

        let total = Duration::from_millis(total_ms);
        self.city_fade = Some(Transition::new(plan.next_city, levels.sun, now, total));
        self.text_fade = Some(Transition::new(plan.next_city, levels.text, now, total));
        self.panel_slide = Some(Transition::new(
            TimerPhase::Running,
            levels.panel,
            now,
            PANEL_SLIDE,
        ));

        plan
    }

    /// Advances the run by one tick. Does nothing while idle.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let mut report = TickReport::default();
        let Some(mut run) = self.run else {
            return report;
        };
        let plan = run.plan;

        self.countdown_ms = self.countdown_ms.saturating_sub(TICK_MS);

        run.since_activation_ms += TICK_MS;
        if run.since_activation_ms > plan.activation_period_ms {
            report.activation_due = true;
            report.activated = self.windows.activate_next(plan.window_target);
            run.since_activation_ms = 0;
        }

        if !run.sky_flipped && self.countdown_ms < plan.star_trigger_ms {
            run.sky_flipped = true;
            report.sky_flipped = true;
            let from = Levels::at(self, now).stars;
            self.sky = plan.next_sky;
            // Stars fade over whatever is left of the run.
            let remaining = Duration::from_millis(self.countdown_ms);
            self.stars_fade = Some(Transition::new(plan.next_sky, from, now, remaining));
        }

        self.run = Some(run);

        if self.countdown_ms == 0 {
            report.finished = true;
            let from = Levels::at(self, now).panel;
            self.timer = TimerPhase::Idle;
            self.run = None;
            self.panel_slide = Some(Transition::new(TimerPhase::Idle, from, now, PANEL_SLIDE));
        }

        report
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to the scene shared between the tick loop and the renderer.
pub type SharedScene = Arc<Mutex<Scene>>;

/// Owns the scene and at most one tick loop.
pub struct Coordinator {
    scene: SharedScene,
    task: Option<JoinHandle<()>>,
    rng: StdRng,
}

impl Coordinator {
    /// Creates a coordinator seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates a coordinator with a caller-provided shuffle source.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            scene: Arc::new(Mutex::new(Scene::new())),
            task: None,
            rng,
        }
    }

    /// Shared handle to the scene.
    pub fn scene(&self) -> SharedScene {
        Arc::clone(&self.scene)
    }

    /// Copy of the scene as of the last completed tick.
    pub fn snapshot(&self) -> Result<Scene> {
        self.scene
            .lock()
            .map(|scene| scene.clone())
            .map_err(|e| anyhow!("Failed to lock scene: {e}"))
    }

    /// Starts a countdown of `duration_ms`, cancelling any run in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, duration_ms: u64) -> Result<RunPlan> {
        validate_duration(duration_ms).map_err(anyhow::Error::msg)?;

        if let Some(task) = self.task.take() {
            task.abort();
        }

        let (plan, generation) = {
            let mut scene = self
                .scene
                .lock()
                .map_err(|e| anyhow!("Failed to lock scene: {e}"))?;
            let plan = scene.begin(duration_ms, &mut self.rng, Instant::now());
            debug!(
                "Activation order: {:?}",
                scene.windows.queued().collect::<Vec<_>>()
            );
            (plan, scene.generation)
        };

        info!(
            "Starting {} run #{}: city -> {:?}, stars at {} ms, window every {} ms",
            format_clock(duration_ms),
            generation,
            plan.next_city,
            plan.star_trigger_ms,
            plan.activation_period_ms
        );

        self.task = Some(tokio::spawn(run_ticks(self.scene(), generation)));
        Ok(plan)
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Fixed-rate tick loop for one run.
///
/// Exits when the countdown reaches zero or a newer run takes over.
async fn run_ticks(scene: SharedScene, generation: u64) {
    let mut interval = time::interval_at(Instant::now() + TICK, TICK);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let now = interval.tick().await;

        let mut guard = match scene.lock() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Tick loop #{} cannot lock scene: {}", generation, e);
                return;
            }
        };

        if guard.generation != generation {
            debug!("Tick loop #{} superseded by #{}", generation, guard.generation);
            return;
        }

        let report = guard.tick(now);
        match report.activated {
            Some(index) => debug!("Window {} lit, {} left", index, guard.windows.pending()),
            None if report.activation_due => debug!("Activation slot with no windows left"),
            None => {}
        }
        if report.sky_flipped {
            debug!(
                "Sky flipped to {:?} with {} ms left",
                guard.sky, guard.countdown_ms
            );
        }
        if report.finished {
            info!("Run #{} finished", generation);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::windows::WINDOW_COUNT;
    use crate::crossfade::{city_palette, SceneLook, DAY_TEXT};

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// Ticks `scene` until the run ends, returning every report.
    fn run_to_end(scene: &mut Scene) -> Vec<TickReport> {
        let now = Instant::now();
        let mut reports = Vec::new();
        while scene.timer == TimerPhase::Running {
            reports.push(scene.tick(now));
        }
        reports
    }

    #[test]
    fn test_plan_from_day() {
        let plan = RunPlan::new(50_000, CityPhase::Day, SkyPhase::Empty);
        assert_eq!(plan.activation_period_ms, 980);
        assert_eq!(plan.star_trigger_ms, 30_000);
        assert_eq!(plan.next_city, CityPhase::Night);
        assert_eq!(plan.next_sky, SkyPhase::Stars);
        assert_eq!(plan.window_target, WindowColor::Night);
    }

    #[test]
    fn test_plan_from_night() {
        let plan = RunPlan::new(50_000, CityPhase::Night, SkyPhase::Stars);
        assert_eq!(plan.star_trigger_ms, 20_000);
        assert_eq!(plan.next_city, CityPhase::Day);
        assert_eq!(plan.next_sky, SkyPhase::Empty);
        assert_eq!(plan.window_target, WindowColor::Day);
    }

    #[test]
    fn test_begin_flips_city_and_alternates() {
        let mut scene = Scene::new();
        let mut rng = seeded();

        let first = scene.begin(10_000, &mut rng, Instant::now());
        assert_eq!(scene.city, CityPhase::Night);
        assert_eq!(scene.timer, TimerPhase::Running);
        assert_eq!(scene.countdown_ms, 10_000);
        assert_eq!(first.star_trigger_ms, 6_000);
        run_to_end(&mut scene);

        let second = scene.begin(10_000, &mut rng, Instant::now());
        assert_eq!(scene.city, CityPhase::Day);
        assert_eq!(second.star_trigger_ms, 4_000);
        assert_eq!(scene.generation, 2);
    }

    #[test]
    fn test_every_preset_runs_to_zero() {
        let mut rng = seeded();
        for millis in crate::validation::preset_durations() {
            let mut scene = Scene::new();
            scene.begin(millis, &mut rng, Instant::now());
            let reports = run_to_end(&mut scene);

            assert_eq!(scene.countdown_ms, 0);
            assert_eq!(scene.timer, TimerPhase::Idle);
            assert_eq!(reports.len() as u64, millis / TICK_MS);
            assert!(reports.last().is_some_and(|r| r.finished));
            assert!(scene.plan().is_none());
        }
    }

    #[test]
    fn test_sky_flips_once_below_trigger() {
        let mut scene = Scene::new();
        scene.begin(10_000, &mut seeded(), Instant::now());
        let now = Instant::now();

        while scene.countdown_ms > 6_000 {
            scene.tick(now);
            assert_eq!(scene.sky, SkyPhase::Empty);
        }
        assert_eq!(scene.countdown_ms, 6_000);
        assert_eq!(scene.sky, SkyPhase::Empty);

        let report = scene.tick(now);
        assert!(report.sky_flipped);
        assert_eq!(scene.countdown_ms, 5_990);
        assert_eq!(scene.sky, SkyPhase::Stars);

        let flips = run_to_end(&mut scene)
            .iter()
            .filter(|r| r.sky_flipped)
            .count();
        assert_eq!(flips, 0);
        assert_eq!(scene.sky, SkyPhase::Stars);
    }

    #[test]
    fn test_stars_fade_over_remaining_time() {
        let mut scene = Scene::new();
        scene.begin(10_000, &mut seeded(), Instant::now());
        run_to_end(&mut scene);

        let fade = scene.stars_fade.expect("sky flipped during the run");
        assert_eq!(fade.target, SkyPhase::Stars);
        assert_eq!(fade.duration, Duration::from_millis(5_990));
    }

    #[test]
    fn test_second_run_clears_the_sky() {
        let mut scene = Scene::new();
        let mut rng = seeded();
        scene.begin(5_000, &mut rng, Instant::now());
        run_to_end(&mut scene);
        assert_eq!(scene.sky, SkyPhase::Stars);

        scene.begin(5_000, &mut rng, Instant::now());
        run_to_end(&mut scene);
        assert_eq!(scene.sky, SkyPhase::Empty);
        assert_eq!(scene.city, CityPhase::Day);
    }

    #[test]
    fn test_fifty_second_run_lights_every_window() {
        let mut scene = Scene::new();
        scene.begin(50_000, &mut seeded(), Instant::now());
        let reports = run_to_end(&mut scene);

        // Period 980 ms: a slot elapses every 99 ticks (990 ms).
        let due = reports.iter().filter(|r| r.activation_due).count();
        let lit = reports.iter().filter(|r| r.activated.is_some()).count();
        assert_eq!(due, 50);
        assert_eq!(lit, WINDOW_COUNT);
        assert_eq!(scene.windows.pending(), 0);
        assert!(scene
            .windows
            .lights()
            .iter()
            .all(|l| l.color == WindowColor::Night));
    }

    #[test]
    fn test_activations_follow_the_shuffled_queue() {
        let mut scene = Scene::new();
        scene.begin(50_000, &mut seeded(), Instant::now());
        let expected: Vec<usize> = scene.windows.queued().collect();

        let lit: Vec<usize> = run_to_end(&mut scene)
            .iter()
            .filter_map(|r| r.activated)
            .collect();
        assert_eq!(lit, expected);
    }

    #[test]
    fn test_windows_are_not_reset_between_runs() {
        let mut scene = Scene::new();
        let mut rng = seeded();
        scene.begin(50_000, &mut rng, Instant::now());
        run_to_end(&mut scene);

        scene.begin(50_000, &mut rng, Instant::now());
        assert!(scene
            .windows
            .lights()
            .iter()
            .all(|l| l.color == WindowColor::Night));

        let now = Instant::now();
        while scene.windows.pending() == WINDOW_COUNT {
            scene.tick(now);
        }
        let day = scene
            .windows
            .lights()
            .iter()
            .filter(|l| l.color == WindowColor::Day)
            .count();
        assert_eq!(day, 1);
    }

    #[test]
    fn test_tick_while_idle_is_a_no_op() {
        let mut scene = Scene::new();
        let report = scene.tick(Instant::now());
        assert_eq!(report, TickReport::default());
        assert_eq!(scene.countdown_ms, 0);
        assert_eq!(scene.timer, TimerPhase::Idle);
    }

    #[test]
    fn test_panel_slides_in_and_out() {
        let mut scene = Scene::new();
        scene.begin(5_000, &mut seeded(), Instant::now());
        assert_eq!(
            scene.panel_slide.map(|t| t.target),
            Some(TimerPhase::Running)
        );
        run_to_end(&mut scene);
        assert_eq!(scene.panel_slide.map(|t| t.target), Some(TimerPhase::Idle));
    }

    #[test]
    fn test_restart_mid_run_continues_fades_from_screen() {
        let mut scene = Scene::new();
        let mut rng = seeded();
        let start = Instant::now();
        scene.begin(300_000, &mut rng, start);

        let midway = start + Duration::from_secs(150);
        let before = SceneLook::at(&scene, midway);
        scene.begin(300_000, &mut rng, midway);
        let after = SceneLook::at(&scene, midway);

        assert_eq!(after.sun, before.sun);
        assert_eq!(after.text, before.text);
        assert_eq!(after.stars, before.stars);
        assert_eq!(after.panel, before.panel);
        assert!((before.sun.0 - 160.0).abs() < 1e-6);
        // The palette replays its keyframes toward the new phase.
        assert_eq!(after.palette, city_palette(CityPhase::Day, 0.0));

        let end = midway + Duration::from_secs(300);
        let rested = SceneLook::at(&scene, end);
        assert_eq!(rested.sun, (0.0, 0.0));
        assert_eq!(rested.text, DAY_TEXT);
    }

    #[test]
    fn test_star_fade_starts_from_current_alpha() {
        let mut scene = Scene::new();
        let mut rng = seeded();
        let start = Instant::now();
        scene.begin(10_000, &mut rng, start);
        run_to_end(&mut scene);
        // Stars were half way in when the next run flips them out again.
        let flip = scene.stars_fade.expect("sky flipped").started_at;
        let half = flip + Duration::from_millis(2_995);

        scene.begin(10_000, &mut rng, half);
        while scene.sky == SkyPhase::Stars {
            scene.tick(half);
        }
        let fade = scene.stars_fade.expect("sky flipped back");
        assert_eq!(fade.target, SkyPhase::Empty);
        assert!((fade.from - 0.5).abs() < 1e-6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_loop_runs_to_completion() {
        let mut coordinator = Coordinator::with_rng(seeded());
        let plan = coordinator.start(5_000).unwrap();
        assert_eq!(plan.next_city, CityPhase::Night);

        time::sleep(Duration::from_millis(2_500)).await;
        let midway = coordinator.snapshot().unwrap();
        assert_eq!(midway.timer, TimerPhase::Running);
        assert!(midway.countdown_ms > 0 && midway.countdown_ms < 5_000);

        time::sleep(Duration::from_millis(3_000)).await;
        let done = coordinator.snapshot().unwrap();
        assert_eq!(done.timer, TimerPhase::Idle);
        assert_eq!(done.countdown_ms, 0);
        assert_eq!(done.sky, SkyPhase::Stars);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_supersedes_the_running_loop() {
        let mut coordinator = Coordinator::with_rng(seeded());
        coordinator.start(300_000).unwrap();
        time::sleep(Duration::from_millis(1_000)).await;

        coordinator.start(10_000).unwrap();
        let restarted = coordinator.snapshot().unwrap();
        assert_eq!(restarted.countdown_ms, 10_000);
        assert_eq!(restarted.city, CityPhase::Day);
        assert_eq!(restarted.generation, 2);

        // A second live loop would have drained twice as much by now.
        time::sleep(Duration::from_millis(2_500)).await;
        assert_eq!(coordinator.snapshot().unwrap().countdown_ms, 7_500);

        time::sleep(Duration::from_millis(8_000)).await;
        let done = coordinator.snapshot().unwrap();
        assert_eq!(done.timer, TimerPhase::Idle);
        assert_eq!(done.countdown_ms, 0);

        // Nothing keeps ticking after the second run ends.
        time::sleep(Duration::from_millis(10_000)).await;
        let later = coordinator.snapshot().unwrap();
        assert_eq!(later.countdown_ms, 0);
        assert_eq!(later.timer, TimerPhase::Idle);
        assert_eq!(later.generation, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_generation_exits_without_mutating() {
        let coordinator = Coordinator::with_rng(seeded());
        let scene = coordinator.scene();
        {
            let mut guard = scene.lock().unwrap();
            guard.begin(5_000, &mut seeded(), Instant::now());
            guard.generation += 1;
        }

        run_ticks(coordinator.scene(), 1).await;
        assert_eq!(coordinator.snapshot().unwrap().countdown_ms, 5_000);
    }

    #[tokio::test]
    async fn test_start_rejects_invalid_durations() {
        let mut coordinator = Coordinator::with_rng(seeded());
        assert!(coordinator.start(1_000).is_err());
        assert!(coordinator.start(12_345).is_err());
        assert_eq!(coordinator.snapshot().unwrap().timer, TimerPhase::Idle);
    }
}
