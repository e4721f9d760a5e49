use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

use crate::cache::PlanCache;
use crate::config::DungeonConfig;
use crate::dice::{DiceResults, DiceRoller};
use crate::geometry::Size;
use crate::history::{RollHistory, RollRecord};
use crate::layout::{LayoutEngine, RoomLayout};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::RollMetrics;
use crate::render::PlanRenderer;
use crate::tables::RollTables;
use crate::Result;

pub mod driver;

/// Configuration knobs for the runtime loop.
#[derive(Clone)]
pub struct RuntimeConfig {
    /// Interval between synthetic tick events.
    pub tick_interval: Duration,
    /// Optional structured logger used by the runtime.
    pub logger: Option<Logger>,
    /// Metrics accumulator used for periodic snapshots.
    pub metrics: Option<Arc<Mutex<RollMetrics>>>,
    /// Interval between metrics snapshot emissions. Zero disables snapshots.
    pub metrics_interval: Duration,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
    /// Prefix frames with a cursor-home-and-clear sequence so interactive
    /// repaints land on top of the previous frame. Off for plain writers.
    pub position_frames: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(200),
            logger: None,
            metrics: None,
            metrics_interval: Duration::from_secs(5),
            metrics_target: "dicey::runtime.metrics".to_string(),
            position_frames: false,
        }
    }
}

impl RuntimeConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(RollMetrics::new())));
        }
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<RollMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// High-level events driving the runtime.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    Tick { elapsed: Duration },
    Key(KeyEvent),
    /// A finished throw injected from outside, bypassing the roller.
    Roll(DiceResults),
    Resize(Size),
    Raw(CrosstermEvent),
}

/// Event loop tying the dice roller, layout engine, cache and renderer
/// together. A throw or a viewport change replaces the current layout
/// wholesale; nothing is patched incrementally, so the latest computation
/// always wins.
pub struct DungeonRuntime {
    engine: LayoutEngine,
    roller: DiceRoller,
    rng: StdRng,
    tables: RollTables,
    history: RollHistory,
    cache: PlanCache,
    renderer: PlanRenderer,
    app_config: DungeonConfig,
    config: RuntimeConfig,
    viewport: Size,
    current_layout: Option<RoomLayout>,
    should_exit: bool,
    redraw_requested: bool,
    start_instant: Option<Instant>,
    last_metrics_emit: Option<Instant>,
}

impl DungeonRuntime {
    pub fn new(
        app_config: DungeonConfig,
        tables: RollTables,
        renderer: PlanRenderer,
        initial_size: Size,
    ) -> Self {
        Self {
            engine: LayoutEngine::new(app_config.layout),
            roller: DiceRoller::new(app_config.enabled_dice),
            rng: StdRng::from_entropy(),
            tables,
            history: RollHistory::new(),
            cache: PlanCache::new(),
            renderer,
            app_config,
            config: RuntimeConfig::default(),
            viewport: initial_size,
            current_layout: None,
            should_exit: false,
            redraw_requested: true,
            start_instant: None,
            last_metrics_emit: None,
        }
    }

    /// Fix the roller's seed, for reproducible demos and benches.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn config_mut(&mut self) -> &mut RuntimeConfig {
        &mut self.config
    }

    pub fn history(&self) -> &RollHistory {
        &self.history
    }

    pub fn current_layout(&self) -> Option<&RoomLayout> {
        self.current_layout.as_ref()
    }

    /// Blocking interactive loop fed by crossterm events.
    pub fn run(&mut self, stdout: &mut impl Write) -> Result<()> {
        self.bootstrap(stdout)?;
        let mut last_tick = Instant::now();

        while !self.should_exit {
            let timeout = self
                .config
                .tick_interval
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_millis(0));

            if event::poll(timeout)? {
                let runtime_event = Self::map_event(event::read()?);
                self.dispatch_event(runtime_event)?;
                self.render_if_needed(stdout)?;
                if self.should_exit {
                    break;
                }
            }

            if last_tick.elapsed() >= self.config.tick_interval {
                let now = Instant::now();
                let elapsed = now.duration_since(last_tick);
                last_tick = now;
                self.dispatch_event(RuntimeEvent::Tick { elapsed })?;
                self.render_if_needed(stdout)?;
            }

            self.maybe_emit_metrics();
        }

        self.finalize();
        Ok(())
    }

    /// Replay a fixed event list against any writer. No terminal needed;
    /// this is the test and bench entry point.
    pub fn run_scripted<I>(&mut self, stdout: &mut impl Write, events: I) -> Result<()>
    where
        I: IntoIterator<Item = RuntimeEvent>,
    {
        self.bootstrap(stdout)?;
        for event in events.into_iter() {
            self.dispatch_event(event)?;
            self.render_if_needed(stdout)?;
            if self.should_exit {
                break;
            }
        }
        self.finalize();
        Ok(())
    }

    /// Public resize hook for drivers that learn the viewport out of band.
    pub fn resize(&mut self, size: Size) -> Result<()> {
        self.handle_resize(size);
        Ok(())
    }

    fn map_event(event: CrosstermEvent) -> RuntimeEvent {
        match event {
            CrosstermEvent::Key(key) => RuntimeEvent::Key(key),
            CrosstermEvent::Resize(width, height) => RuntimeEvent::Resize(Size::new(width, height)),
            other => RuntimeEvent::Raw(other),
        }
    }

    fn dispatch_event(&mut self, event: RuntimeEvent) -> Result<()> {
        match &event {
            RuntimeEvent::Key(key) => self.handle_key(*key),
            RuntimeEvent::Roll(dice) => self.apply_throw(*dice),
            RuntimeEvent::Resize(size) => self.handle_resize(*size),
            RuntimeEvent::Tick { .. } | RuntimeEvent::Raw(_) => {}
        }

        self.log_runtime_event(
            LogLevel::Debug,
            "event_dispatched",
            [json_kv("event", json!(Self::describe_event(&event)))],
        );
        self.maybe_emit_metrics();
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press || key.modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_exit = true;
                self.log_runtime_event(LogLevel::Info, "exit_requested", std::iter::empty());
            }
            KeyCode::Enter | KeyCode::Char('r') => {
                let dice = self.roller.roll(&mut self.rng);
                self.apply_throw(dice);
            }
            KeyCode::Char('p') => {
                self.app_config.generate_plan = !self.app_config.generate_plan;
                self.recompute_layout();
                self.redraw_requested = true;
            }
            _ => {}
        }
    }

    fn apply_throw(&mut self, dice: DiceResults) {
        let record = self.history.push_throw(&dice, &self.tables, now_ms());
        let record_id = record.id;
        self.record_metric(RollMetrics::record_throw);
        self.recompute_layout();
        self.redraw_requested = true;
        self.log_runtime_event(
            LogLevel::Info,
            "dice_thrown",
            [
                json_kv("record", json!(record_id)),
                json_kv("dice", json!(dice)),
            ],
        );
    }

    fn handle_resize(&mut self, size: Size) {
        self.viewport = size;
        self.recompute_layout();
        self.cache.invalidate();
        self.redraw_requested = true;
        self.record_metric(RollMetrics::record_resize);
        self.log_runtime_event(
            LogLevel::Info,
            "resized",
            [
                json_kv("width", json!(size.width)),
                json_kv("height", json!(size.height)),
            ],
        );
    }

    /// Rebuild the layout from the latest throw under the current viewport.
    /// The previous layout is replaced wholesale; an unmeasured viewport
    /// falls back to the cached cell size so the plan never collapses.
    fn recompute_layout(&mut self) {
        if !self.app_config.generate_plan {
            self.current_layout = None;
            return;
        }
        let Some(dice) = self.history.latest().map(RollRecord::dice) else {
            self.current_layout = None;
            return;
        };

        let mut layout = self.engine.compute(&dice, self.viewport.width);
        if let Some(cell_size) = self.cache.resolve_cell_size(layout.cell_size_px) {
            layout.cell_size_px = cell_size;
        }
        self.record_metric(RollMetrics::record_layout);
        self.current_layout = Some(layout);
    }

    fn render_if_needed(&mut self, stdout: &mut impl Write) -> Result<()> {
        if !self.redraw_requested {
            return Ok(());
        }
        self.redraw_requested = false;

        let frame = self.compose_frame();
        if !self.cache.admit_frame(&frame) {
            self.record_metric(RollMetrics::record_frame_skipped);
            return Ok(());
        }

        if self.config.position_frames {
            stdout.write_all(b"\x1b[H\x1b[J")?;
        }
        stdout.write_all(frame.as_bytes())?;
        stdout.flush()?;

        self.record_metric(RollMetrics::record_render);
        self.log_runtime_event(
            LogLevel::Debug,
            "render_completed",
            [json_kv("bytes", json!(frame.len()))],
        );
        Ok(())
    }

    /// Roll read-out on top, plan underneath when enabled.
    fn compose_frame(&self) -> String {
        let mut frame = String::new();
        match self.history.latest() {
            None => frame.push_str("No rolls yet. Press 'r' to roll the dice.\n"),
            Some(record) => {
                for roll in record.rolls() {
                    match &roll.description {
                        Some(description) => frame
                            .push_str(&format!("{}: {} ({})\n", roll.die, roll.value, description)),
                        None => frame.push_str(&format!("{}: {}\n", roll.die, roll.value)),
                    }
                }
            }
        }

        if let Some(layout) = &self.current_layout {
            let plan = self.renderer.frame(layout);
            if !plan.is_empty() {
                frame.push('\n');
                frame.push_str(&plan);
            }
        }
        frame
    }

    fn bootstrap(&mut self, stdout: &mut impl Write) -> Result<()> {
        self.should_exit = false;
        self.redraw_requested = true;
        self.cache.invalidate();
        self.ensure_metrics_initialized();
        let now = Instant::now();
        self.start_instant = Some(now);
        self.last_metrics_emit = Some(now);
        self.log_runtime_event(
            LogLevel::Info,
            "runtime_started",
            [
                json_kv("viewport_width", json!(self.viewport.width)),
                json_kv("generate_plan", json!(self.app_config.generate_plan)),
            ],
        );
        self.render_if_needed(stdout)
    }

    fn finalize(&mut self) {
        let uptime_ms = self
            .start_instant
            .map(|start| start.elapsed().as_millis())
            .unwrap_or(0);
        self.log_runtime_event(
            LogLevel::Info,
            "runtime_stopped",
            [json_kv("uptime_ms", json!(uptime_ms as u64))],
        );
    }

    fn ensure_metrics_initialized(&mut self) {
        if self.config.metrics.is_none() && self.config.metrics_interval > Duration::from_millis(0)
        {
            self.config.metrics = Some(Arc::new(Mutex::new(RollMetrics::new())));
        }
    }

    fn log_runtime_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, "dicey::runtime", message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn record_metric(&mut self, record: impl FnOnce(&mut RollMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut guard);
            }
        }
    }

    fn maybe_emit_metrics(&mut self) {
        if self.config.metrics.is_none() {
            return;
        }
        if self.config.metrics_interval == Duration::from_millis(0) {
            return;
        }

        let now = Instant::now();
        match self.last_metrics_emit {
            Some(last) if now.duration_since(last) < self.config.metrics_interval => {
                return;
            }
            _ => {
                self.last_metrics_emit = Some(now);
            }
        }

        let uptime = self
            .start_instant
            .map(|start| now.duration_since(start))
            .unwrap_or_default();

        if let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let target = self.config.metrics_target.as_str();
                let snapshot_event = guard.snapshot(uptime).to_log_event(target);
                let _ = logger.log_event(snapshot_event);
            }
        }
    }

    fn describe_event(event: &RuntimeEvent) -> &'static str {
        match event {
            RuntimeEvent::Tick { .. } => "tick",
            RuntimeEvent::Key(_) => "key",
            RuntimeEvent::Roll(_) => "roll",
            RuntimeEvent::Resize(_) => "resize",
            RuntimeEvent::Raw(_) => "raw",
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
