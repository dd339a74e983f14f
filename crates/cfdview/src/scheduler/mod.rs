//! # Simulation Scheduler
//!
//! Drives one engine at a target rate:
//!
//! ```text
//! Tick N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. STEP       engine.tick()                                          │
//! │ 2. PAINT      bind views over engine.buffers() → FrameRenderer       │
//! │ 3. DIAGNOSE   on N = 0, P, 2P, ... → DiagnosticsSink                 │
//! │ 4. RE-ARM     delay to the next deadline → await_display_sync        │
//! │               (stop handle observed here)                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## States
//!
//! ```text
//! Idle ──start──► Running ──stop handle / frame cap──► Stopped
//!                    │
//!                    └──engine, decode or paint error──► Failed
//! ```
//!
//! Tick N's paint finishes before tick N+1's step. Views are bound fresh
//! every tick and dropped before the engine is stepped again.

mod diagnostics;
mod host;
mod stats;

pub use diagnostics::{ChannelSink, DiagnosticsReport, DiagnosticsSink, TracingSink, VecSink};
pub use host::{FrameHost, ManualClock, ManualHost, ThreadHost};
pub use stats::SchedulerStats;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cfdview_core::{EngineError, FrameViews, Grid, Schema, SchemaLayout, SimulationEngine};
use cfdview_rendering::{ColorScale, FrameRenderer, FrameStats, RasterSurface, RenderError};

use crate::error::{SchedulerError, SchedulerResult};

/// Default target rate in ticks per second.
pub const DEFAULT_TARGET_FPS: f64 = 100.0;

/// Default number of ticks between diagnostics reports.
pub const DEFAULT_DIAGNOSTICS_PERIOD: u64 = 30;

/// Slowest accepted rate, one tick every 1000 seconds.
pub const MIN_RATE_HZ: f64 = 1e-3;

/// Fastest accepted rate.
pub const MAX_RATE_HZ: f64 = 1e6;

/// Interval of one period at `rate_hz`.
///
/// `None` unless the rate is finite and within
/// [`MIN_RATE_HZ`]`..=`[`MAX_RATE_HZ`].
#[must_use]
pub fn rate_interval(rate_hz: f64) -> Option<Duration> {
    if !(MIN_RATE_HZ..=MAX_RATE_HZ).contains(&rate_hz) {
        return None;
    }
    Duration::try_from_secs_f64(1.0 / rate_hz).ok()
}

/// Lifecycle state of a [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchedulerState {
    /// Built, not yet started.
    Idle,
    /// Ticking.
    Running,
    /// Cancelled or reached its frame cap.
    Stopped,
    /// Halted by an error. Terminal.
    Failed,
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Failed => "failed",
        })
    }
}

/// Cloneable cancellation flag.
///
/// May be triggered from any thread. The scheduler checks it at the re-arm
/// boundary, so the tick in flight always completes.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// A handle that has not been triggered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a stop.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns true once a stop has been requested.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Pacing and painting parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SchedulerSettings {
    /// Target ticks per second.
    pub target_fps: f64,
    /// Ticks between diagnostics reports.
    pub diagnostics_period: u64,
    /// Side of one painted cell in pixels.
    pub cell_size: u32,
    /// Schema the viewer expects the engine to produce.
    pub schema: Schema,
    /// Rich color calibration.
    pub color: ColorScale,
    /// Stop after this many ticks.
    pub max_frames: Option<u64>,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            diagnostics_period: DEFAULT_DIAGNOSTICS_PERIOD,
            cell_size: 3,
            schema: Schema::Rich,
            color: ColorScale::default(),
            max_frames: None,
        }
    }
}

impl SchedulerSettings {
    /// Time budget of one tick, `None` if `target_fps` is out of range.
    #[must_use]
    pub fn frame_interval(&self) -> Option<Duration> {
        rate_interval(self.target_fps)
    }

    fn validate(&self) -> SchedulerResult<Duration> {
        let Some(interval) = self.frame_interval() else {
            return Err(SchedulerError::InvalidSettings {
                reason: format!(
                    "target_fps must be within {MIN_RATE_HZ}..={MAX_RATE_HZ}, got {}",
                    self.target_fps
                ),
            });
        };
        if self.diagnostics_period == 0 {
            return Err(SchedulerError::InvalidSettings {
                reason: "diagnostics_period must be at least 1".to_owned(),
            });
        }
        Ok(interval)
    }
}

/// What one tick produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    /// Zero-based tick index.
    pub tick: u64,
    /// Paint statistics.
    pub frame: FrameStats,
    /// Diagnostics, on reporting ticks only.
    pub diagnostics: Option<DiagnosticsReport>,
}

/// Owns an engine, a surface and a sink, and ticks them in order.
pub struct Scheduler<E, S, D> {
    engine: E,
    surface: S,
    sink: D,
    renderer: FrameRenderer,
    grid: Grid,
    layout: SchemaLayout,
    settings: SchedulerSettings,
    state: SchedulerState,
    stop: StopHandle,
    stats: SchedulerStats,
}

impl<E, S, D> Scheduler<E, S, D>
where
    E: SimulationEngine,
    S: RasterSurface,
    D: DiagnosticsSink,
{
    /// Builds an idle scheduler.
    ///
    /// The engine's layout is read once here and used for every frame.
    ///
    /// # Errors
    ///
    /// - `InvalidSettings` for a rate outside `MIN_RATE_HZ..=MAX_RATE_HZ` or a
    ///   zero diagnostics period
    /// - `View` if the engine reports an empty grid
    /// - `Render` if the schema differs from the engine's, the cell size is
    ///   zero, the canvas overflows `u32`, or the surface is smaller than it
    pub fn new(engine: E, surface: S, sink: D, settings: SchedulerSettings) -> SchedulerResult<Self> {
        settings.validate()?;

        let grid = Grid::new(engine.width(), engine.height())?;
        let layout = engine.layout();
        if layout.schema() != settings.schema {
            return Err(RenderError::SchemaMismatch {
                expected: settings.schema,
                actual: layout.schema(),
            }
            .into());
        }

        let renderer = FrameRenderer::new(grid, settings.cell_size, settings.schema, settings.color)?;
        let geometry = renderer.geometry();
        if surface.width() < geometry.surface_width() || surface.height() < geometry.surface_height() {
            return Err(RenderError::SurfaceTooSmall {
                width: surface.width(),
                height: surface.height(),
                required_width: geometry.surface_width(),
                required_height: geometry.surface_height(),
            }
            .into());
        }

        Ok(Self {
            engine,
            surface,
            sink,
            renderer,
            grid,
            layout,
            settings,
            state: SchedulerState::Idle,
            stop: StopHandle::new(),
            stats: SchedulerStats::default(),
        })
    }

    /// Replaces the stop handle, so it can be shared before the
    /// scheduler exists.
    #[must_use]
    pub fn with_stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = stop;
        self
    }

    /// A handle that stops this scheduler at the next re-arm.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    /// Session statistics.
    #[must_use]
    pub const fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    /// Settings in use.
    #[must_use]
    pub const fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }

    /// The engine.
    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// The surface, holding the last painted frame.
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// The diagnostics sink.
    #[must_use]
    pub const fn sink(&self) -> &D {
        &self.sink
    }

    /// Gives back the engine, surface and sink.
    pub fn into_parts(self) -> (E, S, D) {
        (self.engine, self.surface, self.sink)
    }

    /// Moves from `Idle` to `Running`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` from any other state.
    pub fn start(&mut self) -> SchedulerResult<()> {
        if self.state != SchedulerState::Idle {
            return Err(SchedulerError::InvalidState {
                state: self.state,
                operation: "start",
            });
        }
        self.transition(SchedulerState::Running);
        Ok(())
    }

    /// Runs exactly one tick: step, paint, and diagnostics when due.
    ///
    /// Does no pacing; [`Scheduler::run`] adds that.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless running. Any engine, decode or paint
    /// error moves the scheduler to `Failed` and is returned.
    pub fn step(&mut self) -> SchedulerResult<TickReport> {
        if self.state != SchedulerState::Running {
            return Err(SchedulerError::InvalidState {
                state: self.state,
                operation: "step",
            });
        }

        match self.advance() {
            Ok(report) => Ok(report),
            Err(err) => {
                tracing::error!(tick = self.stats.total_ticks, error = %err, "scheduler halted");
                self.transition(SchedulerState::Failed);
                Err(err)
            }
        }
    }

    /// Ticks at the target rate until stopped, capped, or failed.
    ///
    /// Starts the scheduler if it is idle. Waits are deadline based: a
    /// tick that runs long shortens the next wait instead of shifting every
    /// later tick. A tick more than a whole interval behind resets the
    /// deadline rather than bursting to catch up.
    ///
    /// # Errors
    ///
    /// Returns the error that moved the scheduler to `Failed`, or
    /// `InvalidState` if it was already stopped or failed.
    pub fn run<H: FrameHost>(&mut self, host: &mut H) -> SchedulerResult<SchedulerStats> {
        if self.state == SchedulerState::Idle {
            self.start()?;
        } else if self.state != SchedulerState::Running {
            return Err(SchedulerError::InvalidState {
                state: self.state,
                operation: "run",
            });
        }

        let interval = self.settings.validate()?;
        let mut deadline = host.now();

        loop {
            if self.stop.is_stopped() || self.frame_cap_reached() {
                self.transition(SchedulerState::Stopped);
                return Ok(self.stats);
            }

            let begin = host.now();
            let report = self.step()?;
            let now = host.now();
            if self.stats.record_timing(now.saturating_sub(begin), interval) {
                tracing::debug!(tick = report.tick, budget_us = interval.as_micros() as u64, "late tick");
            }

            deadline += interval;
            if now < deadline {
                host.delay(deadline - now);
            } else if now - deadline > interval {
                deadline = now;
            }
            host.await_display_sync();
        }
    }

    fn frame_cap_reached(&self) -> bool {
        self.settings
            .max_frames
            .is_some_and(|cap| self.stats.total_ticks >= cap)
    }

    fn advance(&mut self) -> SchedulerResult<TickReport> {
        let tick = self.stats.total_ticks;

        self.engine.tick()?;
        if (self.engine.width(), self.engine.height()) != (self.grid.width(), self.grid.height()) {
            return Err(EngineError::ShapeChanged {
                expected_width: self.grid.width(),
                expected_height: self.grid.height(),
                width: self.engine.width(),
                height: self.engine.height(),
            }
            .into());
        }

        let frame = {
            let buffers = self.engine.buffers();
            let views = FrameViews::bind(&buffers, self.grid, &self.layout)?;
            self.renderer.render(&views, &mut self.surface)?
        };

        let diagnostics = if tick % self.settings.diagnostics_period == 0 {
            let report = DiagnosticsReport {
                frame: tick,
                max_divergence: self.engine.max_divergence(),
                drag_coefficient: self.engine.drag_coefficient(),
            };
            self.sink.emit(&report);
            self.stats.diagnostics_emitted += 1;
            Some(report)
        } else {
            None
        };

        self.stats.total_ticks += 1;
        Ok(TickReport {
            tick,
            frame,
            diagnostics,
        })
    }

    fn transition(&mut self, next: SchedulerState) {
        tracing::info!(from = %self.state, to = %next, ticks = self.stats.total_ticks, "scheduler state");
        self.state = next;
    }
}

impl<E, S, D> fmt::Debug for Scheduler<E, S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("grid", &self.grid)
            .field("state", &self.state)
            .field("settings", &self.settings)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
