//! # Scheduler Integration Tests
//!
//! Drives the scheduler over simulated time with fake engines:
//! - Tick cadence against the target rate
//! - Diagnostics cadence
//! - Failure halts painting and diagnostics
//! - Cancellation from another thread

use std::time::Duration;

use cfdview::{
    ChannelSink, DiagnosticsSink, ManualClock, ManualHost, Scheduler, SchedulerError,
    SchedulerSettings, SchedulerState, StopHandle, ThreadHost, VecSink,
};
use cfdview_core::{
    EngineBuffers, EngineError, EngineResult, LegacyLayout, Region, Schema, SchemaLayout,
    SimulationEngine,
};
use cfdview_rendering::{PixelBuffer, RasterSurface, Rgb};
use cfdview_sim::{ChannelFlow, SimConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 3x2 legacy engine that charges simulated work to a shared clock.
struct FakeEngine {
    cells: Vec<u8>,
    clock: ManualClock,
    rng: StdRng,
    max_work: Duration,
    stop_after: Option<(Duration, StopHandle)>,
    fail_on_tick: Option<u64>,
    ticks: u64,
}

impl FakeEngine {
    fn new(clock: ManualClock) -> Self {
        Self {
            cells: vec![0; 6 * 6],
            clock,
            rng: StdRng::seed_from_u64(99),
            max_work: Duration::ZERO,
            stop_after: None,
            fail_on_tick: None,
            ticks: 0,
        }
    }
}

impl SimulationEngine for FakeEngine {
    fn width(&self) -> u32 {
        3
    }

    fn height(&self) -> u32 {
        2
    }

    fn layout(&self) -> SchemaLayout {
        SchemaLayout::Legacy(LegacyLayout::STANDARD)
    }

    fn tick(&mut self) -> EngineResult<()> {
        let index = self.ticks;
        self.ticks += 1;
        if self.fail_on_tick == Some(index) {
            return Err(EngineError::StepFailed {
                reason: format!("solver diverged on tick {index}"),
            });
        }

        if let Some((limit, stop)) = &self.stop_after {
            if self.clock.now() >= *limit {
                stop.stop();
            }
        }
        if !self.max_work.is_zero() {
            let work_ns = self.rng.gen_range(0..self.max_work.as_nanos() as u64);
            self.clock.advance(Duration::from_nanos(work_ns));
        }

        for record in self.cells.chunks_mut(6) {
            record[0] = 1;
            record[1] = (index % 50) as u8;
        }
        Ok(())
    }

    fn buffers(&self) -> EngineBuffers<'_> {
        EngineBuffers::legacy(Region::whole(&self.cells))
    }

    fn max_divergence(&self) -> f32 {
        self.ticks as f32
    }

    fn drag_coefficient(&self) -> f32 {
        1.5
    }
}

/// Surface that counts fills and brackets.
#[derive(Default)]
struct CountingSurface {
    fills: u64,
    frames: u64,
}

impl RasterSurface for CountingSurface {
    fn width(&self) -> u32 {
        64
    }

    fn height(&self) -> u32 {
        64
    }

    fn set_fill_color(&mut self, _color: Rgb) {}

    fn set_stroke_color(&mut self, _color: Rgb) {}

    fn fill_rect(&mut self, _x: u32, _y: u32, _width: u32, _height: u32) {
        self.fills += 1;
    }

    fn begin_path(&mut self) {}

    fn stroke(&mut self) {
        self.frames += 1;
    }
}

fn settings(target_fps: f64) -> SchedulerSettings {
    SchedulerSettings {
        target_fps,
        schema: Schema::Legacy,
        cell_size: 2,
        ..SchedulerSettings::default()
    }
}

fn run_for<D: DiagnosticsSink>(
    target_fps: f64,
    duration: Duration,
    max_work: Duration,
    refresh: Option<Duration>,
    sink: D,
) -> (u64, Scheduler<FakeEngine, CountingSurface, D>) {
    let clock = ManualClock::new();
    let stop = StopHandle::new();
    let mut engine = FakeEngine::new(clock.clone());
    engine.max_work = max_work;
    engine.stop_after = Some((duration, stop.clone()));

    let mut scheduler = Scheduler::new(engine, CountingSurface::default(), sink, settings(target_fps))
        .unwrap()
        .with_stop_handle(stop);
    let mut host = match refresh {
        Some(refresh) => ManualHost::with_refresh(clock, refresh),
        None => ManualHost::new(clock),
    };
    let stats = scheduler.run(&mut host).unwrap();
    assert_eq!(scheduler.state(), SchedulerState::Stopped);
    (stats.total_ticks, scheduler)
}

/// Test: tick count stays within one of F * duration despite per-tick jitter.
#[test]
fn test_tick_cadence_matches_target_rate() {
    for (fps, seconds) in [(100.0, 2.0), (60.0, 3.0), (25.0, 4.0)] {
        let interval = Duration::from_secs_f64(1.0 / fps);
        let (ticks, scheduler) = run_for(
            fps,
            Duration::from_secs_f64(seconds),
            interval.mul_f64(0.9),
            None,
            VecSink::new(),
        );

        // The tick that observes the end of the window still runs.
        let in_window = ticks - 1;
        let expected = fps * seconds;
        assert!(
            (in_window as f64 - expected).abs() <= 1.0,
            "{fps} fps over {seconds}s: {in_window} ticks, expected {expected}"
        );
        assert_eq!(scheduler.stats().late_ticks, 0);
        assert_eq!(scheduler.surface().frames, ticks);
        assert_eq!(scheduler.surface().fills, ticks * 6);
    }
}

/// Test: a display refreshing slower than the target rate caps the tick rate.
#[test]
fn test_display_sync_caps_rate() {
    let (ticks, _) = run_for(
        100.0,
        Duration::from_secs(1),
        Duration::ZERO,
        Some(Duration::from_secs_f64(1.0 / 60.0)),
        VecSink::new(),
    );
    assert!(ticks <= 62, "{ticks} ticks at 60 Hz");
    assert!(ticks >= 55, "{ticks} ticks at 60 Hz");
}

/// Test: a tick that overruns its budget is counted late and the loop keeps pace afterwards.
#[test]
fn test_late_ticks_counted() {
    let (ticks, scheduler) = run_for(
        100.0,
        Duration::from_secs(1),
        Duration::from_millis(25),
        None,
        VecSink::new(),
    );
    assert!(scheduler.stats().late_ticks > 0);
    assert!(ticks < 100);
    assert!(scheduler.stats().max_tick_us > 10_000);
}

/// Test: diagnostics are emitted on ticks 0, 30, 60, ... and nowhere else.
#[test]
fn test_diagnostics_cadence() {
    let mut scheduler = Scheduler::new(
        FakeEngine::new(ManualClock::new()),
        CountingSurface::default(),
        VecSink::new(),
        settings(100.0),
    )
    .unwrap();
    scheduler.start().unwrap();

    let mut reporting_ticks = Vec::new();
    for _ in 0..95 {
        let report = scheduler.step().unwrap();
        if let Some(diagnostics) = report.diagnostics {
            assert_eq!(diagnostics.frame, report.tick);
            reporting_ticks.push(report.tick);
        }
    }

    assert_eq!(reporting_ticks, vec![0, 30, 60, 90]);
    assert_eq!(scheduler.sink().frames(), vec![0, 30, 60, 90]);
    assert_eq!(scheduler.stats().diagnostics_emitted, 4);
    let first = scheduler.sink().reports()[0];
    assert_eq!(first.max_divergence, 1.0);
    assert_eq!(first.drag_coefficient, 1.5);
}

/// Test: diagnostics reach another thread through a channel sink.
#[test]
fn test_channel_sink_under_run() {
    let (sink, receiver) = ChannelSink::new(16);
    let (ticks, scheduler) = run_for(100.0, Duration::from_secs(1), Duration::ZERO, None, sink);

    let frames: Vec<u64> = receiver.try_iter().map(|report| report.frame).collect();
    assert_eq!(ticks, 101);
    assert_eq!(frames, vec![0, 30, 60, 90]);
    assert_eq!(scheduler.sink().dropped(), 0);
}

/// Test: an engine failure moves to Failed; nothing is painted or emitted afterwards.
#[test]
fn test_engine_failure_halts_session() {
    let clock = ManualClock::new();
    let mut engine = FakeEngine::new(clock.clone());
    engine.fail_on_tick = Some(31);

    let mut scheduler =
        Scheduler::new(engine, CountingSurface::default(), VecSink::new(), settings(100.0)).unwrap();
    let mut host = ManualHost::new(clock);
    let err = scheduler.run(&mut host).unwrap_err();

    assert!(matches!(err, SchedulerError::Engine(EngineError::StepFailed { .. })));
    assert_eq!(scheduler.state(), SchedulerState::Failed);
    assert_eq!(scheduler.stats().total_ticks, 31);
    assert_eq!(scheduler.surface().frames, 31);
    assert_eq!(scheduler.sink().frames(), vec![0, 30]);

    assert!(matches!(
        scheduler.step(),
        Err(SchedulerError::InvalidState { state: SchedulerState::Failed, .. })
    ));
    assert!(scheduler.run(&mut host).is_err());
    assert_eq!(scheduler.surface().frames, 31);
    assert_eq!(scheduler.sink().frames(), vec![0, 30]);
}

/// Engine whose buffers are shorter than its grid claims.
struct TruncatedEngine {
    cells: Vec<u8>,
}

impl SimulationEngine for TruncatedEngine {
    fn width(&self) -> u32 {
        4
    }

    fn height(&self) -> u32 {
        4
    }

    fn layout(&self) -> SchemaLayout {
        SchemaLayout::Legacy(LegacyLayout::STANDARD)
    }

    fn tick(&mut self) -> EngineResult<()> {
        Ok(())
    }

    fn buffers(&self) -> EngineBuffers<'_> {
        EngineBuffers::legacy(Region::whole(&self.cells))
    }

    fn max_divergence(&self) -> f32 {
        0.0
    }

    fn drag_coefficient(&self) -> f32 {
        0.0
    }
}

/// Test: a region sized with the legacy producer's 5-byte figure fails the first tick.
#[test]
fn test_inconsistent_buffers_fail() {
    let cells = vec![0u8; LegacyLayout::STANDARD.producer_region_len(16)];
    let mut scheduler = Scheduler::new(
        TruncatedEngine { cells },
        CountingSurface::default(),
        VecSink::new(),
        settings(100.0),
    )
    .unwrap();
    scheduler.start().unwrap();

    let err = scheduler.step().unwrap_err();
    assert!(matches!(err, SchedulerError::View(_)));
    assert_eq!(scheduler.state(), SchedulerState::Failed);
    assert_eq!(scheduler.surface().fills, 0);
    assert!(scheduler.sink().reports().is_empty());
}

/// Test: a stop requested from another thread ends a wall-clock run.
#[test]
fn test_stop_from_another_thread() {
    let engine = ChannelFlow::new(SimConfig {
        width: 16,
        height: 16,
        obstacle_radius: 2.0,
        obstacle_offset: 0.0,
        ..SimConfig::default()
    })
    .unwrap();
    let surface = PixelBuffer::new(65, 65, Rgb::WHITE);
    let mut scheduler = Scheduler::new(
        engine,
        surface,
        VecSink::new(),
        SchedulerSettings {
            target_fps: 200.0,
            ..SchedulerSettings::default()
        },
    )
    .unwrap();

    let stop = scheduler.stop_handle();
    let stopper = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        stop.stop();
    });

    let stats = scheduler.run(&mut ThreadHost::new()).unwrap();
    stopper.join().unwrap();

    assert_eq!(scheduler.state(), SchedulerState::Stopped);
    assert!(stats.total_ticks > 0);
    assert_eq!(scheduler.engine().ticks(), stats.total_ticks);
    assert_ne!(scheduler.surface().pixel(1, 1), Some(Rgb::WHITE));
}
