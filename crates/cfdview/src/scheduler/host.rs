//! # Frame Hosts
//!
//! The scheduler never reads a clock or sleeps on its own. A host gives it
//! monotonic time, a coarse delay, and the display-sync wait that ends
//! every tick.
//!
//! ```text
//! ThreadHost  ── Instant + thread::sleep, optional emulated refresh
//! ManualHost  ── simulated time, advanced only by delay / sync / tests
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Time and pacing primitives supplied by the embedding environment.
pub trait FrameHost {
    /// Monotonic time since the host was created.
    fn now(&self) -> Duration;

    /// Suspends for roughly `duration`. Advisory: may overshoot.
    fn delay(&mut self, duration: Duration);

    /// Waits for the next display refresh.
    fn await_display_sync(&mut self);
}

/// Next multiple of `period` strictly after `now`.
fn next_boundary(now: Duration, period: Duration) -> Duration {
    let period_ns = period.as_nanos().max(1);
    let boundaries = now.as_nanos() / period_ns + 1;
    Duration::from_nanos((boundaries * period_ns) as u64)
}

// ============================================================================
// THREAD HOST
// ============================================================================

/// Wall-clock host for headless and native runs.
#[derive(Debug)]
pub struct ThreadHost {
    origin: Instant,
    refresh: Option<Duration>,
}

impl ThreadHost {
    /// A host whose display sync returns immediately.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            refresh: None,
        }
    }

    /// A host that emulates a display refreshing every `refresh`.
    #[must_use]
    pub fn with_refresh(refresh: Duration) -> Self {
        Self {
            origin: Instant::now(),
            refresh: Some(refresh),
        }
    }

    /// Emulated refresh interval, if any.
    #[must_use]
    pub const fn refresh(&self) -> Option<Duration> {
        self.refresh
    }
}

impl Default for ThreadHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameHost for ThreadHost {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn delay(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }

    fn await_display_sync(&mut self) {
        if let Some(refresh) = self.refresh {
            let now = self.now();
            let target = next_boundary(now, refresh);
            std::thread::sleep(target.saturating_sub(now));
        }
    }
}

// ============================================================================
// MANUAL HOST
// ============================================================================

/// Shared simulated clock.
///
/// Cloning shares the same time, so a fake engine can charge its own work
/// to the clock the scheduler reads.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// A clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time.
    #[must_use]
    pub fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Acquire))
    }

    /// Moves time forward by `duration`.
    pub fn advance(&self, duration: Duration) {
        self.nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::AcqRel);
    }

    fn set(&self, time: Duration) {
        self.nanos.store(time.as_nanos() as u64, Ordering::Release);
    }
}

/// Deterministic host over a [`ManualClock`].
///
/// `delay` advances time by exactly the requested amount. Display sync
/// jumps to the next refresh boundary, or does nothing without a refresh.
#[derive(Clone, Debug, Default)]
pub struct ManualHost {
    clock: ManualClock,
    refresh: Option<Duration>,
    delays: u64,
    syncs: u64,
}

impl ManualHost {
    /// A host with no display refresh.
    #[must_use]
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    /// A host with a display refreshing every `refresh`.
    #[must_use]
    pub fn with_refresh(clock: ManualClock, refresh: Duration) -> Self {
        Self {
            clock,
            refresh: Some(refresh),
            ..Self::default()
        }
    }

    /// The shared clock.
    #[must_use]
    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Number of non-zero delays requested.
    #[must_use]
    pub const fn delays(&self) -> u64 {
        self.delays
    }

    /// Number of display-sync waits.
    #[must_use]
    pub const fn syncs(&self) -> u64 {
        self.syncs
    }
}

impl FrameHost for ManualHost {
    fn now(&self) -> Duration {
        self.clock.now()
    }

    fn delay(&mut self, duration: Duration) {
        if !duration.is_zero() {
            self.delays += 1;
            self.clock.advance(duration);
        }
    }

    fn await_display_sync(&mut self) {
        self.syncs += 1;
        if let Some(refresh) = self.refresh {
            self.clock.set(next_boundary(self.clock.now(), refresh));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_boundary_is_strictly_later() {
        let period = Duration::from_millis(10);
        assert_eq!(next_boundary(Duration::ZERO, period), period);
        assert_eq!(next_boundary(Duration::from_millis(10), period), Duration::from_millis(20));
        assert_eq!(next_boundary(Duration::from_millis(13), period), Duration::from_millis(20));
    }

    #[test]
    fn test_manual_host_delay_and_sync() {
        let clock = ManualClock::new();
        let mut host = ManualHost::with_refresh(clock.clone(), Duration::from_millis(16));

        host.delay(Duration::from_millis(5));
        assert_eq!(host.now(), Duration::from_millis(5));
        host.await_display_sync();
        assert_eq!(host.now(), Duration::from_millis(16));

        clock.advance(Duration::from_millis(1));
        assert_eq!(host.now(), Duration::from_millis(17));
        host.delay(Duration::ZERO);
        assert_eq!((host.delays(), host.syncs()), (1, 1));
    }

    #[test]
    fn test_manual_host_shares_clock() {
        let clock = ManualClock::new();
        let mut host = ManualHost::new(clock.clone());
        host.clock().advance(Duration::from_millis(3));
        assert_eq!(clock.now(), Duration::from_millis(3));
        host.delay(Duration::from_millis(2));
        assert_eq!(clock.now(), Duration::from_millis(5));
        assert_eq!(host.clock().now(), host.now());
    }

    #[test]
    fn test_manual_host_without_refresh() {
        let mut host = ManualHost::new(ManualClock::new());
        host.await_display_sync();
        assert_eq!(host.now(), Duration::ZERO);
    }

    #[test]
    fn test_thread_host_is_monotonic() {
        let mut host = ThreadHost::new();
        let before = host.now();
        host.delay(Duration::from_millis(2));
        host.await_display_sync();
        assert!(host.now() >= before + Duration::from_millis(2));
    }
}
