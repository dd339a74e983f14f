//! Tick timing statistics.

use std::time::Duration;

/// Counters and timings for a scheduler session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Ticks completed (engine stepped and frame painted).
    pub total_ticks: u64,
    /// Ticks whose work took longer than the frame interval.
    pub late_ticks: u64,
    /// Fastest timed tick in microseconds, `u64::MAX` before the first.
    pub min_tick_us: u64,
    /// Slowest timed tick in microseconds.
    pub max_tick_us: u64,
    /// Rolling average tick time in microseconds.
    pub avg_tick_us: u64,
    /// Diagnostics reports emitted.
    pub diagnostics_emitted: u64,
}

impl Default for SchedulerStats {
    fn default() -> Self {
        Self {
            total_ticks: 0,
            late_ticks: 0,
            min_tick_us: u64::MAX,
            max_tick_us: 0,
            avg_tick_us: 0,
            diagnostics_emitted: 0,
        }
    }
}

impl SchedulerStats {
    /// Records the wall time of one tick against the frame `budget`.
    ///
    /// Returns true if the tick was late.
    pub fn record_timing(&mut self, work: Duration, budget: Duration) -> bool {
        let work_us = work.as_micros() as u64;
        let first = self.min_tick_us == u64::MAX;

        self.min_tick_us = self.min_tick_us.min(work_us);
        self.max_tick_us = self.max_tick_us.max(work_us);
        self.avg_tick_us = if first {
            work_us
        } else {
            (self.avg_tick_us * 15 + work_us) / 16
        };

        let late = work > budget;
        if late {
            self.late_ticks += 1;
        }
        late
    }
}
