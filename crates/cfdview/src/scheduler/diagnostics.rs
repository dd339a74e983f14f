//! # Diagnostics
//!
//! Every `diagnostics_period` ticks the scheduler asks the engine for its
//! divergence and drag figures and hands them to a sink. The figures are
//! informational only; nothing downstream depends on them.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Engine scalars sampled on one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiagnosticsReport {
    /// Zero-based tick index.
    pub frame: u64,
    /// Largest local divergence magnitude.
    pub max_divergence: f32,
    /// Drag coefficient on the obstacle.
    pub drag_coefficient: f32,
}

/// Destination for diagnostics reports.
pub trait DiagnosticsSink {
    /// Receives one report.
    fn emit(&mut self, report: &DiagnosticsReport);
}

/// Logs each report at `info`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn emit(&mut self, report: &DiagnosticsReport) {
        tracing::info!(
            frame = report.frame,
            max_divergence = report.max_divergence,
            drag_coefficient = report.drag_coefficient,
            "diagnostics"
        );
    }
}

/// Keeps every report in memory.
#[derive(Clone, Debug, Default)]
pub struct VecSink {
    reports: Vec<DiagnosticsReport>,
}

impl VecSink {
    /// An empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports received so far, oldest first.
    #[must_use]
    pub fn reports(&self) -> &[DiagnosticsReport] {
        &self.reports
    }

    /// Frame indices of the reports received so far.
    #[must_use]
    pub fn frames(&self) -> Vec<u64> {
        self.reports.iter().map(|report| report.frame).collect()
    }
}

impl DiagnosticsSink for VecSink {
    fn emit(&mut self, report: &DiagnosticsReport) {
        self.reports.push(*report);
    }
}

/// Forwards reports over a bounded channel.
///
/// Never blocks the tick: when the channel is full the report is dropped
/// and counted.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    sender: Sender<DiagnosticsReport>,
    dropped: u64,
}

impl ChannelSink {
    /// Creates a sink and the receiver that drains it.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, Receiver<DiagnosticsReport>) {
        let (sender, receiver) = bounded(capacity);
        (Self { sender, dropped: 0 }, receiver)
    }

    /// Reports dropped because the channel was full or closed.
    #[must_use]
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl DiagnosticsSink for ChannelSink {
    fn emit(&mut self, report: &DiagnosticsReport) {
        match self.sender.try_send(*report) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                tracing::warn!(frame = report.frame, "diagnostics channel full, report dropped");
            }
            Err(TrySendError::Disconnected(_)) => {
                self.dropped += 1;
            }
        }
    }
}

impl<S: DiagnosticsSink + ?Sized> DiagnosticsSink for Box<S> {
    fn emit(&mut self, report: &DiagnosticsReport) {
        (**self).emit(report);
    }
}
