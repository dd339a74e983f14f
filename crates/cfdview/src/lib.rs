//! # CFDVIEW
//!
//! Frame-paced viewer for grid-based flow solvers.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   tick()    ┌───────────────────────────────────┐
//! │  Simulation  │◄────────────│             Scheduler             │
//! │    Engine    │  buffers()  │  Idle → Running → Stopped/Failed  │
//! │ (ChannelFlow)│────────────►│                                   │
//! └──────────────┘             └──┬──────────────┬──────────────┬──┘
//!                                 │ FrameViews   │ reports      │ now/delay/sync
//!                                 ▼              ▼              ▼
//!                          ┌─────────────┐ ┌───────────┐ ┌───────────┐
//!                          │FrameRenderer│ │Diagnostics│ │ FrameHost │
//!                          │ → Surface   │ │   Sink    │ │           │
//!                          └─────────────┘ └───────────┘ └───────────┘
//! ```
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let config = ViewerConfig::load("cfdview.toml")?;
//! let engine = ChannelFlow::new(config.engine.clone())?;
//! let mut scheduler = Scheduler::new(engine, surface, TracingSink, config.scheduler_settings())?;
//! scheduler.run(&mut ThreadHost::new())?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod scheduler;

pub use config::ViewerConfig;
pub use error::{ConfigError, ConfigResult, SchedulerError, SchedulerResult};
pub use scheduler::{
    ChannelSink, DiagnosticsReport, DiagnosticsSink, FrameHost, ManualClock, ManualHost, Scheduler,
    SchedulerSettings, SchedulerState, SchedulerStats, StopHandle, ThreadHost, TickReport,
    TracingSink, VecSink,
};
