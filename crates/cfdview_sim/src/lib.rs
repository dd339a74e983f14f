//! # CFDVIEW Sim
//!
//! Reference engine for the viewer: incompressible flow past a cylinder
//! in a 2-D channel.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       CHANNEL FLOW                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  inlet (parabolic) →  ░░░░░░░ ● ░░░░░░░  → outlet            │
//! │                            cylinder                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  cells:    Vec<Cell>  (16-byte rich records)                 │
//! │  pressure: Vec<f32>                                          │
//! │  obstacle: Vec<u8>                                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! All three arrays are lent to the viewer as byte slices through
//! [`cfdview_core::SimulationEngine::buffers`].

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cell;
pub mod config;
pub mod flow;

pub use cell::Cell;
pub use config::SimConfig;
pub use flow::ChannelFlow;
