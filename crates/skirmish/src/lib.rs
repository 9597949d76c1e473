//! # Skirmish
//!
//! The embedding around `skirmish_core`: configuration, the camera's
//! screen-to-world transform, drag-selection tracking, and the
//! fixed-timestep simulation loop.
//!
//! ## Tick orchestration
//!
//! ```text
//! Tick N:
//! ┌────────────────────────────────────────────────────────┐
//! │ 1. SNAPSHOT   previous positions (all transforms)      │
//! │ 2. INTEGRATE  position += velocity * dt                │
//! │ 3. MIGRATE    grid buckets follow the new positions    │
//! │ 4. SELECT     pending drag region, if one was released │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! The order is load-bearing: migration compares previous and current
//! cells, so the snapshot must cover every transform before integration,
//! and the grid must update after integration but before selection reads
//! cell membership.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod camera;
pub mod config;
pub mod pacing;
pub mod sim;
pub mod tracker;

pub use camera::Camera;
pub use config::{AutoOr, ConfigError, SimConfig};
pub use pacing::{TickLoop, TickStats};
pub use sim::{FrameReport, Simulation};
pub use tracker::DragTracker;
