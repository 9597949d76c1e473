//! # Skirmish Shared
//!
//! Math types and canonical constants used by both the simulation core and
//! its embedding.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - Any GPU or window-related crate
//! - The simulation core itself
//!
//! If you need engine types, put them in `skirmish_core`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use constants::{
    DEFAULT_CELL_ENT_CAP, DEFAULT_REFRESH_RATE, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
    SELECT_RADIUS, TICK_RATE, VIRTUAL_HEIGHT, VIRTUAL_WIDTH,
};
pub use math::{Rect, Vec2};
