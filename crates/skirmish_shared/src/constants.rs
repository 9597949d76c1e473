//! # Simulation Constants
//!
//! Canonical values shared by the core and the embedding.
//!
//! **CRITICAL:** The virtual resolution is baked into every coordinate
//! transform. Changing it changes what "screen space" means everywhere.

/// Render target width in virtual pixels. All screen-space coordinates are
/// expressed against this resolution, not the physical window size.
pub const VIRTUAL_WIDTH: f32 = 1920.0;

/// Render target height in virtual pixels.
pub const VIRTUAL_HEIGHT: f32 = 1080.0;

/// Simulation tick rate (updates per second).
pub const TICK_RATE: u32 = 60;

/// Selection hitbox radius in world units. Every selectable unit is treated
/// as a circle of this radius when tested against the selection box.
pub const SELECT_RADIUS: f32 = 10.0;

/// Default window width when the config file is missing or says `auto`
/// without a monitor to query.
pub const DEFAULT_WINDOW_WIDTH: u32 = 1920;

/// Default window height.
pub const DEFAULT_WINDOW_HEIGHT: u32 = 1080;

/// Default refresh rate in Hz.
pub const DEFAULT_REFRESH_RATE: f32 = 60.0;

/// Default per-cell entity capacity for the spatial grid.
pub const DEFAULT_CELL_ENT_CAP: usize = 16;
