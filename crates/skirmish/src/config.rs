//! # Simulation Configuration
//!
//! Options read once at startup from a TOML file. A missing or malformed
//! file is not fatal: the simulation falls back to defaults and logs what
//! happened, so a bad install never refuses to start.
//!
//! Resolution-like options accept the literal string `"auto"` to mean
//! "query the environment" (monitor size, monitor refresh rate); resolving
//! `auto` is the embedding's job, since only it can see the monitor.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use skirmish_shared::{
    DEFAULT_CELL_ENT_CAP, DEFAULT_REFRESH_RATE, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
};

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("could not read configuration file {path}: {source}")]
    Io {
        /// The path that was attempted.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML or has ill-typed values.
    #[error("could not parse configuration file {path}: {source}")]
    Parse {
        /// The path that was attempted.
        path: String,
        /// The underlying TOML error.
        source: toml::de::Error,
    },
}

/// A value that is either the literal string `auto` or a concrete `T`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AutoOr<T> {
    /// Query the environment at startup.
    Auto(AutoKeyword),
    /// Use this value as given.
    Value(T),
}

/// The literal `auto` keyword.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub enum AutoKeyword {
    /// The only spelling accepted.
    #[serde(rename = "auto")]
    Auto,
}

impl<T> AutoOr<T> {
    /// Resolves to the concrete value, substituting `fallback` for `auto`.
    pub fn resolve(self, fallback: T) -> T {
        match self {
            Self::Auto(_) => fallback,
            Self::Value(v) => v,
        }
    }
}

impl<T> Default for AutoOr<T> {
    fn default() -> Self {
        Self::Auto(AutoKeyword::Auto)
    }
}

/// Simulation options.
///
/// Every key is optional in the file; missing keys take the defaults below.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Window width in pixels, or `auto` for the monitor width.
    pub window_width: AutoOr<u32>,
    /// Window height in pixels, or `auto` for the monitor height.
    pub window_height: AutoOr<u32>,
    /// Refresh rate in Hz, or `auto` for the monitor rate.
    pub refresh_rate: AutoOr<f32>,
    /// Per-cell entity capacity for the spatial grid.
    pub cell_ent_cap: usize,
    /// Draw the spatial grid overlay.
    pub debug_show_grid: bool,
    /// Draw collision/hitbox overlays.
    pub debug_show_colliders: bool,
    /// World-space X offset where the grid is drawn from.
    pub grid_offset_x: f32,
    /// World-space Y offset where the grid is drawn from.
    pub grid_offset_y: f32,
    /// Level file to load, for testing purposes.
    pub level_path: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            window_width: AutoOr::Value(DEFAULT_WINDOW_WIDTH),
            window_height: AutoOr::Value(DEFAULT_WINDOW_HEIGHT),
            refresh_rate: AutoOr::Value(DEFAULT_REFRESH_RATE),
            cell_ent_cap: DEFAULT_CELL_ENT_CAP,
            debug_show_grid: false,
            debug_show_colliders: false,
            grid_offset_x: 0.0,
            grid_offset_y: 0.0,
            level_path: String::from("level.lvl"),
        }
    }
}

impl SimConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] when the file cannot be read,
    /// [`ConfigError::Parse`] when it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Loads configuration, falling back to defaults on any error.
    ///
    /// The fallback is logged, mirroring how a desktop install behaves when
    /// its options file was deleted.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(%err, "falling back to default configuration");
                Self::default()
            }
        }
    }
}
