//! # Uniform Spatial Grid
//!
//! A queryable index from grid cell to the entities currently inside it.
//!
//! ## Consistency contract
//!
//! An entity with a transform appears in at most one cell, and - outside
//! the documented skip cases - that cell is the one computed from its
//! current position. [`SpatialGrid::update`] maintains this incrementally
//! each tick by migrating entity IDs between cell buckets; it must run
//! after the world has snapshotted previous positions and integrated, and
//! never concurrently with either.
//!
//! ## Skip cases (deliberate staleness)
//!
//! - A position mapping outside the indexable cell range is not an error:
//!   the migration is skipped and the old bucket membership stays.
//! - A full destination cell refuses the migration the same way.

mod cell;
mod spatial;

pub use cell::Cell;
pub use spatial::{CellWindow, GridError, GridResult, GridUpdateStats, SpatialGrid};
