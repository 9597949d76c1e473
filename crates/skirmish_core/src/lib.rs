//! # Skirmish Core Engine
//!
//! Entity-component store with a companion uniform spatial grid, designed
//! for a real-time simulation loop:
//! - All storage is pre-allocated at world creation
//! - Capacity exhaustion is a reported error, never silent overflow
//! - The grid keeps cell membership consistent as entities move
//!
//! ## Tick contract
//!
//! Within one tick the embedding must run, in order:
//!
//! 1. [`World::snapshot_previous_positions`]
//! 2. [`World::integrate`] (or any custom integrator)
//! 3. [`SpatialGrid::update`]
//! 4. selection, via [`select::select_within_region`]
//!
//! Migration detection compares previous and current cell, so reordering
//! steps 1-3 breaks the grid.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod ecs;
pub mod grid;
pub mod select;

pub use ecs::{
    Component, ComponentKind, ComponentMap, ComponentPool, EcsError, EcsResult, Entity, EntityId,
    PoolIndex, Selectable, Sprite, Transform, World, COMPONENT_TYPE_COUNT, UNIT_MASK,
};
pub use grid::{Cell, CellWindow, GridError, GridResult, GridUpdateStats, SpatialGrid};
pub use select::{select_within_region, select_within_world_region, ScreenToWorld};
