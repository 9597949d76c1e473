//! # Entity Component System
//!
//! A pre-allocated ECS built around dense, append-only component pools.
//!
//! ## Design Philosophy
//!
//! - One pool per component type, owned by the [`World`] - no global state
//! - Entities hold a bitmask plus per-type pool indices, never the data
//! - Identities are dense and never recycled
//! - Every capacity boundary reports an error instead of overflowing

mod component;
mod entity;
mod error;
mod pool;
mod world;

pub use component::{Component, ComponentKind, Selectable, Sprite, Transform, COMPONENT_TYPE_COUNT};
pub use entity::{ComponentMap, Entity, EntityId};
pub use error::{EcsError, EcsResult};
pub use pool::{ComponentPool, PoolIndex};
pub use world::{World, UNIT_MASK};
