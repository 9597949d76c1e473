//! # ECS Error Types
//!
//! All errors that can occur in the entity-component store.
//!
//! Capacity exhaustion and invalid lookups are caller-visible results, not
//! panics: the store runs inside a real-time loop that cannot tolerate
//! process termination on a single bad operation.

use thiserror::Error;

use super::component::ComponentKind;
use super::entity::EntityId;

/// Errors that can occur in the entity-component store.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcsError {
    /// The entity table is at capacity; no further entities can be created.
    #[error("entity table full: capacity {capacity}")]
    EntityTableFull {
        /// Fixed entity capacity configured at world creation.
        capacity: usize,
    },

    /// A component pool is at capacity; no further components can be added.
    #[error("{kind} pool full: capacity {capacity}")]
    PoolFull {
        /// Which pool refused the insertion.
        kind: ComponentKind,
        /// The pool's fixed capacity.
        capacity: usize,
    },

    /// The entity does not carry the requested component type.
    #[error("entity {entity} does not carry a {kind} component")]
    ComponentAbsent {
        /// The entity that was queried.
        entity: EntityId,
        /// The component type it does not carry.
        kind: ComponentKind,
    },

    /// A pool index points past the pool's live range.
    #[error("{kind} pool index {index} out of bounds: len {len}")]
    PoolIndexOutOfBounds {
        /// Which pool was indexed.
        kind: ComponentKind,
        /// The offending index.
        index: usize,
        /// Number of live components in the pool.
        len: usize,
    },

    /// No entity with this identity exists in the table.
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),
}

/// Result type for ECS operations.
pub type EcsResult<T> = Result<T, EcsError>;
