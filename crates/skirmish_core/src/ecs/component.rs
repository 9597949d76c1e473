//! # Component System
//!
//! Components are pure data containers with no behavior.
//! They must be Copy and have a fixed size for pre-allocated storage.

use bytemuck::{Pod, Zeroable};
use skirmish_shared::Vec2;

/// Number of registered component types.
///
/// The active-component bitmask is a `u32`, so up to 32 types fit without
/// widening it; this constant sizes the per-entity mapping table.
pub const COMPONENT_TYPE_COUNT: usize = 3;

/// Closed set of component types.
///
/// Each kind owns one bit of the entity bitmask and one pool in the
/// [`World`](super::World). Adding a type means adding a variant here and
/// one arm in the world's attach routine - there is no other dispatch site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ComponentKind {
    /// Position, velocity, scale, rotation (plus previous position).
    Transform = 0,
    /// Presentation payload read by a renderer.
    Sprite = 1,
    /// Selection status mutated by the selection helper.
    Selectable = 2,
}

impl ComponentKind {
    /// All registered kinds, in bit order.
    pub const ALL: [Self; COMPONENT_TYPE_COUNT] = [Self::Transform, Self::Sprite, Self::Selectable];

    /// Bitmask with only this kind's bit set.
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// Slot of this kind in per-entity mapping tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name, used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Transform => "transform",
            Self::Sprite => "sprite",
            Self::Selectable => "selectable",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Marker trait for ECS components.
///
/// Components must be:
/// - `Copy`: No heap allocations, bitwise copyable
/// - `Pod` / `Zeroable`: Plain old data, safe to pre-allocate zeroed
/// - `Default`: Must have a default value for pool reservation
pub trait Component: Copy + Pod + Zeroable + Default + Send + Sync + 'static {
    /// Which [`ComponentKind`] this type registers as.
    const KIND: ComponentKind;
}

/// Spatial state of an entity.
///
/// `prev_position` is the previous-tick snapshot the grid compares against
/// to detect cell migration; the world refreshes it for every transform at
/// the start of a tick, before any integration runs.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Transform {
    /// Position in world units.
    pub position: Vec2,
    /// Position at the previous tick.
    pub prev_position: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Scale factor per axis.
    pub scale: Vec2,
    /// Rotation in degrees.
    pub rotation: f32,
}

impl Component for Transform {
    const KIND: ComponentKind = ComponentKind::Transform;
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            prev_position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
        }
    }
}

impl Transform {
    /// Creates a transform at rest at `position`.
    ///
    /// `prev_position` starts equal to `position` so a freshly spawned
    /// entity reads as "not moved this tick".
    #[must_use]
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            prev_position: position,
            ..Self::default()
        }
    }
}

/// Presentation payload.
///
/// Read by a renderer, untouched by the core's algorithms.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Sprite {
    /// Current animation frame.
    pub frame: u16,
    /// Which sprite sheet entry to draw.
    pub sprite_id: u16,
    /// Draw rotation in degrees, independent of the transform's.
    pub rotation: f32,
    /// Draw flags (flip, recolor, ...), interpreted by the renderer.
    pub flags: u8,
    /// Explicit padding so the struct has no implicit bytes.
    pub _padding: [u8; 3],
}

impl Component for Sprite {
    const KIND: ComponentKind = ComponentKind::Sprite;
}

/// Selection status flags.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Selectable {
    /// Status bits; see [`Selectable::SELECTED`].
    pub flags: u8,
}

impl Component for Selectable {
    const KIND: ComponentKind = ComponentKind::Selectable;
}

impl Selectable {
    /// Flag bit: the entity is currently inside the active selection.
    pub const SELECTED: u8 = 0x01;

    /// Whether the selected bit is set.
    #[inline]
    #[must_use]
    pub const fn is_selected(self) -> bool {
        self.flags & Self::SELECTED != 0
    }

    /// Sets or clears the selected bit.
    #[inline]
    pub fn set_selected(&mut self, selected: bool) {
        if selected {
            self.flags |= Self::SELECTED;
        } else {
            self.flags &= !Self::SELECTED;
        }
    }
}
