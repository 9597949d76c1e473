//! # Drag-Box Selection
//!
//! Answers "which selectable entities fall inside this region" and records
//! the answer in each entity's [`crate::ecs::Selectable`] flags.
//!
//! The region arrives in screen space; an externally supplied
//! [`ScreenToWorld`] collaborator maps it into world space. This module
//! never implements the coordinate transform itself.

use skirmish_shared::{Rect, Vec2, SELECT_RADIUS};

use crate::ecs::{ComponentKind, EcsError, EcsResult, EntityId, World};
use crate::grid::SpatialGrid;

/// Coordinate transform collaborator: device (screen) space to world space.
///
/// Implemented by the embedding's camera; the selection helper treats it as
/// an opaque function.
pub trait ScreenToWorld {
    /// Maps a screen-space point into world space.
    fn point_to_world(&self, point: Vec2) -> Vec2;

    /// Maps a screen-space rectangle into world space.
    ///
    /// The default maps both corners and renormalizes, which is exact for
    /// any transform without rotation.
    fn rect_to_world(&self, rect: Rect) -> Rect {
        Rect::from_corners(
            self.point_to_world(rect.min()),
            self.point_to_world(rect.max()),
        )
    }
}

/// Selects every selectable entity inside a screen-space region.
///
/// Transforms the region into world space via `xform`, then delegates to
/// [`select_within_world_region`].
///
/// # Errors
///
/// See [`select_within_world_region`].
pub fn select_within_region(
    world: &mut World,
    grid: &SpatialGrid,
    screen_region: Rect,
    xform: &impl ScreenToWorld,
) -> EcsResult<usize> {
    let region = xform.rect_to_world(screen_region);
    select_within_world_region(world, grid, region)
}

/// Selects every selectable entity inside a world-space region.
///
/// Two passes:
/// 1. clear the selected flag of every entity carrying transform +
///    selectable - entities selected last time but outside the new region
///    must reset, so this pass cannot be bounded by the region;
/// 2. set the flag for entities whose position intersects the region under
///    the fixed [`SELECT_RADIUS`] circular hitbox. This pass only scans the
///    grid cells overlapping the region.
///
/// Returns the number of entities selected.
///
/// # Errors
///
/// [`EcsError::ComponentAbsent`] / [`EcsError::PoolIndexOutOfBounds`] if an
/// entity's component mapping is inconsistent - a programming error in the
/// table, surfaced rather than skipped.
pub fn select_within_world_region(
    world: &mut World,
    grid: &SpatialGrid,
    region: Rect,
) -> EcsResult<usize> {
    let mask = ComponentKind::Transform.bit() | ComponentKind::Selectable.bit();

    // Pass 1: clear. Entity records are small and Copy, so indexed
    // iteration sidesteps holding a borrow across the pool mutation.
    for index in 0..world.entity_count() {
        let entity = world.entities()[index];
        if !entity.has_all(mask) {
            continue;
        }
        let slot = entity
            .component_index(ComponentKind::Selectable)
            .ok_or(EcsError::ComponentAbsent {
                entity: entity.id,
                kind: ComponentKind::Selectable,
            })?;
        world.selectables.get_mut(slot)?.set_selected(false);
    }

    // Pass 2: set, bounded to the cells the region overlaps.
    let window = grid.cells_overlapping(region);
    let mut selected = 0;

    for id in grid.entities_in(window) {
        let entity = *world.entity(id)?;
        if !entity.has_all(mask) {
            continue;
        }

        let position = world.transform(id)?.position;
        if region.intersects_circle(position, SELECT_RADIUS) {
            world.selectable_mut(id)?.set_selected(true);
            selected += 1;
        }
    }

    Ok(selected)
}

/// Convenience read: whether an entity is currently selected.
///
/// # Errors
///
/// [`EcsError::ComponentAbsent`] if the entity is not selectable.
pub fn is_selected(world: &World, id: EntityId) -> EcsResult<bool> {
    Ok(world.selectable(id)?.is_selected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Transform;

    struct IdentityTransform;

    impl ScreenToWorld for IdentityTransform {
        fn point_to_world(&self, point: Vec2) -> Vec2 {
            point
        }
    }

    fn setup() -> (World, SpatialGrid, EntityId) {
        let mut world = World::new(16, 48);
        let mut grid = SpatialGrid::new(Vec2::new(64.0, 64.0), 16, 16, 8);

        let at = Vec2::new(100.0, 100.0);
        let id = world.spawn_unit(Transform::at(at)).unwrap();
        grid.insert(id, at).unwrap();

        (world, grid, id)
    }

    #[test]
    fn test_select_then_deselect() {
        let (mut world, grid, id) = setup();

        // Box covering the unit
        let hit = Rect::new(90.0, 90.0, 20.0, 20.0);
        let count = select_within_world_region(&mut world, &grid, hit).unwrap();
        assert_eq!(count, 1);
        assert!(is_selected(&world, id).unwrap());

        // Box far away clears the earlier selection
        let miss = Rect::new(500.0, 500.0, 10.0, 10.0);
        let count = select_within_world_region(&mut world, &grid, miss).unwrap();
        assert_eq!(count, 0);
        assert!(!is_selected(&world, id).unwrap());
    }

    #[test]
    fn test_hitbox_radius_reaches_outside_box() {
        let (mut world, grid, id) = setup();

        // Box stops 5 world units short of the unit; the 10-unit hitbox
        // still reaches it
        let near = Rect::new(50.0, 90.0, 45.0, 20.0);
        let count = select_within_world_region(&mut world, &grid, near).unwrap();
        assert_eq!(count, 1);
        assert!(is_selected(&world, id).unwrap());

        // 15 units short: out of reach
        let short = Rect::new(50.0, 90.0, 35.0, 20.0);
        let count = select_within_world_region(&mut world, &grid, short).unwrap();
        assert_eq!(count, 0);
        assert!(!is_selected(&world, id).unwrap());
    }

    #[test]
    fn test_screen_region_goes_through_collaborator() {
        let (mut world, grid, id) = setup();

        let count = select_within_region(
            &mut world,
            &grid,
            Rect::new(90.0, 90.0, 20.0, 20.0),
            &IdentityTransform,
        )
        .unwrap();
        assert_eq!(count, 1);
        assert!(is_selected(&world, id).unwrap());
    }

    #[test]
    fn test_unselectable_entities_ignored() {
        let (mut world, mut grid, _) = setup();

        // Transform-only entity in the same cell
        let bare = world.create_entity(ComponentKind::Transform.bit()).unwrap();
        world.transform_mut(bare).unwrap().position = Vec2::new(100.0, 100.0);
        grid.insert(bare, Vec2::new(100.0, 100.0)).unwrap();

        let hit = Rect::new(90.0, 90.0, 20.0, 20.0);
        let count = select_within_world_region(&mut world, &grid, hit).unwrap();

        // Only the full unit counts
        assert_eq!(count, 1);
        assert!(world.selectable(bare).is_err());
    }
}
