//! # ECS World
//!
//! The owner of all entity and component state: one entity table plus one
//! component pool per registered type. There is no global storage - every
//! operation goes through a `&World` or `&mut World`.
//!
//! All memory is pre-allocated at creation; creating entities past capacity
//! is refused with an error rather than reallocating.

use skirmish_shared::Vec2;

use super::component::{ComponentKind, Selectable, Sprite, Transform, COMPONENT_TYPE_COUNT};
use super::entity::{Entity, EntityId};
use super::error::{EcsError, EcsResult};
use super::pool::{ComponentPool, PoolIndex};

/// Component mask of a standard unit: transform + sprite + selectable.
pub const UNIT_MASK: u32 = ComponentKind::Transform.bit()
    | ComponentKind::Sprite.bit()
    | ComponentKind::Selectable.bit();

/// The ECS World - container for all simulation state.
///
/// # Capacity
///
/// The entity table capacity and a global component budget are fixed at
/// creation. The budget is divided evenly across the component pools, one
/// pool per registered [`ComponentKind`].
///
/// # Example
///
/// ```rust,ignore
/// let mut world = World::new(1024, 4096);
///
/// let id = world.spawn_unit(Transform::at(Vec2::new(100.0, 100.0)))?;
/// let position = world.transform(id)?.position;
/// ```
pub struct World {
    /// Entity records, densely packed in creation order.
    entities: Vec<Entity>,
    /// Fixed entity table capacity.
    entity_capacity: usize,

    // =========================================================================
    // Component Pools - add new component types here and in `attach_default`
    // =========================================================================
    /// Transform pool.
    pub transforms: ComponentPool<Transform>,
    /// Sprite pool.
    pub sprites: ComponentPool<Sprite>,
    /// Selectable pool.
    pub selectables: ComponentPool<Selectable>,
}

impl World {
    /// Creates a world with the given entity capacity and global component
    /// budget.
    ///
    /// The budget is shared out evenly: each pool gets
    /// `component_budget / COMPONENT_TYPE_COUNT` slots.
    ///
    /// # Panics
    ///
    /// Panics if either capacity is too small to give every pool at least
    /// one slot, or if the entity capacity exceeds `u32::MAX`.
    #[must_use]
    pub fn new(entity_capacity: usize, component_budget: usize) -> Self {
        assert!(entity_capacity > 0, "Entity capacity must be greater than zero");
        assert!(
            entity_capacity <= u32::MAX as usize,
            "Entity capacity cannot exceed u32::MAX"
        );

        let per_pool = component_budget / COMPONENT_TYPE_COUNT;
        assert!(per_pool > 0, "Component budget must cover every pool");

        Self {
            entities: Vec::with_capacity(entity_capacity),
            entity_capacity,
            transforms: ComponentPool::new(per_pool),
            sprites: ComponentPool::new(per_pool),
            selectables: ComponentPool::new(per_pool),
        }
    }

    /// Returns the fixed entity table capacity.
    #[inline]
    #[must_use]
    pub const fn entity_capacity(&self) -> usize {
        self.entity_capacity
    }

    /// Returns the number of created entities.
    ///
    /// Because identities are dense and never recycled, this is also the
    /// next identity to be assigned.
    #[inline]
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// All entity records, in creation order.
    #[inline]
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Gets an entity record by identity.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`] if no entity with this identity exists.
    #[inline]
    pub fn entity(&self, id: EntityId) -> EcsResult<&Entity> {
        self.entities
            .get(id.index())
            .ok_or(EcsError::UnknownEntity(id))
    }

    /// Gets a mutable entity record by identity.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`] if no entity with this identity exists.
    #[inline]
    pub fn entity_mut(&mut self, id: EntityId) -> EcsResult<&mut Entity> {
        self.entities
            .get_mut(id.index())
            .ok_or(EcsError::UnknownEntity(id))
    }

    /// Creates an entity carrying one default-valued component for each set
    /// bit in `mask`.
    ///
    /// This is phase one of the two-phase creation protocol: components are
    /// reserved here; seeding their values is a separate, composable step
    /// (see [`World::spawn_unit`] for the canonical composition).
    ///
    /// # Errors
    ///
    /// - [`EcsError::EntityTableFull`] when the table is at capacity.
    /// - [`EcsError::PoolFull`] when a requested pool is exhausted. The
    ///   entity is not created; components reserved from earlier pools stay
    ///   allocated but unreferenced - pool exhaustion is a configuration
    ///   error, not a state to recover into.
    pub fn create_entity(&mut self, mask: u32) -> EcsResult<EntityId> {
        if self.entities.len() == self.entity_capacity {
            return Err(EcsError::EntityTableFull {
                capacity: self.entity_capacity,
            });
        }

        let id = EntityId::new(self.entities.len() as u32);
        let mut entity = Entity::new(id);

        for kind in ComponentKind::ALL {
            if mask & kind.bit() == 0 {
                continue;
            }

            let index = self.attach_default(kind)?;
            entity.map.set(kind, index);
            entity.components |= kind.bit();
        }

        self.entities.push(entity);
        tracing::trace!(entity = %id, mask, "entity created");

        Ok(id)
    }

    /// Spawns a standard unit: transform + sprite + selectable, with the
    /// transform seeded to `transform`.
    ///
    /// Phase two of the creation protocol - reserve via
    /// [`World::create_entity`], then overwrite the fresh component's value.
    ///
    /// # Errors
    ///
    /// Whatever [`World::create_entity`] reports.
    pub fn spawn_unit(&mut self, transform: Transform) -> EcsResult<EntityId> {
        let id = self.create_entity(UNIT_MASK)?;
        *self.transform_mut(id)? = transform;
        Ok(id)
    }

    /// Allocates one default component of `kind` from its pool.
    ///
    /// The single dispatch site from component kind to typed pool; adding a
    /// component type means one new arm here.
    fn attach_default(&mut self, kind: ComponentKind) -> EcsResult<PoolIndex> {
        match kind {
            ComponentKind::Transform => self.transforms.add(Transform::default()),
            ComponentKind::Sprite => self.sprites.add(Sprite::default()),
            ComponentKind::Selectable => self.selectables.add(Selectable::default()),
        }
    }

    /// Resolves the pool index of `id`'s component of `kind`.
    ///
    /// # Errors
    ///
    /// [`EcsError::UnknownEntity`] or [`EcsError::ComponentAbsent`].
    fn component_index(&self, id: EntityId, kind: ComponentKind) -> EcsResult<PoolIndex> {
        let entity = self.entity(id)?;
        entity
            .component_index(kind)
            .ok_or(EcsError::ComponentAbsent { entity: id, kind })
    }

    /// The entity's transform.
    ///
    /// # Errors
    ///
    /// [`EcsError::ComponentAbsent`] if the entity carries no transform.
    pub fn transform(&self, id: EntityId) -> EcsResult<&Transform> {
        let index = self.component_index(id, ComponentKind::Transform)?;
        self.transforms.get(index)
    }

    /// The entity's transform, mutably.
    ///
    /// # Errors
    ///
    /// [`EcsError::ComponentAbsent`] if the entity carries no transform.
    pub fn transform_mut(&mut self, id: EntityId) -> EcsResult<&mut Transform> {
        let index = self.component_index(id, ComponentKind::Transform)?;
        self.transforms.get_mut(index)
    }

    /// The entity's sprite.
    ///
    /// # Errors
    ///
    /// [`EcsError::ComponentAbsent`] if the entity carries no sprite.
    pub fn sprite(&self, id: EntityId) -> EcsResult<&Sprite> {
        let index = self.component_index(id, ComponentKind::Sprite)?;
        self.sprites.get(index)
    }

    /// The entity's sprite, mutably.
    ///
    /// # Errors
    ///
    /// [`EcsError::ComponentAbsent`] if the entity carries no sprite.
    pub fn sprite_mut(&mut self, id: EntityId) -> EcsResult<&mut Sprite> {
        let index = self.component_index(id, ComponentKind::Sprite)?;
        self.sprites.get_mut(index)
    }

    /// The entity's selectable status.
    ///
    /// # Errors
    ///
    /// [`EcsError::ComponentAbsent`] if the entity is not selectable.
    pub fn selectable(&self, id: EntityId) -> EcsResult<&Selectable> {
        let index = self.component_index(id, ComponentKind::Selectable)?;
        self.selectables.get(index)
    }

    /// The entity's selectable status, mutably.
    ///
    /// # Errors
    ///
    /// [`EcsError::ComponentAbsent`] if the entity is not selectable.
    pub fn selectable_mut(&mut self, id: EntityId) -> EcsResult<&mut Selectable> {
        let index = self.component_index(id, ComponentKind::Selectable)?;
        self.selectables.get_mut(index)
    }

    /// Iterates over entities carrying every component type in `mask`.
    pub fn with_components(&self, mask: u32) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.has_all(mask))
    }

    /// Snapshots `prev_position = position` for every transform.
    ///
    /// Must run for ALL transforms before any integration each tick: the
    /// grid's migration detection is a function of (previous cell, current
    /// cell), and a missed snapshot makes stale motion look like migration.
    pub fn snapshot_previous_positions(&mut self) {
        for t in self.transforms.as_mut_slice() {
            t.prev_position = t.position;
        }
    }

    /// Advances every transform by its velocity over `dt` seconds.
    ///
    /// The default integrator. An embedding that wants different motion can
    /// skip this and write positions itself, as long as it does so between
    /// the snapshot and the grid update.
    pub fn integrate(&mut self, dt: f32) {
        for t in self.transforms.as_mut_slice() {
            t.position += t.velocity * dt;
        }
    }

    /// Sets an entity's velocity. Convenience for scripted motion.
    ///
    /// # Errors
    ///
    /// [`EcsError::ComponentAbsent`] if the entity carries no transform.
    pub fn set_velocity(&mut self, id: EntityId, velocity: Vec2) -> EcsResult<()> {
        self.transform_mut(id)?.velocity = velocity;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_world() -> World {
        World::new(16, 48)
    }

    #[test]
    fn test_identities_are_dense_creation_order() {
        let mut world = small_world();

        for expected in 0..4u32 {
            let id = world.create_entity(ComponentKind::Transform.bit()).unwrap();
            assert_eq!(id.raw(), expected);
        }
        assert_eq!(world.entity_count(), 4);
    }

    #[test]
    fn test_mask_matches_mapping() {
        let mut world = small_world();

        let id = world
            .create_entity(ComponentKind::Transform.bit() | ComponentKind::Selectable.bit())
            .unwrap();
        let entity = world.entity(id).unwrap();

        for kind in ComponentKind::ALL {
            let bit_set = entity.has_component(kind);
            let mapped = entity.component_index(kind).is_some();
            assert_eq!(bit_set, mapped, "mask and mapping disagree for {kind}");
        }

        // Requested components resolve, the unrequested one reports absent
        assert!(world.transform(id).is_ok());
        assert!(world.selectable(id).is_ok());
        assert_eq!(
            world.sprite(id).unwrap_err(),
            EcsError::ComponentAbsent {
                entity: id,
                kind: ComponentKind::Sprite
            }
        );
    }

    #[test]
    fn test_spawn_unit_seeds_transform() {
        let mut world = small_world();

        let at = Transform::at(Vec2::new(500.0, 300.0));
        let id = world.spawn_unit(at).unwrap();

        let entity = world.entity(id).unwrap();
        assert!(entity.has_all(UNIT_MASK));

        let t = world.transform(id).unwrap();
        assert_eq!(t.position, Vec2::new(500.0, 300.0));
        assert_eq!(t.prev_position, t.position);

        // Sprite and selectable stay at their defaults
        assert_eq!(*world.sprite(id).unwrap(), Sprite::default());
        assert!(!world.selectable(id).unwrap().is_selected());
    }

    #[test]
    fn test_entity_table_full() {
        let mut world = World::new(2, 48);

        world.create_entity(0).unwrap();
        world.create_entity(0).unwrap();

        assert_eq!(
            world.create_entity(0).unwrap_err(),
            EcsError::EntityTableFull { capacity: 2 }
        );
        assert_eq!(world.entity_count(), 2);
    }

    #[test]
    fn test_pool_exhaustion_refuses_creation() {
        // Budget of 3 gives each pool exactly one slot
        let mut world = World::new(16, 3);

        world.create_entity(ComponentKind::Transform.bit()).unwrap();
        let err = world
            .create_entity(ComponentKind::Transform.bit())
            .unwrap_err();

        assert_eq!(
            err,
            EcsError::PoolFull {
                kind: ComponentKind::Transform,
                capacity: 1
            }
        );
        // The failed creation must not have entered the table
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn test_snapshot_then_integrate() {
        let mut world = small_world();
        let id = world.spawn_unit(Transform::at(Vec2::new(10.0, 0.0))).unwrap();
        world.set_velocity(id, Vec2::new(5.0, 0.0)).unwrap();

        world.snapshot_previous_positions();
        world.integrate(2.0);

        let t = world.transform(id).unwrap();
        assert_eq!(t.prev_position, Vec2::new(10.0, 0.0));
        assert_eq!(t.position, Vec2::new(20.0, 0.0));
    }

    #[test]
    fn test_entity_flags_are_writable() {
        let mut world = small_world();
        let id = world.spawn_unit(Transform::default()).unwrap();

        // The core stores the flag byte; meaning belongs to the embedding
        world.entity_mut(id).unwrap().flags |= 0x02;
        assert_eq!(world.entity(id).unwrap().flags, 0x02);

        let missing = EntityId::new(99);
        assert_eq!(
            world.entity_mut(missing).unwrap_err(),
            EcsError::UnknownEntity(missing)
        );
    }

    #[test]
    fn test_with_components_filter() {
        let mut world = small_world();
        world.create_entity(ComponentKind::Transform.bit()).unwrap();
        world.spawn_unit(Transform::default()).unwrap();
        world.create_entity(ComponentKind::Sprite.bit()).unwrap();

        let both = ComponentKind::Transform.bit() | ComponentKind::Selectable.bit();
        let matches: Vec<_> = world.with_components(both).map(|e| e.id).collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].raw(), 1);
    }
}
