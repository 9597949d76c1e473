//! # Simulation
//!
//! Owns the world, the spatial grid, and the camera, and runs the tick in
//! the one order the core's consistency contract allows: snapshot,
//! integrate, migrate, select.

use skirmish_core::{
    select_within_region, EcsResult, EntityId, GridUpdateStats, SpatialGrid, Transform, World,
};
use skirmish_shared::{Rect, Vec2};

use crate::camera::Camera;
use crate::config::SimConfig;

/// Entity table capacity.
const ENTITY_CAP: usize = 1_024;

/// Global component budget, shared evenly across the pools.
const COMPONENT_BUDGET: usize = 3 * ENTITY_CAP;

/// World units per grid cell.
const GRID_CELL_SIZE: Vec2 = Vec2::new(64.0, 64.0);

/// Grid columns: the 1920-unit playfield plus the unindexed border column.
const GRID_COLS: usize = 31;

/// Grid rows: the 1080-unit playfield plus the unindexed border row.
const GRID_ROWS: usize = 18;

/// What one tick did.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameReport {
    /// The tick number this report describes.
    pub frame: u64,
    /// Grid migration counters.
    pub grid: GridUpdateStats,
    /// Number of entities selected, if a selection region was processed.
    pub selected: Option<usize>,
}

/// The running simulation.
pub struct Simulation {
    world: World,
    grid: SpatialGrid,
    camera: Camera,
    /// Selection region released by the input layer, waiting for the next
    /// tick.
    pending_selection: Option<Rect>,
    frame: u64,
}

impl Simulation {
    /// Creates a simulation from loaded configuration.
    #[must_use]
    pub fn new(config: &SimConfig) -> Self {
        Self {
            world: World::new(ENTITY_CAP, COMPONENT_BUDGET),
            grid: SpatialGrid::new(GRID_CELL_SIZE, GRID_COLS, GRID_ROWS, config.cell_ent_cap),
            camera: Camera::default(),
            pending_selection: None,
            frame: 0,
        }
    }

    /// The world, for reads.
    #[inline]
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world, for scripted mutation between ticks.
    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The spatial grid, for reads (debug overlay, queries).
    #[inline]
    #[must_use]
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// The camera.
    #[inline]
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The camera, mutably.
    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Ticks completed so far.
    #[inline]
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Spawns a standard unit at a world position and indexes it in the
    /// grid.
    ///
    /// A unit spawned outside the indexable playfield starts life
    /// unindexed; it joins the grid when it first moves into range.
    ///
    /// # Errors
    ///
    /// Entity or pool capacity exhaustion, from
    /// [`World::spawn_unit`].
    pub fn spawn_unit(&mut self, at: Vec2) -> EcsResult<EntityId> {
        let id = self.world.spawn_unit(Transform::at(at))?;

        match self.grid.insert(id, at) {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(entity = %id, "unit spawned outside the indexed playfield");
            }
            Err(err) => {
                // The unit exists but is not spatially indexed; same
                // staleness policy as a refused migration.
                tracing::warn!(entity = %id, %err, "unit not indexed at spawn");
            }
        }

        Ok(id)
    }

    /// Queues a screen-space selection region for the next tick.
    ///
    /// Called by the input layer when a drag gesture is released; the
    /// region is processed at the end of the next [`Simulation::tick`].
    pub fn queue_selection(&mut self, screen_region: Rect) {
        self.pending_selection = Some(screen_region);
    }

    /// Runs one simulation tick.
    ///
    /// Order is load-bearing (see the crate docs): previous positions are
    /// snapshotted for all transforms, positions integrate, the grid
    /// migrates buckets, and only then does any queued selection run
    /// against consistent cell membership.
    ///
    /// # Errors
    ///
    /// Selection surfaces inconsistent component mappings as ECS errors;
    /// integration and migration themselves cannot fail.
    pub fn tick(&mut self, dt: f32) -> EcsResult<FrameReport> {
        self.world.snapshot_previous_positions();
        self.world.integrate(dt);
        let grid_stats = self.grid.update(&self.world);

        let selected = match self.pending_selection.take() {
            Some(region) => Some(select_within_region(
                &mut self.world,
                &self.grid,
                region,
                &self.camera,
            )?),
            None => None,
        };

        self.frame += 1;

        Ok(FrameReport {
            frame: self.frame,
            grid: grid_stats,
            selected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::select::is_selected;

    /// Camera whose screen coordinates coincide with world coordinates,
    /// so test regions can be written directly in world units.
    fn world_aligned_camera() -> Camera {
        Camera {
            offset: Vec2::ZERO,
            ..Camera::default()
        }
    }

    fn sim() -> Simulation {
        let mut sim = Simulation::new(&SimConfig::default());
        *sim.camera_mut() = world_aligned_camera();
        sim
    }

    #[test]
    fn test_tick_migrates_mover() {
        let mut sim = sim();
        let id = sim.spawn_unit(Vec2::new(100.0, 100.0)).unwrap();
        sim.world_mut().set_velocity(id, Vec2::new(64.0, 0.0)).unwrap();

        // One second: (100, 100) -> (164, 100), cell (1,1) -> (2,1)
        let report = sim.tick(1.0).unwrap();

        assert_eq!(report.frame, 1);
        assert_eq!(report.grid.migrated, 1);
        assert!(sim.grid().cell(2, 1).unwrap().contains(id));
        assert!(!sim.grid().cell(1, 1).unwrap().contains(id));
    }

    #[test]
    fn test_repeated_ticks_without_motion_are_quiet() {
        let mut sim = sim();
        let _ = sim.spawn_unit(Vec2::new(100.0, 100.0)).unwrap();

        for _ in 0..3 {
            let report = sim.tick(1.0 / 60.0).unwrap();
            assert_eq!(report.grid, GridUpdateStats::default());
            assert!(report.selected.is_none());
        }
    }

    #[test]
    fn test_queued_selection_runs_once() {
        let mut sim = sim();
        let id = sim.spawn_unit(Vec2::new(100.0, 100.0)).unwrap();

        sim.queue_selection(Rect::new(90.0, 90.0, 20.0, 20.0));
        let report = sim.tick(1.0 / 60.0).unwrap();
        assert_eq!(report.selected, Some(1));
        assert!(is_selected(sim.world(), id).unwrap());

        // The region was consumed; the next tick selects nothing new
        let report = sim.tick(1.0 / 60.0).unwrap();
        assert_eq!(report.selected, None);
        assert!(is_selected(sim.world(), id).unwrap());
    }

    #[test]
    fn test_selection_away_clears() {
        let mut sim = sim();
        let id = sim.spawn_unit(Vec2::new(100.0, 100.0)).unwrap();

        sim.queue_selection(Rect::new(90.0, 90.0, 20.0, 20.0));
        sim.tick(1.0 / 60.0).unwrap();
        assert!(is_selected(sim.world(), id).unwrap());

        sim.queue_selection(Rect::new(500.0, 500.0, 10.0, 10.0));
        sim.tick(1.0 / 60.0).unwrap();
        assert!(!is_selected(sim.world(), id).unwrap());
    }
}
