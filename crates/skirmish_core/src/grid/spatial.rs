//! # Spatial Grid
//!
//! Flat, row-major array of cells over world space. Cell coordinates come
//! from `floor(|coordinate| / cell_size)` per axis - magnitude-based, which
//! assumes world coordinates are non-negative; the simulation keeps its
//! playfield in the positive quadrant.
//!
//! The rightmost column and bottommost row form an unindexed border: a
//! position mapping there is treated as "not spatially indexed right now"
//! and migrations into or out of it are skipped.

use skirmish_shared::{Rect, Vec2};
use thiserror::Error;

use crate::ecs::{ComponentKind, EntityId, World};

use super::cell::Cell;

/// Errors that can occur in the spatial grid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A cell's fixed membership capacity is exhausted.
    #[error("grid cell ({col},{row}) full: capacity {capacity}")]
    CellFull {
        /// Column of the full cell.
        col: usize,
        /// Row of the full cell.
        row: usize,
        /// The cell's fixed membership capacity.
        capacity: usize,
    },
}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;

/// Counters for one [`SpatialGrid::update`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridUpdateStats {
    /// Entities moved between cells this pass.
    pub migrated: usize,
    /// Migrations skipped because either endpoint was outside the
    /// indexable cell range.
    pub unindexed: usize,
    /// Migrations refused because the destination cell was full. The
    /// entity keeps its previous bucket membership.
    pub refused: usize,
}

/// An inclusive rectangle of cell coordinates, clamped to the grid's
/// indexable range. May be empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellWindow {
    /// First column, inclusive.
    pub min_col: usize,
    /// First row, inclusive.
    pub min_row: usize,
    /// Last column, inclusive.
    pub max_col: usize,
    /// Last row, inclusive.
    pub max_row: usize,
}

impl CellWindow {
    /// Whether the window covers no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.min_col > self.max_col || self.min_row > self.max_row
    }

    /// Iterates the window's cell coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> {
        let (min_col, max_col) = (self.min_col, self.max_col);
        (self.min_row..=self.max_row)
            .flat_map(move |row| (min_col..=max_col).map(move |col| (col, row)))
    }
}

/// Uniform grid over world space.
///
/// Cells are stored in one flat row-major array, owned exclusively by the
/// grid; `cell_id(col, row) = col + row * cols` everywhere.
pub struct SpatialGrid {
    /// World units per cell, per axis.
    cell_size: Vec2,
    /// Number of columns.
    cols: usize,
    /// Number of rows.
    rows: usize,
    /// Flat row-major cell array.
    cells: Vec<Cell>,
}

impl SpatialGrid {
    /// Creates a grid of `cols * rows` empty cells.
    ///
    /// # Panics
    ///
    /// Panics if the cell size is not positive, if there are fewer than two
    /// columns or rows (the last column and row are an unindexed border, so
    /// a 1-wide grid could never index anything), or if `cell_capacity` is
    /// zero.
    #[must_use]
    pub fn new(cell_size: Vec2, cols: usize, rows: usize, cell_capacity: usize) -> Self {
        assert!(
            cell_size.x > 0.0 && cell_size.y > 0.0,
            "Cell size must be positive"
        );
        assert!(
            cols >= 2 && rows >= 2,
            "Grid needs at least 2 columns and rows"
        );
        assert!(cell_capacity > 0, "Cell capacity must be greater than zero");

        let cells = (0..cols * rows).map(|_| Cell::new(cell_capacity)).collect();

        Self {
            cell_size,
            cols,
            rows,
            cells,
        }
    }

    /// World units per cell.
    #[inline]
    #[must_use]
    pub const fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Flat index of a cell coordinate. Row-major; the single mapping used
    /// for every cell lookup.
    #[inline]
    #[must_use]
    pub const fn cell_id(&self, col: usize, row: usize) -> usize {
        col + row * self.cols
    }

    /// The cell at a coordinate, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(self.cell_id(col, row))
    }

    /// Cell coordinate of a world position.
    ///
    /// Magnitude-based: `floor(|coordinate| / cell_size)` per axis. The
    /// result may lie outside the indexable range; check with
    /// [`SpatialGrid::is_indexable`].
    #[inline]
    #[must_use]
    pub fn cell_coord(&self, position: Vec2) -> (usize, usize) {
        (
            (position.x.abs() / self.cell_size.x) as usize,
            (position.y.abs() / self.cell_size.y) as usize,
        )
    }

    /// Whether a cell coordinate is inside the indexable range.
    ///
    /// Right/bottom-edge-exclusive: the last column and row exist but are
    /// never indexed, so entities at the far border keep whatever bucket
    /// membership they had.
    #[inline]
    #[must_use]
    pub const fn is_indexable(&self, coord: (usize, usize)) -> bool {
        coord.0 < self.cols - 1 && coord.1 < self.rows - 1
    }

    /// Places a newly spawned entity in the cell computed from `position`.
    ///
    /// Returns `Ok(false)` when the position maps outside the indexable
    /// range - the entity simply starts life unindexed.
    ///
    /// Call this once per transform-carrying entity right after creation;
    /// [`SpatialGrid::update`] only observes movement, so an entity that
    /// never moves would otherwise never enter the index.
    ///
    /// # Errors
    ///
    /// [`GridError::CellFull`] when the target cell is at capacity.
    pub fn insert(&mut self, id: EntityId, position: Vec2) -> GridResult<bool> {
        let coord = self.cell_coord(position);
        if !self.is_indexable(coord) {
            return Ok(false);
        }

        let cell_id = self.cell_id(coord.0, coord.1);
        if !self.cells[cell_id].push(id) {
            return Err(GridError::CellFull {
                col: coord.0,
                row: coord.1,
                capacity: self.cells[cell_id].capacity(),
            });
        }
        Ok(true)
    }

    /// Migrates entity IDs between cells to match current positions.
    ///
    /// For every entity carrying a transform:
    /// - no motion this tick (`position == prev_position`): skip;
    /// - both positions in the same cell: skip (sub-cell motion);
    /// - either cell outside the indexable range: skip, leaving the old
    ///   bucket membership untouched;
    /// - otherwise remove the ID from the previous cell (compacting it) and
    ///   append it to the current cell.
    ///
    /// A full destination cell refuses the migration: the entity keeps its
    /// previous membership, the refusal is counted in the returned stats
    /// and logged. One overfull cell must not abort the tick.
    ///
    /// Must run after [`World::snapshot_previous_positions`] and position
    /// integration; it reads both position fields.
    pub fn update(&mut self, world: &World) -> GridUpdateStats {
        let mut stats = GridUpdateStats::default();

        for entity in world.entities() {
            let Some(index) = entity.component_index(ComponentKind::Transform) else {
                continue;
            };
            let Ok(transform) = world.transforms.get(index) else {
                continue;
            };

            if transform.position == transform.prev_position {
                continue;
            }

            let prev = self.cell_coord(transform.prev_position);
            let cur = self.cell_coord(transform.position);
            if prev == cur {
                continue;
            }

            if !self.is_indexable(prev) || !self.is_indexable(cur) {
                stats.unindexed += 1;
                continue;
            }

            let cur_id = self.cell_id(cur.0, cur.1);
            if self.cells[cur_id].is_full() {
                stats.refused += 1;
                tracing::warn!(
                    entity = %entity.id,
                    col = cur.0,
                    row = cur.1,
                    capacity = self.cells[cur_id].capacity(),
                    "destination cell full, migration refused"
                );
                continue;
            }

            let prev_id = self.cell_id(prev.0, prev.1);
            self.cells[prev_id].remove(entity.id);
            let pushed = self.cells[cur_id].push(entity.id);
            debug_assert!(pushed);
            stats.migrated += 1;
        }

        stats
    }

    /// The window of cells overlapping a world-space rectangle, clamped to
    /// the indexable range.
    ///
    /// Used by grid-accelerated selection, and by a debug overlay to cull
    /// cell drawing to the camera's visible world rectangle.
    #[must_use]
    pub fn cells_overlapping(&self, rect: Rect) -> CellWindow {
        // Clamp into the positive quadrant before the magnitude mapping
        let min = rect.min().max(Vec2::ZERO);
        let max = rect.max().max(Vec2::ZERO);

        let (min_col, min_row) = self.cell_coord(min);
        let (max_col, max_row) = self.cell_coord(max);

        CellWindow {
            min_col,
            min_row,
            max_col: max_col.min(self.cols - 2),
            max_row: max_row.min(self.rows - 2),
        }
    }

    /// Iterates the entities in every cell of a window.
    pub fn entities_in(&self, window: CellWindow) -> impl Iterator<Item = EntityId> + '_ {
        window
            .iter()
            .filter_map(move |(col, row)| self.cell(col, row))
            .flat_map(|cell| cell.entities().iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Transform;

    const CELL: Vec2 = Vec2::new(64.0, 64.0);

    fn grid() -> SpatialGrid {
        SpatialGrid::new(CELL, 8, 8, 4)
    }

    fn world_with_unit(at: Vec2) -> (World, EntityId) {
        let mut world = World::new(16, 48);
        let id = world.spawn_unit(Transform::at(at)).unwrap();
        (world, id)
    }

    /// Moves a unit the way a tick does: snapshot, then write the position.
    fn step_to(world: &mut World, id: EntityId, to: Vec2) {
        world.snapshot_previous_positions();
        world.transform_mut(id).unwrap().position = to;
    }

    #[test]
    fn test_cell_id_is_row_major() {
        let grid = grid();
        assert_eq!(grid.cell_id(0, 0), 0);
        assert_eq!(grid.cell_id(3, 0), 3);
        assert_eq!(grid.cell_id(0, 1), 8);
        assert_eq!(grid.cell_id(3, 2), 19);
    }

    #[test]
    fn test_cell_coord_truncates() {
        let grid = grid();
        assert_eq!(grid.cell_coord(Vec2::new(0.0, 0.0)), (0, 0));
        assert_eq!(grid.cell_coord(Vec2::new(63.9, 63.9)), (0, 0));
        assert_eq!(grid.cell_coord(Vec2::new(64.0, 128.0)), (1, 2));
        assert_eq!(grid.cell_coord(Vec2::new(100.0, 100.0)), (1, 1));
    }

    #[test]
    fn test_insert_places_entity() {
        let mut grid = grid();
        let (_, id) = world_with_unit(Vec2::new(100.0, 100.0));

        assert!(grid.insert(id, Vec2::new(100.0, 100.0)).unwrap());
        assert!(grid.cell(1, 1).unwrap().contains(id));
    }

    #[test]
    fn test_insert_outside_indexable_range() {
        let mut grid = grid();
        let (_, id) = world_with_unit(Vec2::ZERO);

        // Column 7 exists but is the unindexed border
        assert!(!grid.insert(id, Vec2::new(7.5 * 64.0, 0.0)).unwrap());
        // Far outside the grid entirely
        assert!(!grid.insert(id, Vec2::new(10_000.0, 0.0)).unwrap());
    }

    #[test]
    fn test_update_migrates_once() {
        let mut grid = grid();
        let start = Vec2::new(100.0, 100.0);
        let (mut world, id) = world_with_unit(start);
        grid.insert(id, start).unwrap();

        step_to(&mut world, id, Vec2::new(200.0, 100.0));
        let stats = grid.update(&world);

        assert_eq!(stats.migrated, 1);
        assert!(!grid.cell(1, 1).unwrap().contains(id));
        assert!(grid.cell(3, 1).unwrap().contains(id));

        // Membership is unique: the entity appears in exactly one cell
        let appearances: usize = (0..grid.cols())
            .flat_map(|c| (0..grid.rows()).map(move |r| (c, r)))
            .filter(|&(c, r)| grid.cell(c, r).unwrap().contains(id))
            .count();
        assert_eq!(appearances, 1);
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut grid = grid();
        let start = Vec2::new(100.0, 100.0);
        let (mut world, id) = world_with_unit(start);
        grid.insert(id, start).unwrap();

        step_to(&mut world, id, Vec2::new(200.0, 100.0));
        let first = grid.update(&world);
        assert_eq!(first.migrated, 1);

        // No position change between calls: second pass must do nothing.
        // prev_position still differs from position, but the entity already
        // sits in its computed cell - the second update must not duplicate
        // or move it.
        world.snapshot_previous_positions();
        let second = grid.update(&world);
        assert_eq!(second, GridUpdateStats::default());

        assert_eq!(grid.cell(3, 1).unwrap().entities(), &[id]);
    }

    #[test]
    fn test_sub_cell_motion_skips() {
        let mut grid = grid();
        let start = Vec2::new(100.0, 100.0);
        let (mut world, id) = world_with_unit(start);
        grid.insert(id, start).unwrap();

        step_to(&mut world, id, Vec2::new(110.0, 100.0));
        let stats = grid.update(&world);

        assert_eq!(stats, GridUpdateStats::default());
        assert!(grid.cell(1, 1).unwrap().contains(id));
    }

    #[test]
    fn test_border_cell_is_excluded() {
        let mut grid = grid();
        let start = Vec2::new(100.0, 100.0);
        let (mut world, id) = world_with_unit(start);
        grid.insert(id, start).unwrap();

        // Exactly on the edge that maps to column cols-1: excluded
        step_to(&mut world, id, Vec2::new(7.0 * 64.0, 100.0));
        let stats = grid.update(&world);

        assert_eq!(stats.unindexed, 1);
        assert_eq!(stats.migrated, 0);
        // Previous bucket membership left intact
        assert!(grid.cell(1, 1).unwrap().contains(id));
    }

    #[test]
    fn test_full_cell_refuses_migration() {
        let mut grid = SpatialGrid::new(CELL, 8, 8, 1);
        let mut world = World::new(16, 48);

        let a_start = Vec2::new(100.0, 100.0);
        let b_start = Vec2::new(300.0, 100.0);
        let a = world.spawn_unit(Transform::at(a_start)).unwrap();
        let b = world.spawn_unit(Transform::at(b_start)).unwrap();
        grid.insert(a, a_start).unwrap();
        grid.insert(b, b_start).unwrap();

        // Both head for cell (3, 3); only one fits
        world.snapshot_previous_positions();
        world.transform_mut(a).unwrap().position = Vec2::new(200.0, 200.0);
        world.transform_mut(b).unwrap().position = Vec2::new(200.0, 200.0);
        let stats = grid.update(&world);

        assert_eq!(stats.migrated, 1);
        assert_eq!(stats.refused, 1);

        let dest = grid.cell(3, 3).unwrap();
        assert_eq!(dest.len(), 1);
        assert!(dest.contains(a));
        // The refused entity keeps its previous membership
        assert!(grid.cell(4, 1).unwrap().contains(b));
    }

    #[test]
    fn test_cells_overlapping_clamps() {
        let grid = grid();

        let window = grid.cells_overlapping(Rect::new(90.0, 90.0, 20.0, 20.0));
        assert_eq!(
            window,
            CellWindow {
                min_col: 1,
                min_row: 1,
                max_col: 1,
                max_row: 1
            }
        );

        // A rectangle past the border clamps to the indexable range
        let wide = grid.cells_overlapping(Rect::new(0.0, 0.0, 10_000.0, 10_000.0));
        assert_eq!(wide.max_col, 6);
        assert_eq!(wide.max_row, 6);

        // A rectangle entirely past the border is empty
        let outside = grid.cells_overlapping(Rect::new(9_000.0, 9_000.0, 10.0, 10.0));
        assert!(outside.is_empty());
        assert_eq!(outside.iter().count(), 0);
    }

    #[test]
    fn test_entities_in_window() {
        let mut grid = grid();
        let (_, id) = world_with_unit(Vec2::new(100.0, 100.0));
        grid.insert(id, Vec2::new(100.0, 100.0)).unwrap();

        let window = grid.cells_overlapping(Rect::new(0.0, 0.0, 300.0, 300.0));
        let ids: Vec<_> = grid.entities_in(window).collect();
        assert_eq!(ids, vec![id]);
    }
}
