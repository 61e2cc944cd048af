//! Tile grid collider
//!
//! A `rows x cols` table of solid/empty cells hanging from the collider's
//! origin. Cell `(col, row)` covers `origin + (col, row) * tile_size` up to
//! the next cell boundary.

use std::ops::Range;

use crate::foundation::math::{utils, Vec2};
use super::hitbox::hitbox_intersects_segment;
use super::primitives::Aabb;
use super::CollisionError;

/// Occupancy grid of equally sized tiles
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    columns: usize,
    rows: usize,
    tile_size: Vec2,
    /// Row-major, always `rows * columns` long
    cells: Vec<bool>,
}

impl Grid {
    /// Creates an empty grid
    pub fn new(columns: usize, rows: usize, tile_size: Vec2) -> Result<Self, CollisionError> {
        validate_dimensions(columns, rows)?;
        validate_tile_size(tile_size)?;

        Ok(Self {
            columns,
            rows,
            tile_size,
            cells: vec![false; columns * rows],
        })
    }

    /// Creates a grid from rows of `0`/`1` characters, one line per row
    ///
    /// Blank lines and surrounding whitespace are ignored; every row must
    /// have the same length.
    pub fn from_bitstring(text: &str, tile_size: Vec2) -> Result<Self, CollisionError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let columns = lines.first().map_or(0, |line| line.chars().count());
        let mut grid = Self::new(columns, lines.len(), tile_size)?;

        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != columns {
                return Err(CollisionError::InvalidGrid(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    line.chars().count(),
                    columns
                )));
            }

            for (column, ch) in line.chars().enumerate() {
                let solid = match ch {
                    '1' => true,
                    '0' => false,
                    other => {
                        return Err(CollisionError::InvalidGrid(format!(
                            "unexpected character '{}' at row {}, column {}",
                            other, row, column
                        )))
                    }
                };
                grid.set(column, row, solid);
            }
        }

        Ok(grid)
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Size of a single tile
    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    /// Change the tile size; both components must be positive
    pub fn set_tile_size(&mut self, tile_size: Vec2) -> Result<(), CollisionError> {
        validate_tile_size(tile_size)?;
        self.tile_size = tile_size;
        Ok(())
    }

    /// Change the grid dimensions
    ///
    /// The occupancy table is reallocated and every cell starts empty.
    pub fn resize(&mut self, columns: usize, rows: usize) -> Result<(), CollisionError> {
        validate_dimensions(columns, rows)?;

        self.columns = columns;
        self.rows = rows;
        self.cells = vec![false; columns * rows];
        Ok(())
    }

    /// Whether a cell is solid; cells outside the grid are empty
    pub fn get(&self, column: usize, row: usize) -> bool {
        self.index(column, row).map_or(false, |index| self.cells[index])
    }

    /// Set a cell, returning `false` if it lies outside the grid
    pub fn set(&mut self, column: usize, row: usize, solid: bool) -> bool {
        match self.index(column, row) {
            Some(index) => {
                self.cells[index] = solid;
                true
            }
            None => false,
        }
    }

    /// Set a rectangle of cells; the part outside the grid is ignored
    pub fn set_rect(&mut self, column: usize, row: usize, width: usize, height: usize, solid: bool) {
        let column_end = column.saturating_add(width).min(self.columns);
        let row_end = row.saturating_add(height).min(self.rows);

        for r in row..row_end {
            for c in column..column_end {
                self.cells[r * self.columns + c] = solid;
            }
        }
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Number of solid cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&solid| solid).count()
    }

    /// Total size covered by the grid
    #[allow(clippy::cast_precision_loss)]
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.columns as f32 * self.tile_size.x,
            self.rows as f32 * self.tile_size.y,
        )
    }

    /// World-space bounds for a frame origin
    pub fn bounds_at(&self, origin: Vec2) -> Aabb {
        Aabb::from_position_size(origin, self.world_size())
    }

    /// Point test with half-open cells: the point must lie in
    /// `[left, right) x [top, bottom)` and its cell must be solid
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn contains_point(&self, origin: Vec2, point: Vec2) -> bool {
        let local = point - origin;
        let extent = self.world_size();

        // Written positively so NaN coordinates fall outside
        if !(local.x >= 0.0 && local.x < extent.x && local.y >= 0.0 && local.y < extent.y) {
            return false;
        }

        let cell = local.component_div(&self.tile_size);
        // Float rounding can land exactly on the far boundary
        let column = (cell.x.floor() as usize).min(self.columns - 1);
        let row = (cell.y.floor() as usize).min(self.rows - 1);
        self.get(column, row)
    }

    /// Box test against the solid cells the box covers
    ///
    /// Edges that fall inside a cell include that cell, so a box reaching a
    /// quarter of the way into a tile still hits it. A box edge lying exactly
    /// on a cell boundary does not reach into the next cell.
    pub fn overlaps_aabb(&self, origin: Vec2, other: &Aabb) -> bool {
        if !self.bounds_at(origin).overlaps(other) {
            return false;
        }

        let near = (other.min - origin).component_div(&self.tile_size);
        let far = (other.max - origin).component_div(&self.tile_size);

        let columns = clamp_cell(near.x.floor(), self.columns)..clamp_cell(far.x.ceil(), self.columns);
        let rows = clamp_cell(near.y.floor(), self.rows)..clamp_cell(far.y.ceil(), self.rows);

        self.any_solid(columns, rows)
    }

    /// Whether any cell in the given ranges is solid; empty ranges are not
    pub fn any_solid(&self, columns: Range<usize>, mut rows: Range<usize>) -> bool {
        rows.any(|row| columns.clone().any(|column| self.get(column, row)))
    }

    /// World-space bounds of a single cell
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_bounds(&self, origin: Vec2, column: usize, row: usize) -> Aabb {
        let min = origin + Vec2::new(column as f32 * self.tile_size.x, row as f32 * self.tile_size.y);
        Aabb::from_position_size(min, self.tile_size)
    }

    /// Segment test against every solid cell the segment's extent touches
    ///
    /// Each candidate cell is tested as a hitbox, so grazing a cell corner
    /// counts while a segment lying along an empty row does not.
    pub fn intersects_segment(&self, origin: Vec2, start: Vec2, end: Vec2) -> bool {
        let near = (utils::min(start, end) - origin).component_div(&self.tile_size);
        let far = (utils::max(start, end) - origin).component_div(&self.tile_size);

        let columns = clamp_cell(near.x.floor(), self.columns)..clamp_cell(far.x.floor() + 1.0, self.columns);
        let rows = clamp_cell(near.y.floor(), self.rows)..clamp_cell(far.y.floor() + 1.0, self.rows);

        rows.flat_map(|row| columns.clone().map(move |column| (column, row)))
            .filter(|&(column, row)| self.get(column, row))
            .any(|(column, row)| hitbox_intersects_segment(&self.cell_bounds(origin, column, row), start, end))
    }

    /// Outline segments of the solid cells in world space
    ///
    /// An edge shared by two solid cells is interior and skipped, so a solid
    /// block yields only its perimeter.
    pub fn outline_edges(&self, origin: Vec2) -> Vec<(Vec2, Vec2)> {
        let mut edges = Vec::new();

        for row in 0..self.rows {
            for column in 0..self.columns {
                if !self.get(column, row) {
                    continue;
                }

                let cell = self.cell_bounds(origin, column, row);
                let (min, max) = (cell.min, cell.max);
                let top_right = Vec2::new(max.x, min.y);
                let bottom_left = Vec2::new(min.x, max.y);

                let solid_above = row.checked_sub(1).map_or(false, |r| self.get(column, r));
                let solid_below = self.get(column, row + 1);
                let solid_left = column.checked_sub(1).map_or(false, |c| self.get(c, row));
                let solid_right = self.get(column + 1, row);

                if !solid_above {
                    edges.push((min, top_right));
                }
                if !solid_right {
                    edges.push((top_right, max));
                }
                if !solid_below {
                    edges.push((max, bottom_left));
                }
                if !solid_left {
                    edges.push((bottom_left, min));
                }
            }
        }

        edges
    }

    fn index(&self, column: usize, row: usize) -> Option<usize> {
        (column < self.columns && row < self.rows).then(|| row * self.columns + column)
    }
}

/// Clamp a floored/ceiled cell coordinate into `[0, limit]`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_cell(value: f32, limit: usize) -> usize {
    if value <= 0.0 || value.is_nan() {
        0
    } else {
        (value as usize).min(limit)
    }
}

fn validate_dimensions(columns: usize, rows: usize) -> Result<(), CollisionError> {
    if columns == 0 || rows == 0 {
        return Err(CollisionError::InvalidGrid(format!(
            "grid must have at least one column and one row, got {}x{}",
            columns, rows
        )));
    }
    Ok(())
}

fn validate_tile_size(tile_size: Vec2) -> Result<(), CollisionError> {
    // Written so NaN fails as well
    if !(tile_size.x > 0.0 && tile_size.y > 0.0) {
        return Err(CollisionError::InvalidGrid(format!(
            "tile size must be positive, got {:?}",
            tile_size
        )));
    }
    Ok(())
}
