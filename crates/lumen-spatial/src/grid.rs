//! Uniform grid geometry.

use crate::{CellCoord, CellId, CellOffset, Position};

/// Default lower bound for the cell edge length, in world units.
///
/// Very small radii would otherwise produce enormous, mostly empty grids.
pub const MIN_CELL_SIZE: f32 = 10.0;

/// Smallest cell size accepted at all. Keeps `v / cell_size` finite.
const CELL_SIZE_EPSILON: f32 = 1e-3;

/// Dimensions of a uniform 2D grid covering `[0, world_width) × [0, world_height)`.
///
/// Positions outside the world are clamped into the border cells, so every
/// entity maps to exactly one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridDims {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Cell edge length in world units.
    pub cell_size: f32,
}

impl GridDims {
    /// Create a grid covering the given world extent.
    #[must_use]
    pub fn new(world_width: f32, world_height: f32, cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() {
            cell_size.max(CELL_SIZE_EPSILON)
        } else {
            CELL_SIZE_EPSILON
        };

        Self {
            width: cells_along(world_width, cell_size),
            height: cells_along(world_height, cell_size),
            cell_size,
        }
    }

    /// Create a grid whose cells are sized to the interaction radius,
    /// but never smaller than `min_cell_size`.
    #[must_use]
    pub fn for_radius(world_width: f32, world_height: f32, radius: f32, min_cell_size: f32) -> Self {
        Self::new(world_width, world_height, radius.max(min_cell_size))
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Clamped cell coordinate of a world position.
    #[inline]
    #[must_use]
    pub fn coord_at(&self, position: Position) -> CellCoord {
        CellCoord::new(
            axis_cell(position.x, self.cell_size, self.width),
            axis_cell(position.y, self.cell_size, self.height),
        )
    }

    /// Cell containing a world position (clamped into the grid).
    #[inline]
    #[must_use]
    pub fn cell_at(&self, position: Position) -> CellId {
        let coord = self.coord_at(position);
        CellId(coord.y as u32 * self.width + coord.x as u32)
    }

    /// Cell ID of an in-bounds coordinate, `None` otherwise.
    #[inline]
    #[must_use]
    pub fn id_of(&self, coord: CellCoord) -> Option<CellId> {
        if coord.x >= 0 && coord.x < self.width as i32 && coord.y >= 0 && coord.y < self.height as i32 {
            Some(CellId(coord.y as u32 * self.width + coord.x as u32))
        } else {
            None
        }
    }

    /// Grid coordinate of a cell ID.
    #[inline]
    #[must_use]
    pub const fn coord_of(&self, id: CellId) -> CellCoord {
        CellCoord::new((id.0 % self.width) as i32, (id.0 / self.width) as i32)
    }

    /// Neighbor of `id` in direction `offset`, `None` past the grid border.
    #[inline]
    #[must_use]
    pub fn neighbor(&self, id: CellId, offset: CellOffset) -> Option<CellId> {
        self.id_of(self.coord_of(id).offset(offset.dx, offset.dy))
    }
}

fn cells_along(extent: f32, cell_size: f32) -> u32 {
    if !extent.is_finite() || extent <= 0.0 {
        return 1;
    }
    ((extent / cell_size).ceil() as u32).max(1)
}

/// `clamp(floor(v / cell_size), 0, dim - 1)`.
///
/// Divides rather than multiplying by a reciprocal so that exact multiples of
/// the cell size land in the upper cell. `as i64` saturates on infinities and
/// maps NaN to 0, so the clamp always lands in range.
#[inline]
fn axis_cell(v: f32, cell_size: f32, dim: u32) -> i32 {
    let cell = (v / cell_size).floor() as i64;
    cell.clamp(0, i64::from(dim) - 1) as i32
}
