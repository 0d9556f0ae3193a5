//! Uniform grid spatial index
//!
//! Divides the world into square cells sized to the interaction radius and
//! buckets entities into them with a counting sort. The index is rebuilt from
//! scratch every frame and never persisted.
//!
//! # Layout
//!
//! ```text
//! counts:  [ 2 | 0 | 3 | 1 ]            entities per cell
//! offsets: [ 0 | 2 | 2 | 5 | 6 ]        exclusive prefix sum, len = cells + 1
//! items:   [ a b | | c d e | f ]        entity indices grouped by cell
//! ```
//!
//! Entities of cell `c` occupy `items[offsets[c]..offsets[c + 1]]`.
//!
//! Both a sequential and a data-parallel rebuild are provided. They produce the
//! same `counts` and `offsets`; ordering inside a cell is unspecified.

pub mod cell;
pub mod grid;
pub mod index;
pub mod parallel;
pub mod position;
pub mod scratch;
pub mod stencil;

pub use cell::{CellCoord, CellId};
pub use grid::{GridDims, MIN_CELL_SIZE};
pub use index::CellIndex;
pub use parallel::{PARALLEL_MIN_CELLS, PARALLEL_MIN_ENTITIES, should_parallelize};
pub use position::Position;
pub use scratch::RebuildScratch;
pub use stencil::{CellOffset, STENCIL};
