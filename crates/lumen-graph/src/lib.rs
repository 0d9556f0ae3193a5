//! Proximity join over the uniform grid.
//!
//! Turns a rebuilt [`CellIndex`] into a weighted edge list: one [`Edge`] per
//! unordered pair of entities within the interaction radius, weighted
//! `1 - d² / r²`.
//!
//! The join walks every cell with the half-neighborhood [`STENCIL`], so each
//! pair of adjacent cells is visited once and pairs inside a cell are taken
//! with `i < j`. No edge is ever emitted twice and no entity is paired with
//! itself.
//!
//! [`CellIndex`]: lumen_spatial::CellIndex
//! [`STENCIL`]: lumen_spatial::STENCIL

mod buffers;
mod edge;
mod join;
mod parallel;
mod radius;

pub use buffers::{CellDispenser, EdgeBuffers};
pub use edge::{Edge, total_weight};
pub use join::join;
pub use parallel::join_parallel;
pub use radius::{InteractionRadius, MIN_RADIUS};
