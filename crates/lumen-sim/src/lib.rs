//! Particle proximity simulation.
//!
//! Owns the entity store and drives one frame at a time:
//!
//! 1. Move every entity (bounce off the world borders, optional rotation)
//! 2. Rebuild the uniform grid from the new positions
//! 3. Join neighboring cells into a weighted edge list
//!
//! Steps 2 and 3 run through [`lumen_tick::Scheduler`], sequentially or on a
//! worker pool. The edge list and positions stay valid until the next frame.
//!
//! # Usage
//!
//! ```ignore
//! use lumen_sim::{SimConfig, Simulation};
//!
//! let mut sim = Simulation::new(SimConfig::from_env()?)?;
//! let stats = sim.frame(1.0 / 60.0);
//! for edge in sim.edges() {
//!     // draw a line from positions[edge.a] to positions[edge.b] with alpha edge.weight
//! }
//! ```

mod config;
mod error;
mod simulation;
mod store;

pub use config::{ModeKind, Rotation, SimConfig};
pub use error::{ConfigError, SimError};
pub use simulation::Simulation;
pub use store::{EntityStore, Velocity};
