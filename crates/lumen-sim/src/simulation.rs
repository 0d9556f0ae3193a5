//! Frame driver tying the entity store to the proximity engine.

use lumen_graph::{Edge, InteractionRadius};
use lumen_spatial::{CellIndex, GridDims, Position};
use lumen_tick::{FrameStats, Scheduler};
use tracing::{debug, info};

use crate::{EntityStore, Rotation, SimConfig, SimError};

/// Smallest radius reachable through [`Simulation::set_radius`].
const MIN_ADJUSTABLE_RADIUS: f32 = 10.0;

/// Speed multiplier bounds for [`Simulation::set_speed`].
const SPEED_RANGE: (f32, f32) = (0.1, 5.0);

/// A running simulation.
///
/// The cell index and edge list are rebuilt in full every frame and are only
/// handed out as shared slices, valid until the next call to [`frame`].
///
/// [`frame`]: Simulation::frame
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    store: EntityStore,
    grid: GridDims,
    radius: InteractionRadius,
    scheduler: Scheduler,
    index: CellIndex,
    edges: Vec<Edge>,
    frames: u64,
}

impl Simulation {
    /// Validate `config`, scatter the entities and set up the scheduler.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let store = EntityStore::scatter(config.count, config.width, config.height, config.seed);
        Self::with_store(config, store)
    }

    /// Like [`Simulation::new`] but with caller-provided entities.
    pub fn with_store(config: SimConfig, store: EntityStore) -> Result<Self, SimError> {
        config.validate()?;

        let scheduler = Scheduler::new(config.execution_mode())?;
        let grid = GridDims::for_radius(config.width, config.height, config.radius, config.min_cell_size);

        info!(
            entities = store.len(),
            grid_width = grid.width,
            grid_height = grid.height,
            cell_size = grid.cell_size,
            mode = ?config.mode,
            threads = scheduler.threads(),
            "simulation ready"
        );

        Ok(Self {
            radius: InteractionRadius::new(config.radius),
            config,
            store,
            grid,
            scheduler,
            index: CellIndex::new(),
            edges: Vec::new(),
            frames: 0,
        })
    }

    /// Advance by `dt` seconds: move entities, then rebuild the proximity graph.
    pub fn frame(&mut self, dt: f32) -> FrameStats {
        self.store
            .step(dt, self.config.speed, self.config.width, self.config.height);

        if self.config.rotation != Rotation::Off {
            let center = Position::new(self.config.width * 0.5, self.config.height * 0.5);
            let angle = self.config.rotation.sign() * self.config.rotation_speed * dt;
            self.store.rotate_about(center, angle);
        }

        self.rebuild()
    }

    /// Rebuild the grid and edges from the current positions without moving anything.
    pub fn rebuild(&mut self) -> FrameStats {
        let stats = self.scheduler.run_frame(
            &self.grid,
            self.store.positions(),
            self.radius,
            &mut self.index,
            &mut self.edges,
        );
        self.frames += 1;
        stats
    }

    /// Change the interaction radius. Values below 10 are raised to 10.
    /// The grid is resized to match.
    pub fn set_radius(&mut self, radius: f32) {
        let radius = if radius.is_finite() {
            radius.max(MIN_ADJUSTABLE_RADIUS)
        } else {
            MIN_ADJUSTABLE_RADIUS
        };
        self.config.radius = radius;
        self.radius = InteractionRadius::new(radius);
        self.grid = GridDims::for_radius(
            self.config.width,
            self.config.height,
            radius,
            self.config.min_cell_size,
        );
        debug!(
            radius,
            grid_width = self.grid.width,
            grid_height = self.grid.height,
            "radius changed"
        );
    }

    /// Change the speed multiplier, clamped to `[0.1, 5.0]`.
    pub fn set_speed(&mut self, speed: f32) {
        self.config.speed = speed.clamp(SPEED_RANGE.0, SPEED_RANGE.1);
    }

    /// Step the rotation through off → clockwise → counter-clockwise.
    pub fn cycle_rotation(&mut self) -> Rotation {
        self.config.rotation = self.config.rotation.next();
        self.config.rotation
    }

    /// Edges of the last frame.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Entity positions as of the last frame.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        self.store.positions()
    }

    /// Grid index of the last frame.
    #[must_use]
    pub const fn index(&self) -> &CellIndex {
        &self.index
    }

    #[must_use]
    pub const fn store(&self) -> &EntityStore {
        &self.store
    }

    #[must_use]
    pub const fn grid(&self) -> &GridDims {
        &self.grid
    }

    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Frames computed so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }
}
