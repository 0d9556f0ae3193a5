//! Flat entity storage and the per-entity motion update.

use bytemuck::{Pod, Zeroable};
use lumen_spatial::Position;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Initial speed range per axis, world units per second.
const SPAWN_SPEED: f32 = 60.0;

/// 2D velocity in world units per second.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Owns every entity's state. Entity `i` is `positions[i]` / `velocities[i]`.
///
/// Indices are dense and only stable within one frame. The grid index and
/// edge list refer to entities by these indices and never copy their data.
#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    positions: Vec<Position>,
    velocities: Vec<Velocity>,
}

impl EntityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` entities uniformly placed in `[0, width) × [0, height)` with
    /// random velocities. A seed of 0 draws one from the OS.
    #[must_use]
    pub fn scatter(count: usize, width: f32, height: f32, seed: u64) -> Self {
        let mut rng = if seed == 0 {
            StdRng::from_entropy()
        } else {
            StdRng::seed_from_u64(seed)
        };

        let mut store = Self {
            positions: Vec::with_capacity(count),
            velocities: Vec::with_capacity(count),
        };
        for _ in 0..count {
            store.push(
                Position::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height)),
                Velocity::new(
                    rng.gen_range(-SPAWN_SPEED..SPAWN_SPEED),
                    rng.gen_range(-SPAWN_SPEED..SPAWN_SPEED),
                ),
            );
        }
        store
    }

    /// Add an entity and return its index.
    pub fn push(&mut self, position: Position, velocity: Velocity) -> u32 {
        let id = self.positions.len() as u32;
        self.positions.push(position);
        self.velocities.push(velocity);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    #[must_use]
    pub fn velocities(&self) -> &[Velocity] {
        &self.velocities
    }

    /// Integrate positions and reflect off the world borders.
    ///
    /// Positions stay within `[0, width - 1] × [0, height - 1]`.
    pub fn step(&mut self, dt: f32, speed: f32, width: f32, height: f32) {
        let scale = speed * dt;
        let (max_x, max_y) = ((width - 1.0).max(0.0), (height - 1.0).max(0.0));

        for (p, v) in self.positions.iter_mut().zip(&mut self.velocities) {
            p.x += v.x * scale;
            p.y += v.y * scale;

            if p.x < 0.0 {
                p.x = 0.0;
                v.x = -v.x;
            }
            if p.x > max_x {
                p.x = max_x;
                v.x = -v.x;
            }
            if p.y < 0.0 {
                p.y = 0.0;
                v.y = -v.y;
            }
            if p.y > max_y {
                p.y = max_y;
                v.y = -v.y;
            }
        }
    }

    /// Rotate every position by `angle` radians around `center`.
    pub fn rotate_about(&mut self, center: Position, angle: f32) {
        let (s, c) = angle.sin_cos();
        for p in &mut self.positions {
            let rx = p.x - center.x;
            let ry = p.y - center.y;
            p.x = rx * c - ry * s + center.x;
            p.y = rx * s + ry * c + center.y;
        }
    }
}
