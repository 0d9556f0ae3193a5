//! Simulation configuration.
//!
//! Defaults, then an optional JSON file named by `LUMEN_CONFIG`, then
//! `LUMEN_*` environment overrides:
//!
//! | Variable               | Field           |
//! |------------------------|-----------------|
//! | `LUMEN_WIDTH`          | `width`         |
//! | `LUMEN_HEIGHT`         | `height`        |
//! | `LUMEN_COUNT`          | `count`         |
//! | `LUMEN_RADIUS`         | `radius`        |
//! | `LUMEN_SPEED`          | `speed`         |
//! | `LUMEN_MIN_CELL_SIZE`  | `min_cell_size` |
//! | `LUMEN_MODE`           | `mode`          |
//! | `LUMEN_THREADS`        | `threads`       |
//! | `LUMEN_SEED`           | `seed`          |
//! | `LUMEN_ROTATION`       | `rotation`      |

use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use lumen_spatial::MIN_CELL_SIZE;
use lumen_tick::ExecutionMode;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Which scheduler path the simulation may use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    #[default]
    Sequential,
    Parallel,
}

impl FromStr for ModeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "seq" | "sequential" => Ok(Self::Sequential),
            "par" | "parallel" => Ok(Self::Parallel),
            other => Err(format!("expected `sequential` or `parallel`, got `{other}`")),
        }
    }
}

/// Rigid rotation of the whole scene around the world center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    #[default]
    Off,
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    /// Sign applied to the rotation speed.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Off => 0.0,
            Self::Clockwise => 1.0,
            Self::CounterClockwise => -1.0,
        }
    }

    /// Off → clockwise → counter-clockwise → off.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Off => Self::Clockwise,
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Off,
        }
    }
}

impl FromStr for Rotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(Self::Off),
            "cw" | "clockwise" => Ok(Self::Clockwise),
            "ccw" | "counter_clockwise" | "counterclockwise" => Ok(Self::CounterClockwise),
            other => Err(format!("expected `off`, `cw` or `ccw`, got `{other}`")),
        }
    }
}

/// Everything needed to set up a [`Simulation`](crate::Simulation).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// World width in world units.
    pub width: f32,
    /// World height in world units.
    pub height: f32,
    /// Number of entities.
    pub count: usize,
    /// Interaction radius.
    pub radius: f32,
    /// Velocity multiplier.
    pub speed: f32,
    /// Grid cells are never smaller than this.
    pub min_cell_size: f32,
    pub mode: ModeKind,
    /// Worker threads in parallel mode, 0 for the runtime default.
    pub threads: usize,
    /// RNG seed for the initial scatter, 0 for a random seed.
    pub seed: u64,
    pub rotation: Rotation,
    /// Rotation speed in radians per second.
    pub rotation_speed: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            count: 400,
            radius: 120.0,
            speed: 1.0,
            min_cell_size: MIN_CELL_SIZE,
            mode: ModeKind::Sequential,
            threads: 0,
            seed: 0,
            rotation: Rotation::Off,
            rotation_speed: 1.6,
        }
    }
}

impl SimConfig {
    /// Defaults, then `LUMEN_CONFIG`, then `LUMEN_*` overrides. Not validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var_os("LUMEN_CONFIG") {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `LUMEN_*` overrides looked up through `lookup`.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        override_from(&lookup, "LUMEN_WIDTH", &mut self.width)?;
        override_from(&lookup, "LUMEN_HEIGHT", &mut self.height)?;
        override_from(&lookup, "LUMEN_COUNT", &mut self.count)?;
        override_from(&lookup, "LUMEN_RADIUS", &mut self.radius)?;
        override_from(&lookup, "LUMEN_SPEED", &mut self.speed)?;
        override_from(&lookup, "LUMEN_MIN_CELL_SIZE", &mut self.min_cell_size)?;
        override_from(&lookup, "LUMEN_MODE", &mut self.mode)?;
        override_from(&lookup, "LUMEN_THREADS", &mut self.threads)?;
        override_from(&lookup, "LUMEN_SEED", &mut self.seed)?;
        override_from(&lookup, "LUMEN_ROTATION", &mut self.rotation)?;
        Ok(self)
    }

    /// Reject values the proximity engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("radius", self.radius)?;
        positive("speed", self.speed)?;
        positive("min_cell_size", self.min_cell_size)?;
        if !self.rotation_speed.is_finite() {
            return Err(ConfigError::NotPositive {
                field: "rotation_speed",
                value: self.rotation_speed,
            });
        }
        if self.count == 0 {
            return Err(ConfigError::NoEntities);
        }
        Ok(())
    }

    /// Scheduler mode for this configuration.
    #[must_use]
    pub const fn execution_mode(&self) -> ExecutionMode {
        match self.mode {
            ModeKind::Sequential => ExecutionMode::Sequential,
            ModeKind::Parallel => ExecutionMode::Parallel {
                threads: self.threads,
            },
        }
    }
}

fn override_from<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    slot: &mut T,
) -> Result<(), ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(value) = lookup(key) else {
        return Ok(());
    };
    *slot = value.trim().parse().map_err(|e: T::Err| ConfigError::Env {
        key,
        reason: e.to_string(),
        value,
    })?;
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}
