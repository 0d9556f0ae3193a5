//! Simulation error types.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration rejected before any frame runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`SimConfig`](crate::SimConfig).
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Environment override could not be parsed.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Env {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// A quantity that must be a positive finite number.
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    /// No entities to simulate.
    #[error("entity count must be at least 1")]
    NoEntities,
}

/// Simulation setup error.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("scheduler error: {0}")]
    Tick(#[from] lumen_tick::TickError),
}
