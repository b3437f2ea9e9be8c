//! Simulation settings
//!
//! Loaded from a JSON file; every field falls back to its default.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::{Bounds, CollisionPolicy, DotRanges};

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Clock cadence (ticks per second)
    pub tick_rate_hz: u32,
    /// Arena rectangle
    pub bounds: Bounds,

    // === Circle spawner ===
    /// Dots per spawned circle
    pub circle_count: usize,
    /// Circle radius around the arena origin
    pub circle_radius: f64,

    // === Randomness ===
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Ranges for random dot parameters
    pub ranges: DotRanges,

    // === Physics ===
    pub collision_policy: CollisionPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICK_RATE_HZ,
            bounds: Bounds::default(),
            circle_count: CIRCLE_COUNT,
            circle_radius: CIRCLE_RADIUS,
            seed: None,
            ranges: DotRanges::default(),
            collision_policy: CollisionPolicy::default(),
        }
    }
}

impl SimConfig {
    /// Check every value the simulator relies on.
    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_hz == 0 {
            return Err(Error::InvalidParam("tick_rate_hz must be > 0".into()));
        }
        self.bounds.validate()?;
        if !self.circle_radius.is_finite() || self.circle_radius < 0.0 {
            return Err(Error::InvalidParam(
                "circle_radius must be finite and >= 0".into(),
            ));
        }
        self.ranges.validate()
    }

    /// Time between ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz.max(1) as f64)
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
