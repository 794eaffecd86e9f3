//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration structures that map to the `config.toml`
//! file. Behavioural constants of the creatures themselves (speeds, decay
//! rates, timers) are fixed in their systems; this file covers the world,
//! the network size, the tick rate and the observer server.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 1000.0
//! height = 1000.0
//! initial_creatures = 5
//! initial_food = 10
//! initial_obstacles = 5
//! obstacle_radius_min = 10.0
//! obstacle_radius_max = 40.0
//! seed = 42
//!
//! [brain]
//! hidden_size = 4
//! settle_iterations = 10
//!
//! [scheduler]
//! tick_interval_ms = 100
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8765
//! broadcast_capacity = 16
//! ```

use serde::{Deserialize, Serialize};

/// World dimensions and initial population.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub initial_creatures: usize,
    pub initial_food: usize,
    pub initial_obstacles: usize,
    pub obstacle_radius_min: f64,
    pub obstacle_radius_max: f64,
    /// Seeds the world RNG. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            initial_creatures: 5,
            initial_food: 10,
            initial_obstacles: 5,
            obstacle_radius_min: 10.0,
            obstacle_radius_max: 40.0,
            seed: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BrainConfig {
    pub hidden_size: usize,
    pub settle_iterations: usize,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            hidden_size: crate::brain::DEFAULT_HIDDEN_SIZE,
            settle_iterations: crate::brain::DEFAULT_SETTLE_ITERATIONS,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SchedulerConfig {
    pub tick_interval_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
        }
    }
}

/// Observer server binding.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Snapshots buffered per observer before a slow one starts skipping.
    pub broadcast_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8765,
            broadcast_capacity: 16,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub brain: BrainConfig,
    pub scheduler: SchedulerConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World validation
        anyhow::ensure!(
            self.world.width.is_finite() && self.world.width > 0.0,
            "World width must be positive"
        );
        anyhow::ensure!(
            self.world.height.is_finite() && self.world.height > 0.0,
            "World height must be positive"
        );
        anyhow::ensure!(
            self.world.initial_creatures <= 10000,
            "Initial creatures too large (max 10000)"
        );
        anyhow::ensure!(
            self.world.initial_food <= 10000,
            "Initial food too large (max 10000)"
        );
        anyhow::ensure!(
            self.world.obstacle_radius_min >= 0.0,
            "Obstacle radius min must be non-negative"
        );
        anyhow::ensure!(
            self.world.obstacle_radius_max >= self.world.obstacle_radius_min,
            "Obstacle radius max must not be below radius min"
        );

        // Brain validation
        anyhow::ensure!(self.brain.hidden_size > 0, "Hidden size must be positive");
        anyhow::ensure!(
            self.brain.hidden_size <= 256,
            "Hidden size too large (max 256)"
        );
        anyhow::ensure!(
            self.brain.settle_iterations > 0,
            "Settle iterations must be positive"
        );

        // Scheduler validation
        anyhow::ensure!(
            self.scheduler.tick_interval_ms > 0,
            "Tick interval must be positive"
        );
        anyhow::ensure!(
            self.scheduler.tick_interval_ms <= 10_000,
            "Tick interval too long (max 10000 ms)"
        );

        // Server validation
        anyhow::ensure!(
            self.server.broadcast_capacity > 0,
            "Broadcast capacity must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.scheduler.tick_interval_ms)
    }
}
