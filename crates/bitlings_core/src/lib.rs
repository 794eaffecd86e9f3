//! # Bitlings Core
//!
//! The simulation engine behind Bitlings: small creatures that sense a shared
//! world, pick what to do with a tiny learned network and carry it out over
//! several ticks.
//!
//! This crate contains:
//! - The decision network (feedforward, reward-only online learning)
//! - Perception of the nearest food and obstacle
//! - Obstacle-avoiding steering
//! - The per-creature action state machine and needs model
//! - The world, its command queue and the fixed-order tick scheduler
//!
//! ## Example
//!
//! ```
//! use bitlings_core::brain::DecisionNetwork;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let mut network = DecisionNetwork::new_random_with_rng(4, &mut rng);
//! network.set_inputs(80.0, 80.0, 25.0, 1.0, 0.0);
//! network.evaluate(10);
//! let action = network.select_action();
//! println!("chose {action}");
//! ```

/// Feedforward decision network with reward-only reinforcement
pub mod brain;
/// Configuration management for simulation parameters
pub mod config;
/// Creature state: needs, identity and owned controller/network
pub mod creature;
/// Error types for the simulation core
pub mod error;
/// Creature construction
pub mod lifecycle;
/// Tick metrics and structured logging setup
pub mod metrics;
/// Nearest food and obstacle queries
pub mod perception;
/// Fixed-order tick loop, command queue and broadcast seam
pub mod scheduler;
/// Obstacle avoidance steering
pub mod steering;
/// Per-creature systems (needs, action state machine)
pub mod systems;
/// World state and its single-writer mutations
pub mod world;

pub use brain::DecisionNetwork;
pub use config::AppConfig;
pub use creature::Creature;
pub use error::{Result, SimError};
pub use metrics::{init_logging, Metrics};
pub use scheduler::{
    command_channel, BroadcastSink, CommandQueue, CommandSender, LoggingSink, Scheduler, TickReport,
};
pub use systems::action::{ActionController, ActionState};
pub use world::{TickOutcome, World};
