//! Shared world state.
//!
//! The world is mutated only from the tick loop. Creatures are moved out of
//! the world while they are stepped so each one can read and edit the food
//! list through `&mut World` without aliasing itself.

use std::panic::{catch_unwind, AssertUnwindSafe};

use bitlings_data::{FoodItem, FoodView, Obstacle, ObstacleView, WorldCommand, WorldSnapshot};
use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::creature::Creature;
use crate::error::{Result, SimError};
use crate::lifecycle;

pub const OBSTACLE_EMOJIS: [&str; 2] = ["🪨", "🌲"];

/// Bookkeeping for one call to [`World::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Dead creatures removed before stepping.
    pub pruned: usize,
    pub food_eaten: usize,
    /// Creature steps that panicked and were skipped.
    pub faults: usize,
}

pub struct World {
    pub width: f64,
    pub height: f64,
    pub creatures: Vec<Creature>,
    pub food: Vec<FoodItem>,
    pub obstacles: Vec<Obstacle>,
    pub config: AppConfig,
    pub rng: ChaCha8Rng,
    pub tick: u64,
}

impl World {
    /// Builds a world and populates it from `config.world`.
    pub fn new(config: AppConfig) -> Self {
        let rng = match config.world.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut world = Self {
            width: config.world.width,
            height: config.world.height,
            creatures: Vec::new(),
            food: Vec::new(),
            obstacles: Vec::new(),
            config,
            rng,
            tick: 0,
        };
        world.populate();
        world
    }

    fn populate(&mut self) {
        let world_config = self.config.world.clone();

        for _ in 0..world_config.initial_obstacles {
            let position = self.random_position();
            let radius = self
                .rng
                .gen_range(world_config.obstacle_radius_min..=world_config.obstacle_radius_max);
            self.add_obstacle(position, radius);
        }
        for _ in 0..world_config.initial_food {
            let position = self.random_position();
            self.add_food_at(position);
        }
        for _ in 0..world_config.initial_creatures {
            self.spawn_creature();
        }

        tracing::info!(
            creatures = self.creatures.len(),
            food = self.food.len(),
            obstacles = self.obstacles.len(),
            width = self.width,
            height = self.height,
            "World populated"
        );
    }

    pub fn random_position(&mut self) -> DVec2 {
        DVec2::new(
            self.rng.gen_range(0.0..=self.width),
            self.rng.gen_range(0.0..=self.height),
        )
    }

    #[must_use]
    pub fn clamp_to_bounds(&self, position: DVec2) -> DVec2 {
        DVec2::new(
            position.x.clamp(0.0, self.width),
            position.y.clamp(0.0, self.height),
        )
    }

    pub fn spawn_creature(&mut self) -> Uuid {
        let position = self.random_position();
        let creature =
            lifecycle::create_creature_with_rng(position, self.config.brain.hidden_size, &mut self.rng);
        let id = creature.id;
        self.creatures.push(creature);
        id
    }

    /// Appends an already built creature, e.g. one with a hand-made network.
    pub fn insert_creature(&mut self, creature: Creature) {
        self.creatures.push(creature);
    }

    /// Places food at `position`, clamped into bounds.
    pub fn add_food_at(&mut self, position: DVec2) -> Uuid {
        let id = lifecycle::new_id_with_rng(&mut self.rng);
        let position = self.clamp_to_bounds(position);
        self.food.push(FoodItem::new(id, position));
        id
    }

    /// Places food at `(x, y)`, or anywhere when either coordinate is missing.
    pub fn add_food(&mut self, x: Option<f64>, y: Option<f64>) -> Result<Uuid> {
        for (axis, value) in [("x", x), ("y", y)] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(SimError::invalid_command(format!(
                        "add_food {axis} must be finite, got {v}"
                    )));
                }
            }
        }
        let position = match (x, y) {
            (Some(x), Some(y)) => DVec2::new(x, y),
            _ => self.random_position(),
        };
        Ok(self.add_food_at(position))
    }

    pub fn add_obstacle(&mut self, position: DVec2, radius: f64) -> Uuid {
        let id = lifecycle::new_id_with_rng(&mut self.rng);
        let emoji = OBSTACLE_EMOJIS[self.rng.gen_range(0..OBSTACLE_EMOJIS.len())];
        self.obstacles.push(Obstacle {
            id,
            position,
            radius,
            emoji: emoji.to_string(),
        });
        id
    }

    /// Removes the food with `id`. Returns `false` if it was already gone.
    pub fn remove_food(&mut self, id: Uuid) -> bool {
        match self.food.iter().position(|f| f.id == id) {
            Some(idx) => {
                self.food.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn apply_command(&mut self, command: &WorldCommand) -> Result<()> {
        match *command {
            WorldCommand::AddFood { x, y } => {
                let id = self.add_food(x, y)?;
                tracing::debug!(%id, ?x, ?y, "Food added by command");
            }
        }
        Ok(())
    }

    /// Drops creatures that died on an earlier tick and have health at zero.
    pub fn prune_dead(&mut self) -> usize {
        let before = self.creatures.len();
        self.creatures
            .retain(|c| !(c.is_dead() && c.needs.health <= 0.0));
        before - self.creatures.len()
    }

    /// Steps every creature once, in list order.
    ///
    /// A panic inside one creature's step is logged and counted; the creature
    /// is kept and the remaining creatures still run.
    pub fn update_creatures(&mut self, dt: f64) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        let mut creatures = std::mem::take(&mut self.creatures);

        for creature in creatures.iter_mut() {
            let id = creature.id;
            match catch_unwind(AssertUnwindSafe(|| creature.step(self, dt))) {
                Ok(output) => {
                    if output.food_eaten {
                        outcome.food_eaten += 1;
                    }
                }
                Err(panic) => {
                    let reason = panic
                        .downcast_ref::<&str>()
                        .map(|s| (*s).to_string())
                        .or_else(|| panic.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_string());
                    tracing::error!(%id, %reason, "Creature update failed");
                    outcome.faults += 1;
                }
            }
        }

        creatures.append(&mut self.creatures);
        self.creatures = creatures;
        outcome
    }

    /// Prune, then step. Commands are applied by the caller beforehand.
    pub fn update(&mut self, dt: f64) -> TickOutcome {
        let pruned = self.prune_dead();
        let mut outcome = self.update_creatures(dt);
        outcome.pruned = pruned;
        self.tick += 1;
        outcome
    }

    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            creatures: self.creatures.iter().map(Creature::view).collect(),
            food: self.food.iter().map(FoodView::from).collect(),
            obstacles: self.obstacles.iter().map(ObstacleView::from).collect(),
        }
    }
}
