pub mod macros;

use std::sync::{Arc, Mutex};

use bitlings_lib::model::brain::{DecisionNetwork, NETWORK_INPUTS, NETWORK_OUTPUTS};
use bitlings_lib::model::config::AppConfig;
use bitlings_lib::model::creature::Creature;
use bitlings_lib::model::data::{Action, Needs, WorldSnapshot};
use bitlings_lib::model::scheduler::BroadcastSink;
use bitlings_lib::model::world::World;
use glam::DVec2;
use rand::SeedableRng;
use uuid::Uuid;

type WorldMod = Box<dyn FnOnce(&mut World)>;

/// Builds an empty, seeded world and fills it with exactly what a test asks
/// for.
#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    creatures: Vec<Creature>,
    mods: Vec<WorldMod>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.initial_creatures = 0;
        config.world.initial_food = 0;
        config.world.initial_obstacles = 0;
        config.world.seed = Some(42);
        Self {
            config,
            creatures: Vec::new(),
            mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_food(mut self, x: f64, y: f64) -> Self {
        self.mods.push(Box::new(move |world| {
            world.add_food_at(DVec2::new(x, y));
        }));
        self
    }

    pub fn with_obstacle(mut self, x: f64, y: f64, radius: f64) -> Self {
        self.mods.push(Box::new(move |world| {
            world.add_obstacle(DVec2::new(x, y), radius);
        }));
        self
    }

    pub fn with_creature(mut self, creature: Creature) -> Self {
        self.creatures.push(creature);
        self
    }

    pub fn build(self) -> World {
        let mut world = World::new(self.config);
        for modifier in self.mods {
            modifier(&mut world);
        }
        for creature in self.creatures {
            world.insert_creature(creature);
        }
        world
    }
}

/// Builds a creature with chosen needs and, optionally, a network rigged to
/// always pick one action.
#[allow(dead_code)]
pub struct CreatureBuilder {
    id: Uuid,
    position: DVec2,
    needs: Needs,
    favored: Option<Action>,
    seed: u64,
}

#[allow(dead_code)]
impl CreatureBuilder {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            position: DVec2::new(500.0, 500.0),
            needs: Needs::default(),
            favored: None,
            seed: 7,
        }
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = DVec2::new(x, y);
        self
    }

    pub fn hunger(mut self, hunger: f64) -> Self {
        self.needs.hunger = hunger;
        self
    }

    pub fn energy(mut self, energy: f64) -> Self {
        self.needs.energy = energy;
        self
    }

    pub fn health(mut self, health: f64) -> Self {
        self.needs.health = health;
        self
    }

    pub fn mood(mut self, mood: f64) -> Self {
        self.needs.mood = mood;
        self
    }

    /// Makes the network pick `action` whatever it senses.
    pub fn favoring(mut self, action: Action) -> Self {
        self.favored = Some(action);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Creature {
        let network = match self.favored {
            Some(action) => favoring_network(action),
            None => {
                let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(self.seed);
                DecisionNetwork::new_random_with_rng(4, &mut rng)
            }
        };
        let mut needs = self.needs;
        needs.refresh_stress();
        Creature::new(self.id, self.position, needs, network)
    }
}

/// A network whose output bias for `action` dwarfs everything else.
#[allow(dead_code)]
pub fn favoring_network(action: Action) -> DecisionNetwork {
    let hidden = 2;
    let mut bias_output = [0.0; NETWORK_OUTPUTS];
    if let Some(index) = action.decision_index() {
        bias_output[index] = 20.0;
    }
    DecisionNetwork::from_parts(
        hidden,
        vec![0.1; NETWORK_INPUTS * hidden],
        vec![0.0; hidden * NETWORK_OUTPUTS],
        vec![0.0; hidden],
        bias_output,
    )
    .expect("favoring network shape")
}

/// Keeps every snapshot it is handed.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub snapshots: Arc<Mutex<Vec<WorldSnapshot>>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn len(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<WorldSnapshot> {
        self.snapshots.lock().unwrap().last().cloned()
    }
}

impl BroadcastSink for RecordingSink {
    fn send(&self, snapshot: &WorldSnapshot) {
        self.snapshots.lock().unwrap().push(snapshot.clone());
    }
}
