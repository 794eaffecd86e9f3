use bitlings_data::Needs;
use glam::DVec2;
use rand::Rng;
use uuid::Uuid;

use crate::brain::DecisionNetwork;
use crate::creature::Creature;

pub const SPAWN_HUNGER_MAX: u32 = 50;
pub const SPAWN_ENERGY_MIN: u32 = 80;

/// Fresh needs for a newborn: some hunger, mostly rested, full health.
pub fn spawn_needs_with_rng<R: Rng>(rng: &mut R) -> Needs {
    let mut needs = Needs {
        hunger: f64::from(rng.gen_range(0..=SPAWN_HUNGER_MAX)),
        energy: f64::from(rng.gen_range(SPAWN_ENERGY_MIN..=100)),
        ..Needs::default()
    };
    needs.refresh_stress();
    needs
}

pub fn new_id_with_rng<R: Rng>(rng: &mut R) -> Uuid {
    Uuid::from_u128(rng.gen::<u128>())
}

pub fn create_creature_with_rng<R: Rng>(
    position: DVec2,
    hidden_size: usize,
    rng: &mut R,
) -> Creature {
    let network = DecisionNetwork::new_random_with_rng(hidden_size, rng);
    let id = new_id_with_rng(rng);
    let needs = spawn_needs_with_rng(rng);
    Creature::new(id, position, needs, network)
}

pub fn create_creature(position: DVec2, hidden_size: usize) -> Creature {
    let mut rng = rand::thread_rng();
    create_creature_with_rng(position, hidden_size, &mut rng)
}
