//! Needs drift and the mood indicator.

use bitlings_data::Needs;

/// Hunger gained per second.
pub const HUNGER_RATE: f64 = 1.0;
/// Energy lost per second regardless of activity.
pub const ENERGY_DECAY: f64 = 0.5;
/// Mood lost per second for each distress condition.
pub const MOOD_PENALTY: f64 = 2.0;
/// Health lost per second while starving.
pub const STARVATION_DAMAGE: f64 = 1.0;
pub const HUNGER_DISTRESS: f64 = 80.0;
pub const ENERGY_DISTRESS: f64 = 20.0;
pub const MOOD_LOW: f64 = 30.0;
pub const MOOD_HIGH: f64 = 70.0;

pub const EMOJI_DEAD: &str = "💀";
pub const EMOJI_STARVING: &str = "😫";
pub const EMOJI_TIRED: &str = "😴";
pub const EMOJI_SAD: &str = "😟";
pub const EMOJI_HAPPY: &str = "😃";
pub const EMOJI_CONTENT: &str = "😊";

/// Advances needs by `dt` seconds. Returns `true` when health is exhausted.
pub fn update_passive(needs: &mut Needs, dt: f64) -> bool {
    needs.age += dt;
    needs.hunger = (needs.hunger + HUNGER_RATE * dt).min(Needs::MAX);
    needs.energy = (needs.energy - ENERGY_DECAY * dt).max(0.0);

    if needs.hunger > HUNGER_DISTRESS {
        needs.mood = (needs.mood - MOOD_PENALTY * dt).max(0.0);
    }
    if needs.energy < ENERGY_DISTRESS {
        needs.mood = (needs.mood - MOOD_PENALTY * dt).max(0.0);
    }
    if needs.hunger >= Needs::MAX {
        needs.health = (needs.health - STARVATION_DAMAGE * dt).max(0.0);
    }

    needs.refresh_stress();
    needs.health <= 0.0
}

#[must_use]
pub fn emoji_for(needs: &Needs, dead: bool) -> &'static str {
    if dead {
        EMOJI_DEAD
    } else if needs.hunger > HUNGER_DISTRESS {
        EMOJI_STARVING
    } else if needs.energy < ENERGY_DISTRESS {
        EMOJI_TIRED
    } else if needs.mood < MOOD_LOW {
        EMOJI_SAD
    } else if needs.mood > MOOD_HIGH {
        EMOJI_HAPPY
    } else {
        EMOJI_CONTENT
    }
}
