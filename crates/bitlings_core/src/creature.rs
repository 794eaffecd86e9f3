use bitlings_data::data::snapshot::round1;
use bitlings_data::{Action, CreatureView, Needs};
use glam::DVec2;
use uuid::Uuid;

use crate::brain::DecisionNetwork;
use crate::systems::action::{ActionController, ActionEntity, ActionOutput, ActionState};
use crate::systems::biological;
use crate::world::World;

/// A single Bitling: where it is, how it feels, and what it is doing.
#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    pub id: Uuid,
    pub position: DVec2,
    pub needs: Needs,
    pub controller: ActionController,
    pub network: DecisionNetwork,
}

impl Creature {
    #[must_use]
    pub fn new(id: Uuid, position: DVec2, needs: Needs, network: DecisionNetwork) -> Self {
        Self {
            id,
            position,
            needs,
            controller: ActionController::new(),
            network,
        }
    }

    #[must_use]
    pub fn action(&self) -> Action {
        self.controller.action()
    }

    #[must_use]
    pub fn state(&self) -> &ActionState {
        self.controller.state()
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.controller.is_dead()
    }

    #[must_use]
    pub fn emoji(&self) -> &'static str {
        biological::emoji_for(&self.needs, self.is_dead())
    }

    /// Needs drift. Dead creatures are left untouched.
    pub fn update_passive(&mut self, dt: f64) {
        if self.is_dead() {
            return;
        }
        if biological::update_passive(&mut self.needs, dt) {
            tracing::debug!(id = %self.id, age = self.needs.age, "Creature died");
            self.controller.mark_dead();
        }
    }

    pub fn choose(&mut self, world: &mut World) {
        let entity = ActionEntity {
            position: &mut self.position,
            needs: &mut self.needs,
            network: &mut self.network,
        };
        self.controller.choose(entity, world);
    }

    pub fn execute(&mut self, world: &mut World, dt: f64) -> ActionOutput {
        let entity = ActionEntity {
            position: &mut self.position,
            needs: &mut self.needs,
            network: &mut self.network,
        };
        self.controller.execute(entity, world, dt)
    }

    /// One full creature step: needs, decision, then action.
    pub fn step(&mut self, world: &mut World, dt: f64) -> ActionOutput {
        self.update_passive(dt);
        self.choose(world);
        self.execute(world, dt)
    }

    #[must_use]
    pub fn view(&self) -> CreatureView {
        CreatureView {
            id: self.id,
            x: round1(self.position.x),
            y: round1(self.position.y),
            emoji: self.emoji().to_string(),
            action: self.action(),
            health: self.needs.health.round() as i64,
            hunger: self.needs.hunger.round() as i64,
            energy: self.needs.energy.round() as i64,
            mood: self.needs.mood.round() as i64,
            stress: self.needs.stress.round() as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::DEFAULT_HIDDEN_SIZE;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn creature() -> Creature {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        Creature::new(
            Uuid::nil(),
            DVec2::new(12.345, 67.891),
            Needs {
                hunger: 20.4,
                energy: 79.6,
                ..Needs::default()
            },
            DecisionNetwork::new_random_with_rng(DEFAULT_HIDDEN_SIZE, &mut rng),
        )
    }

    #[test]
    fn test_view_rounds() {
        let mut c = creature();
        c.needs.refresh_stress();
        let view = c.view();
        assert_eq!(view.x, 12.3);
        assert_eq!(view.y, 67.9);
        assert_eq!(view.hunger, 20);
        assert_eq!(view.energy, 80);
        assert_eq!(view.health, 100);
        assert_eq!(view.stress, 20);
        assert_eq!(view.action, Action::Idle);
        assert_eq!(view.emoji, "😊");
    }

    #[test]
    fn test_starvation_marks_dead() {
        let mut c = creature();
        c.needs.hunger = 100.0;
        c.needs.health = 0.5;
        c.update_passive(1.0);
        assert!(c.is_dead());
        assert_eq!(c.emoji(), "💀");
        assert_eq!(c.view().action, Action::Dead);

        let frozen = c.needs;
        c.update_passive(5.0);
        assert_eq!(c.needs, frozen);
    }
}
