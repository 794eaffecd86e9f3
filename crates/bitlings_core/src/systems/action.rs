//! Per-creature action state machine.
//!
//! Every tick a living creature runs [`ActionController::choose`] and then
//! [`ActionController::execute`]. `choose` asks the decision network what to
//! do and arms the chosen state; `execute` advances whatever state is active.
//! `Eating` and `Sleeping` are committed: once entered they run until their
//! timer expires and `choose` leaves them alone.

use bitlings_data::{Action, Needs};
use glam::DVec2;
use rand::Rng;
use uuid::Uuid;

use crate::brain::DecisionNetwork;
use crate::perception::{sense_nearest_food, sense_nearest_obstacle};
use crate::steering::steer;
use crate::world::World;

/// Units per second for both wandering and seeking.
pub const MOVE_SPEED: f64 = 50.0;
/// Closer than this to a pinned food counts as arrived.
pub const ARRIVAL_RADIUS: f64 = 5.0;
pub const WANDER_ENERGY_COST: f64 = 1.0;
pub const SEEK_ENERGY_COST: f64 = 1.5;
pub const WANDER_MIN_SECS: f64 = 1.0;
pub const WANDER_MAX_SECS: f64 = 5.0;
pub const EATING_SECS: f64 = 2.0;
/// Hunger removed by one completed meal.
pub const MEAL_SATIATION: f64 = 50.0;
pub const SLEEP_MIN_SECS: f64 = 5.0;
pub const SLEEP_MAX_SECS: f64 = 10.0;
/// Energy regained per second asleep.
pub const SLEEP_RECOVERY: f64 = 10.0;

/// Food a seeking creature is heading for, pinned when the decision is made.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodTarget {
    pub id: Uuid,
    pub position: DVec2,
}

/// Active behaviour together with the data only that behaviour needs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Wandering {
        timer: f64,
        heading: DVec2,
    },
    SeekingFood {
        target: FoodTarget,
    },
    Eating {
        timer: f64,
        /// Food to consume on completion. `None` when eating was chosen
        /// without walking up to anything.
        food_id: Option<Uuid>,
    },
    SeekingSleep,
    Sleeping {
        timer: f64,
    },
    Dead,
}

impl ActionState {
    #[must_use]
    pub fn action(&self) -> Action {
        match self {
            ActionState::Idle => Action::Idle,
            ActionState::Wandering { .. } => Action::Wandering,
            ActionState::SeekingFood { .. } => Action::SeekingFood,
            ActionState::Eating { .. } => Action::Eating,
            ActionState::SeekingSleep => Action::SeekingSleep,
            ActionState::Sleeping { .. } => Action::Sleeping,
            ActionState::Dead => Action::Dead,
        }
    }

    /// Remaining time on the active timer, if the state has one.
    #[must_use]
    pub fn timer(&self) -> Option<f64> {
        match *self {
            ActionState::Wandering { timer, .. }
            | ActionState::Eating { timer, .. }
            | ActionState::Sleeping { timer } => Some(timer),
            _ => None,
        }
    }

    fn tick_timer(&mut self, dt: f64) {
        match self {
            ActionState::Wandering { timer, .. }
            | ActionState::Eating { timer, .. }
            | ActionState::Sleeping { timer } => {
                *timer = (*timer - dt).max(0.0);
            }
            _ => {}
        }
    }

    fn is_committed(&self) -> bool {
        matches!(
            self,
            ActionState::Eating { .. } | ActionState::Sleeping { .. } | ActionState::Dead
        )
    }
}

/// The parts of a creature the controller reads and writes.
pub struct ActionEntity<'a> {
    pub position: &'a mut DVec2,
    pub needs: &'a mut Needs,
    pub network: &'a mut DecisionNetwork,
}

/// What an `execute` step did, for the tick's bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionOutput {
    /// A pinned food item was removed from the world.
    pub food_eaten: bool,
    /// A behaviour completed and the network was reinforced with this outcome.
    pub reinforced: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActionController {
    state: ActionState,
    /// Last network decision; the action credited when a meal completes.
    decision: Option<Action>,
}

impl ActionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state(state: ActionState) -> Self {
        Self {
            state,
            decision: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ActionState {
        &self.state
    }

    #[must_use]
    pub fn action(&self) -> Action {
        self.state.action()
    }

    #[must_use]
    pub fn decision(&self) -> Option<Action> {
        self.decision
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.state == ActionState::Dead
    }

    pub fn mark_dead(&mut self) {
        self.state = ActionState::Dead;
    }

    /// Feeds the network with current senses and arms the chosen state.
    pub fn choose(&mut self, entity: ActionEntity<'_>, world: &mut World) {
        if self.state.is_committed() {
            return;
        }

        let food = sense_nearest_food(*entity.position, world);
        entity.network.set_inputs(
            entity.needs.hunger,
            entity.needs.energy,
            food.distance,
            food.direction.x,
            food.direction.y,
        );
        entity.network.evaluate(world.config.brain.settle_iterations);
        let action = entity.network.select_action();
        self.decision = Some(action);

        self.state = match action {
            Action::SeekingFood => match world.food.first() {
                Some(first) => ActionState::SeekingFood {
                    target: FoodTarget {
                        id: first.id,
                        position: first.position,
                    },
                },
                None => ActionState::Idle,
            },
            Action::Wandering => {
                let heading = match self.state {
                    ActionState::Wandering { heading, .. } => heading,
                    _ => random_heading(&mut world.rng),
                };
                ActionState::Wandering {
                    timer: world.rng.gen_range(WANDER_MIN_SECS..=WANDER_MAX_SECS),
                    heading,
                }
            }
            // Deliberate: eating on the spot is a zero-length meal with nothing to remove.
            Action::Eating => ActionState::Eating {
                timer: 0.0,
                food_id: None,
            },
            Action::SeekingSleep => ActionState::SeekingSleep,
            _ => ActionState::Idle,
        };
    }

    /// Advances the active state by `dt` seconds.
    pub fn execute(&mut self, entity: ActionEntity<'_>, world: &mut World, dt: f64) -> ActionOutput {
        let mut output = ActionOutput::default();
        if self.is_dead() {
            return output;
        }

        let stress_before = entity.needs.stress;
        self.state.tick_timer(dt);

        match self.state {
            ActionState::Idle | ActionState::Dead => {}
            ActionState::Wandering { timer, heading } => {
                if timer <= 0.0 {
                    self.state = ActionState::Idle;
                } else {
                    let obstacle = sense_nearest_obstacle(*entity.position, world);
                    let direction =
                        steer(heading, &obstacle).unwrap_or_else(|| random_heading(&mut world.rng));
                    *entity.position = world.clamp_to_bounds(*entity.position + direction * MOVE_SPEED * dt);
                    entity.needs.energy = (entity.needs.energy - WANDER_ENERGY_COST * dt).max(0.0);
                }
            }
            ActionState::SeekingFood { target } => {
                let to_target = target.position - *entity.position;
                let remaining = to_target.length();
                let travel = MOVE_SPEED * dt;
                if remaining <= travel || remaining < ARRIVAL_RADIUS {
                    self.state = ActionState::Eating {
                        timer: EATING_SECS,
                        food_id: Some(target.id),
                    };
                } else {
                    let goal = to_target / remaining;
                    let obstacle = sense_nearest_obstacle(*entity.position, world);
                    let direction = steer(goal, &obstacle).unwrap_or(goal);
                    *entity.position = world.clamp_to_bounds(*entity.position + direction * travel);
                    entity.needs.energy = (entity.needs.energy - SEEK_ENERGY_COST * dt).max(0.0);
                }
            }
            ActionState::Eating { timer, food_id } => {
                if timer <= 0.0 {
                    entity.needs.hunger = (entity.needs.hunger - MEAL_SATIATION).max(0.0);
                    if let Some(id) = food_id {
                        output.food_eaten = world.remove_food(id);
                    }
                    entity.needs.refresh_stress();
                    let success = entity.needs.stress < stress_before;
                    if let Some(index) = self.decision.and_then(Action::decision_index) {
                        entity.network.reinforce(index, success);
                    }
                    output.reinforced = Some(success);
                    self.state = ActionState::Idle;
                }
            }
            ActionState::SeekingSleep => {
                self.state = ActionState::Sleeping {
                    timer: world.rng.gen_range(SLEEP_MIN_SECS..=SLEEP_MAX_SECS),
                };
            }
            ActionState::Sleeping { timer } => {
                if timer > 0.0 {
                    entity.needs.energy = (entity.needs.energy + SLEEP_RECOVERY * dt).min(Needs::MAX);
                } else {
                    entity.needs.energy = Needs::MAX;
                    entity.needs.refresh_stress();
                    let success = entity.needs.stress < stress_before;
                    if let Some(index) = Action::SeekingSleep.decision_index() {
                        entity.network.reinforce(index, success);
                    }
                    output.reinforced = Some(success);
                    self.state = ActionState::Idle;
                }
            }
        }

        output
    }
}

fn random_heading<R: Rng>(rng: &mut R) -> DVec2 {
    DVec2::from_angle(rng.gen_range(0.0..std::f64::consts::TAU))
}
