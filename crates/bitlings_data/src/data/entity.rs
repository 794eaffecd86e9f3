use serde::{Deserialize, Serialize};
use std::fmt;

/// Observable behaviour of a creature.
///
/// The first five variants double as the decision network's output layer, in
/// the order given by [`Action::DECISIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Idle,
    Wandering,
    SeekingFood,
    Eating,
    SeekingSleep,
    Sleeping,
    Dead,
}

impl Action {
    /// Actions the decision network can pick, in output-layer order.
    pub const DECISIONS: [Action; 5] = [
        Action::SeekingFood,
        Action::Eating,
        Action::SeekingSleep,
        Action::Wandering,
        Action::Idle,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Idle => "idle",
            Action::Wandering => "wandering",
            Action::SeekingFood => "seeking_food",
            Action::Eating => "eating",
            Action::SeekingSleep => "seeking_sleep",
            Action::Sleeping => "sleeping",
            Action::Dead => "dead",
        }
    }

    /// Output-layer index of this action, if the network can choose it.
    #[must_use]
    pub fn decision_index(self) -> Option<usize> {
        Self::DECISIONS.iter().position(|&a| a == self)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physiological needs of a creature. Everything but `age` lives in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Needs {
    pub health: f64,
    pub hunger: f64,
    pub energy: f64,
    pub mood: f64,
    pub stress: f64,
    /// Seconds lived.
    pub age: f64,
}

impl Needs {
    pub const MAX: f64 = 100.0;

    /// Stress is half hunger pressure, half fatigue pressure.
    #[must_use]
    pub fn compute_stress(hunger: f64, energy: f64) -> f64 {
        (hunger / Self::MAX * 50.0 + (Self::MAX - energy) / Self::MAX * 50.0).clamp(0.0, Self::MAX)
    }

    pub fn refresh_stress(&mut self) {
        self.stress = Self::compute_stress(self.hunger, self.energy);
    }
}

impl Default for Needs {
    fn default() -> Self {
        let mut needs = Self {
            health: Self::MAX,
            hunger: 0.0,
            energy: Self::MAX,
            mood: 50.0,
            stress: 0.0,
            age: 0.0,
        };
        needs.refresh_stress();
        needs
    }
}
