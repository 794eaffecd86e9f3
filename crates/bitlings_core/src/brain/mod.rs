pub mod forward;
pub mod topology;

use bitlings_data::Action;
use rand::Rng;

use crate::error::{Result, SimError};

pub use topology::create_network_random_with_rng;

pub const INPUT_LABELS: [&str; 5] = ["hunger", "energy", "distance_to_food", "food_dx", "food_dy"];

pub const OUTPUT_LABELS: [&str; 5] = ["seeking_food", "eating", "seeking_sleep", "wandering", "idle"];

pub const NETWORK_INPUTS: usize = INPUT_LABELS.len();
pub const NETWORK_OUTPUTS: usize = OUTPUT_LABELS.len();
pub const DEFAULT_HIDDEN_SIZE: usize = 4;
pub const DEFAULT_SETTLE_ITERATIONS: usize = 10;
pub const LEARNING_RATE: f64 = 0.05;
/// Food further away than this reads as "not in sight".
pub const MAX_PERCEIVABLE_DISTANCE: f64 = 500.0;
/// Only hidden units above this activation get their input weights reinforced.
pub const HIDDEN_REINFORCE_THRESHOLD: f64 = 0.1;

/// Two-layer sigmoid network that maps a creature's needs and food bearing to
/// one of [`Action::DECISIONS`].
///
/// Weights are stored row-major: `weights_input_hidden[i * hidden + j]` links
/// input `i` to hidden unit `j`, `weights_hidden_output[j * NETWORK_OUTPUTS + k]`
/// links hidden unit `j` to output `k`. Shapes are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionNetwork {
    hidden_size: usize,
    weights_input_hidden: Vec<f64>,
    weights_hidden_output: Vec<f64>,
    bias_hidden: Vec<f64>,
    bias_output: [f64; NETWORK_OUTPUTS],
    inputs: [f64; NETWORK_INPUTS],
    hidden: Vec<f64>,
    outputs: [f64; NETWORK_OUTPUTS],
    learning_rate: f64,
}

impl DecisionNetwork {
    pub fn new_random_with_rng<R: Rng>(hidden_size: usize, rng: &mut R) -> Self {
        topology::create_network_random_with_rng(hidden_size, rng)
    }

    /// Assembles a network from explicit weights and biases, checking every
    /// buffer against `hidden_size`. Activations start at zero.
    pub fn from_parts(
        hidden_size: usize,
        weights_input_hidden: Vec<f64>,
        weights_hidden_output: Vec<f64>,
        bias_hidden: Vec<f64>,
        bias_output: [f64; NETWORK_OUTPUTS],
    ) -> Result<Self> {
        if hidden_size == 0 {
            return Err(SimError::NetworkShape {
                what: "hidden layer",
                expected: 1,
                actual: 0,
            });
        }
        SimError::check_len(
            "weights_input_hidden",
            NETWORK_INPUTS * hidden_size,
            weights_input_hidden.len(),
        )?;
        SimError::check_len(
            "weights_hidden_output",
            hidden_size * NETWORK_OUTPUTS,
            weights_hidden_output.len(),
        )?;
        SimError::check_len("bias_hidden", hidden_size, bias_hidden.len())?;

        Ok(Self {
            hidden_size,
            weights_input_hidden,
            weights_hidden_output,
            bias_hidden,
            bias_output,
            inputs: [0.0; NETWORK_INPUTS],
            hidden: vec![0.0; hidden_size],
            outputs: [0.0; NETWORK_OUTPUTS],
            learning_rate: LEARNING_RATE,
        })
    }

    /// Normalises raw senses into the input layer. Out-of-range values are
    /// clamped, never rejected.
    pub fn set_inputs(
        &mut self,
        hunger: f64,
        energy: f64,
        distance_to_food: f64,
        food_dx: f64,
        food_dy: f64,
    ) {
        self.inputs = [
            normalize_need(hunger),
            normalize_need(energy),
            normalize_distance(distance_to_food),
            clamp_direction(food_dx),
            clamp_direction(food_dy),
        ];
    }

    /// Runs `iterations` feedforward passes over the current inputs.
    ///
    /// Inputs are held constant, so every pass after the first reproduces the
    /// same activations.
    pub fn evaluate(&mut self, iterations: usize) {
        for _ in 0..iterations {
            forward::feedforward_step(self);
        }
    }

    /// Index of the strongest output; the earliest index wins ties.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        forward::argmax(&self.outputs)
    }

    #[must_use]
    pub fn select_action(&self) -> Action {
        Action::DECISIONS[self.selected_index()]
    }

    /// Reward-only Hebbian update toward `action_index`. Does nothing when
    /// `success` is false.
    pub fn reinforce(&mut self, action_index: usize, success: bool) {
        forward::reinforce(self, action_index, success);
    }

    #[must_use]
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    #[must_use]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    #[must_use]
    pub fn inputs(&self) -> &[f64; NETWORK_INPUTS] {
        &self.inputs
    }

    #[must_use]
    pub fn hidden(&self) -> &[f64] {
        &self.hidden
    }

    #[must_use]
    pub fn outputs(&self) -> &[f64; NETWORK_OUTPUTS] {
        &self.outputs
    }

    #[must_use]
    pub fn weights_input_hidden(&self) -> &[f64] {
        &self.weights_input_hidden
    }

    #[must_use]
    pub fn weights_hidden_output(&self) -> &[f64] {
        &self.weights_hidden_output
    }

    #[must_use]
    pub fn bias_hidden(&self) -> &[f64] {
        &self.bias_hidden
    }

    #[must_use]
    pub fn bias_output(&self) -> &[f64; NETWORK_OUTPUTS] {
        &self.bias_output
    }

    #[must_use]
    pub fn input_hidden_weight(&self, input: usize, hidden: usize) -> f64 {
        self.weights_input_hidden[input * self.hidden_size + hidden]
    }

    #[must_use]
    pub fn hidden_output_weight(&self, hidden: usize, output: usize) -> f64 {
        self.weights_hidden_output[hidden * NETWORK_OUTPUTS + output]
    }
}

fn normalize_need(value: f64) -> f64 {
    (value / 100.0).clamp(0.0, 1.0)
}

fn normalize_distance(distance: f64) -> f64 {
    if distance.is_infinite() || distance > MAX_PERCEIVABLE_DISTANCE {
        1.0
    } else {
        (distance / MAX_PERCEIVABLE_DISTANCE).clamp(0.0, 1.0)
    }
}

fn clamp_direction(component: f64) -> f64 {
    component.clamp(-1.0, 1.0)
}
