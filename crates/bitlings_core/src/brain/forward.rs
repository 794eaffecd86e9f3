use super::*;

/// Logistic function with the argument clipped to [-500, 500] so `exp` stays
/// finite.
#[must_use]
pub fn sigmoid(x: f64) -> f64 {
    let x = x.clamp(-500.0, 500.0);
    1.0 / (1.0 + (-x).exp())
}

/// One pass: `hidden = sigmoid(input·W_ih + b_h)`, then
/// `output = sigmoid(hidden·W_ho + b_o)`.
pub fn feedforward_step(net: &mut DecisionNetwork) {
    let hidden_size = net.hidden_size;

    for j in 0..hidden_size {
        let mut sum = net.bias_hidden[j];
        for (i, &input) in net.inputs.iter().enumerate() {
            sum += input * net.weights_input_hidden[i * hidden_size + j];
        }
        net.hidden[j] = sigmoid(sum);
    }

    for k in 0..NETWORK_OUTPUTS {
        let mut sum = net.bias_output[k];
        for (j, &hidden) in net.hidden.iter().enumerate() {
            sum += hidden * net.weights_hidden_output[j * NETWORK_OUTPUTS + k];
        }
        net.outputs[k] = sigmoid(sum);
    }
}

/// Position of the largest value; the first one wins ties.
#[must_use]
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (idx, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = idx;
        }
    }
    best
}

pub fn reinforce(net: &mut DecisionNetwork, action_index: usize, success: bool) {
    if !success || action_index >= NETWORK_OUTPUTS {
        return;
    }

    let hidden_size = net.hidden_size;
    let rate = net.learning_rate;

    for j in 0..hidden_size {
        net.weights_hidden_output[j * NETWORK_OUTPUTS + action_index] += rate * net.hidden[j];
    }

    for j in 0..hidden_size {
        let hidden = net.hidden[j];
        if hidden <= HIDDEN_REINFORCE_THRESHOLD {
            continue;
        }
        for i in 0..NETWORK_INPUTS {
            net.weights_input_hidden[i * hidden_size + j] += rate * net.inputs[i] * hidden;
        }
    }
}
