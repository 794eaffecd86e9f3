use super::*;

/// Builds a network with every weight and bias drawn uniformly from
/// [-0.5, 0.5).
pub fn create_network_random_with_rng<R: Rng>(hidden_size: usize, rng: &mut R) -> DecisionNetwork {
    let hidden_size = hidden_size.max(1);
    let mut draw = |n: usize| -> Vec<f64> { (0..n).map(|_| rng.gen_range(-0.5..0.5)).collect() };

    let weights_input_hidden = draw(NETWORK_INPUTS * hidden_size);
    let weights_hidden_output = draw(hidden_size * NETWORK_OUTPUTS);
    let bias_hidden = draw(hidden_size);
    let mut bias_output = [0.0; NETWORK_OUTPUTS];
    for (slot, value) in bias_output.iter_mut().zip(draw(NETWORK_OUTPUTS)) {
        *slot = value;
    }

    DecisionNetwork {
        hidden_size,
        weights_input_hidden,
        weights_hidden_output,
        bias_hidden,
        bias_output,
        inputs: [0.0; NETWORK_INPUTS],
        hidden: vec![0.0; hidden_size],
        outputs: [0.0; NETWORK_OUTPUTS],
        learning_rate: LEARNING_RATE,
    }
}
