use bitlings_lib::model::brain::{
    DecisionNetwork, DEFAULT_SETTLE_ITERATIONS, NETWORK_INPUTS, NETWORK_OUTPUTS,
};
use bitlings_lib::model::data::Action;
use proptest::prelude::*;

// Strategies for generating arbitrary network parts
prop_compose! {
    fn arb_network(max_hidden: usize)(hidden in 1..=max_hidden)(
        weights_ih in prop::collection::vec(-0.5f64..0.5, NETWORK_INPUTS * hidden),
        weights_ho in prop::collection::vec(-0.5f64..0.5, hidden * NETWORK_OUTPUTS),
        bias_h in prop::collection::vec(-0.5f64..0.5, hidden),
        bias_o in prop::array::uniform5(-0.5f64..0.5),
        hidden in Just(hidden),
    ) -> DecisionNetwork {
        DecisionNetwork::from_parts(hidden, weights_ih, weights_ho, bias_h, bias_o).unwrap()
    }
}

prop_compose! {
    fn arb_senses()(
        hunger in -200.0f64..300.0,
        energy in -200.0f64..300.0,
        distance in prop_oneof![0.0f64..2000.0, Just(f64::INFINITY)],
        dx in -5.0f64..5.0,
        dy in -5.0f64..5.0,
    ) -> (f64, f64, f64, f64, f64) {
        (hunger, energy, distance, dx, dy)
    }
}

proptest! {
    #[test]
    fn inputs_always_normalised(mut net in arb_network(8), senses in arb_senses()) {
        let (hunger, energy, distance, dx, dy) = senses;
        net.set_inputs(hunger, energy, distance, dx, dy);
        let inputs = net.inputs();
        prop_assert!((0.0..=1.0).contains(&inputs[0]));
        prop_assert!((0.0..=1.0).contains(&inputs[1]));
        prop_assert!((0.0..=1.0).contains(&inputs[2]));
        prop_assert!((-1.0..=1.0).contains(&inputs[3]));
        prop_assert!((-1.0..=1.0).contains(&inputs[4]));
        if distance > 500.0 {
            prop_assert_eq!(inputs[2], 1.0);
        }
    }

    #[test]
    fn outputs_in_open_unit_interval(mut net in arb_network(8), senses in arb_senses()) {
        let (hunger, energy, distance, dx, dy) = senses;
        net.set_inputs(hunger, energy, distance, dx, dy);
        net.evaluate(DEFAULT_SETTLE_ITERATIONS);
        for &o in net.outputs() {
            prop_assert!(o > 0.0 && o < 1.0);
        }
        prop_assert!(Action::DECISIONS.contains(&net.select_action()));
    }

    #[test]
    fn failed_reinforcement_changes_nothing(
        mut net in arb_network(6),
        senses in arb_senses(),
        action in 0..NETWORK_OUTPUTS,
    ) {
        let (hunger, energy, distance, dx, dy) = senses;
        net.set_inputs(hunger, energy, distance, dx, dy);
        net.evaluate(DEFAULT_SETTLE_ITERATIONS);
        let before = net.clone();
        net.reinforce(action, false);
        prop_assert_eq!(net, before);
    }

    #[test]
    fn successful_reinforcement_is_hebbian(
        mut net in arb_network(6),
        senses in arb_senses(),
        action in 0..NETWORK_OUTPUTS,
    ) {
        let (hunger, energy, distance, dx, dy) = senses;
        net.set_inputs(hunger, energy, distance, dx, dy);
        net.evaluate(DEFAULT_SETTLE_ITERATIONS);
        let before = net.clone();
        net.reinforce(action, true);

        for j in 0..net.hidden_size() {
            prop_assert!(net.hidden_output_weight(j, action) > before.hidden_output_weight(j, action));
            for k in (0..NETWORK_OUTPUTS).filter(|&k| k != action) {
                prop_assert_eq!(net.hidden_output_weight(j, k), before.hidden_output_weight(j, k));
            }
            for i in 0..NETWORK_INPUTS {
                let delta = net.input_hidden_weight(i, j) - before.input_hidden_weight(i, j);
                let hidden = net.hidden()[j];
                if hidden <= 0.1 {
                    prop_assert_eq!(delta, 0.0);
                } else {
                    let expected = net.learning_rate() * net.inputs()[i] * hidden;
                    prop_assert!((delta - expected).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn settling_is_stable(mut net in arb_network(8), senses in arb_senses()) {
        let (hunger, energy, distance, dx, dy) = senses;
        net.set_inputs(hunger, energy, distance, dx, dy);
        net.evaluate(1);
        let first = *net.outputs();
        net.evaluate(DEFAULT_SETTLE_ITERATIONS);
        prop_assert_eq!(&first, net.outputs());
    }
}
