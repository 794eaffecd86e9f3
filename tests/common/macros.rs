/// Asserts that a creature with the given ID is currently doing `$action`.
#[macro_export]
macro_rules! assert_action {
    ($world:expr, $id:expr, $action:expr) => {
        let creature = $world
            .creatures
            .iter()
            .find(|c| c.id == $id)
            .expect("Creature not found in world");
        assert_eq!(
            creature.action(),
            $action,
            "Creature {} is {} not {}",
            $id,
            creature.action(),
            $action
        );
    };
}

/// Asserts that a creature with the given ID is NOT present in the world.
#[macro_export]
macro_rules! assert_creature_gone {
    ($world:expr, $id:expr) => {
        let exists = $world.creatures.iter().any(|c| c.id == $id);
        assert!(!exists, "Creature {} should be gone but was found", $id);
    };
}

/// Asserts that the population count matches the expected value.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $count:expr) => {
        assert_eq!($world.creatures.len(), $count, "Population count mismatch");
    };
}
