//! Nearest-food and nearest-obstacle queries.
//!
//! Both scans are linear over the world's lists and keep the first entry on
//! ties. Empty lists are not an error: distances come back as
//! `f64::INFINITY` and directions as the zero vector.

use glam::DVec2;
use uuid::Uuid;

use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodSense {
    pub id: Option<Uuid>,
    pub distance: f64,
    /// Unit vector toward the food, zero when on top of it or when none exists.
    pub direction: DVec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSense {
    /// Distance to the obstacle's edge, floored at zero.
    pub distance: f64,
    /// Unit vector toward the obstacle's centre.
    pub direction: DVec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    pub food: FoodSense,
    pub obstacle: ObstacleSense,
}

impl FoodSense {
    pub const NONE: Self = Self {
        id: None,
        distance: f64::INFINITY,
        direction: DVec2::ZERO,
    };
}

impl ObstacleSense {
    pub const NONE: Self = Self {
        distance: f64::INFINITY,
        direction: DVec2::ZERO,
    };
}

pub fn perceive(position: DVec2, world: &World) -> Perception {
    Perception {
        food: sense_nearest_food(position, world),
        obstacle: sense_nearest_obstacle(position, world),
    }
}

pub fn sense_nearest_food(position: DVec2, world: &World) -> FoodSense {
    let mut best: Option<(usize, f64)> = None;
    for (idx, food) in world.food.iter().enumerate() {
        let dist_sq = position.distance_squared(food.position);
        if best.map_or(true, |(_, best_sq)| dist_sq < best_sq) {
            best = Some((idx, dist_sq));
        }
    }

    let Some((idx, dist_sq)) = best else {
        return FoodSense::NONE;
    };
    let food = &world.food[idx];
    let distance = dist_sq.sqrt();
    FoodSense {
        id: Some(food.id),
        distance,
        direction: unit_toward(position, food.position, distance),
    }
}

pub fn sense_nearest_obstacle(position: DVec2, world: &World) -> ObstacleSense {
    let mut best: Option<(usize, f64)> = None;
    for (idx, obstacle) in world.obstacles.iter().enumerate() {
        let dist_sq = position.distance_squared(obstacle.position);
        if best.map_or(true, |(_, best_sq)| dist_sq < best_sq) {
            best = Some((idx, dist_sq));
        }
    }

    let Some((idx, dist_sq)) = best else {
        return ObstacleSense::NONE;
    };
    let obstacle = &world.obstacles[idx];
    let center_distance = dist_sq.sqrt();
    ObstacleSense {
        distance: obstacle.surface_distance(center_distance),
        direction: unit_toward(position, obstacle.position, center_distance),
    }
}

fn unit_toward(from: DVec2, to: DVec2, distance: f64) -> DVec2 {
    if distance > 0.0 {
        (to - from) / distance
    } else {
        DVec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn empty_world() -> World {
        let mut config = AppConfig::default();
        config.world.initial_creatures = 0;
        config.world.initial_food = 0;
        config.world.initial_obstacles = 0;
        config.world.seed = Some(1);
        World::new(config)
    }

    #[test]
    fn test_no_food_is_infinite() {
        let world = empty_world();
        let sense = sense_nearest_food(DVec2::new(50.0, 50.0), &world);
        assert_eq!(sense, FoodSense::NONE);
        assert!(sense.distance.is_infinite());
    }

    #[test]
    fn test_single_food_distance_and_direction() {
        let mut world = empty_world();
        world.add_food_at(DVec2::new(80.0, 90.0));
        let sense = sense_nearest_food(DVec2::new(50.0, 50.0), &world);
        assert!((sense.distance - 50.0).abs() < 1e-12);
        assert!((sense.direction.x - 0.6).abs() < 1e-12);
        assert!((sense.direction.y - 0.8).abs() < 1e-12);
        assert_eq!(sense.id, Some(world.food[0].id));
    }

    #[test]
    fn test_nearest_food_wins() {
        let mut world = empty_world();
        world.add_food_at(DVec2::new(30.0, 40.0));
        world.add_food_at(DVec2::new(10.0, 0.0));
        let sense = sense_nearest_food(DVec2::ZERO, &world);
        assert!((sense.distance - 10.0).abs() < 1e-12);
        assert_eq!(sense.direction, DVec2::new(1.0, 0.0));
        assert_eq!(sense.id, Some(world.food[1].id));
    }

    #[test]
    fn test_food_tie_keeps_first() {
        let mut world = empty_world();
        world.add_food_at(DVec2::new(10.0, 0.0));
        world.add_food_at(DVec2::new(-10.0, 0.0));
        let sense = sense_nearest_food(DVec2::ZERO, &world);
        assert_eq!(sense.id, Some(world.food[0].id));
    }

    #[test]
    fn test_food_underfoot_has_zero_direction() {
        let mut world = empty_world();
        world.add_food_at(DVec2::new(5.0, 5.0));
        let sense = sense_nearest_food(DVec2::new(5.0, 5.0), &world);
        assert_eq!(sense.distance, 0.0);
        assert_eq!(sense.direction, DVec2::ZERO);
    }

    #[test]
    fn test_obstacle_surface_distance() {
        let mut world = empty_world();
        world.add_obstacle(DVec2::new(100.0, 0.0), 30.0);
        let sense = sense_nearest_obstacle(DVec2::ZERO, &world);
        assert!((sense.distance - 70.0).abs() < 1e-12);
        assert_eq!(sense.direction, DVec2::new(1.0, 0.0));
    }

    #[test]
    fn test_inside_obstacle_floors_at_zero() {
        let mut world = empty_world();
        world.add_obstacle(DVec2::new(10.0, 0.0), 30.0);
        let sense = sense_nearest_obstacle(DVec2::ZERO, &world);
        assert_eq!(sense.distance, 0.0);
        assert_eq!(sense.direction, DVec2::new(1.0, 0.0));

        let at_center = sense_nearest_obstacle(DVec2::new(10.0, 0.0), &world);
        assert_eq!(at_center.direction, DVec2::ZERO);
    }

    #[test]
    fn test_nearest_obstacle_by_center_not_surface() {
        let mut world = empty_world();
        // Big obstacle whose edge is closer, but whose centre is further.
        world.add_obstacle(DVec2::new(100.0, 0.0), 90.0);
        world.add_obstacle(DVec2::new(0.0, 50.0), 5.0);
        let sense = sense_nearest_obstacle(DVec2::ZERO, &world);
        assert!((sense.distance - 45.0).abs() < 1e-12);
        assert_eq!(sense.direction, DVec2::new(0.0, 1.0));
    }
}
