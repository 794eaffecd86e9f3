use glam::DVec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const FOOD_EMOJI: &str = "🍎";

/// A single edible item lying in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: Uuid,
    pub position: DVec2,
    pub emoji: String,
}

impl FoodItem {
    #[must_use]
    pub fn new(id: Uuid, position: DVec2) -> Self {
        Self {
            id,
            position,
            emoji: FOOD_EMOJI.to_string(),
        }
    }
}

/// Circular, immovable blocker. Creatures steer around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: Uuid,
    pub position: DVec2,
    pub radius: f64,
    pub emoji: String,
}

impl Obstacle {
    /// Distance to the obstacle's edge given the distance to its center,
    /// zero when inside it.
    #[must_use]
    pub fn surface_distance(&self, center_distance: f64) -> f64 {
        (center_distance - self.radius).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_distance_is_zero_inside() {
        let rock = Obstacle {
            id: Uuid::nil(),
            position: DVec2::new(10.0, 10.0),
            radius: 20.0,
            emoji: "🪨".to_string(),
        };
        assert_eq!(rock.surface_distance(50.0), 30.0);
        assert_eq!(rock.surface_distance(5.0), 0.0);
    }
}
