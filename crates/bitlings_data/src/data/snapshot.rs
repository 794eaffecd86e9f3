//! Read-only views of the world handed to observers once per tick.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::Action;
use super::environment::{FoodItem, Obstacle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureView {
    pub id: Uuid,
    /// Rounded to one decimal.
    pub x: f64,
    /// Rounded to one decimal.
    pub y: f64,
    pub emoji: String,
    pub action: Action,
    pub health: i64,
    pub hunger: i64,
    pub energy: i64,
    pub mood: i64,
    pub stress: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodView {
    pub id: Uuid,
    pub x: f64,
    pub y: f64,
    pub emoji: String,
}

impl From<&FoodItem> for FoodView {
    fn from(food: &FoodItem) -> Self {
        Self {
            id: food.id,
            x: food.position.x,
            y: food.position.y,
            emoji: food.emoji.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: Uuid,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub emoji: String,
}

impl From<&Obstacle> for ObstacleView {
    fn from(obstacle: &Obstacle) -> Self {
        Self {
            id: obstacle.id,
            x: obstacle.position.x,
            y: obstacle.position.y,
            radius: obstacle.radius,
            emoji: obstacle.emoji.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub creatures: Vec<CreatureView>,
    pub food: Vec<FoodView>,
    pub obstacles: Vec<ObstacleView>,
}

/// Rounds to one decimal place for display coordinates.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
