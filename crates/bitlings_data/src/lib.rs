//! Plain data shared by the simulation core, the wire protocol and the
//! observer server.

pub mod data;

pub use data::command::WorldCommand;
pub use data::entity::{Action, Needs};
pub use data::environment::{FoodItem, Obstacle, FOOD_EMOJI};
pub use data::snapshot::{CreatureView, FoodView, ObstacleView, WorldSnapshot};
