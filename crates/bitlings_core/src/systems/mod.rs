pub mod action;
pub mod biological;

pub use action::{ActionController, ActionEntity, ActionOutput, ActionState, FoodTarget};
