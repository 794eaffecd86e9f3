use serde::{Deserialize, Serialize};

/// World edits submitted from outside the tick loop.
///
/// Encoded as `{"action": "add_food", "x": 10.0, "y": 20.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WorldCommand {
    /// Drop a food item. Missing coordinates mean "anywhere".
    AddFood {
        #[serde(default)]
        x: Option<f64>,
        #[serde(default)]
        y: Option<f64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_food_parses_without_coordinates() {
        let cmd: WorldCommand = serde_json::from_str(r#"{"action":"add_food"}"#).unwrap();
        assert_eq!(cmd, WorldCommand::AddFood { x: None, y: None });
    }

    #[test]
    fn test_add_food_parses_coordinates() {
        let cmd: WorldCommand =
            serde_json::from_str(r#"{"action":"add_food","x":12.5,"y":40}"#).unwrap();
        assert_eq!(
            cmd,
            WorldCommand::AddFood {
                x: Some(12.5),
                y: Some(40.0)
            }
        );
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(serde_json::from_str::<WorldCommand>(r#"{"action":"summon_dragon"}"#).is_err());
    }
}
