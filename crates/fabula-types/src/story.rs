//! Story-turn types for the adventure service.

use serde::{Deserialize, Serialize};

/// Context string a fresh session starts from.
pub const OPENING_SCENE: &str =
    "You wake up in an unfamiliar room. The light is dim and the air smells of damp.";

/// One structured story beat extracted from the narrator's reply.
///
/// `options` is tolerated absent: the model is asked for three suggested
/// actions but a reply carrying only `text` still counts as well-formed,
/// and serializes without an `options` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryTurn {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl StoryTurn {
    /// The fixed record returned to the client when a turn fails for any
    /// reason. The session context is never updated alongside it.
    pub fn fallback() -> Self {
        Self {
            text: "An error occurred while processing the narrator's reply.".to_string(),
            options: Some(vec!["Retry".to_string(), "End game".to_string()]),
        }
    }
}

/// Body of `POST /api/continue`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContinueRequest {
    pub session_id: String,
    #[serde(default)]
    pub player_action: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_shape() {
        let turn = StoryTurn::fallback();
        assert_eq!(
            turn.text,
            "An error occurred while processing the narrator's reply."
        );
        assert_eq!(
            turn.options,
            Some(vec!["Retry".to_string(), "End game".to_string()])
        );
    }

    #[test]
    fn test_missing_options_deserializes() {
        let turn: StoryTurn = serde_json::from_str(r#"{"text": "ok"}"#).unwrap();
        assert_eq!(turn.text, "ok");
        assert!(turn.options.is_none());
    }

    #[test]
    fn test_missing_options_not_serialized() {
        let turn = StoryTurn {
            text: "ok".to_string(),
            options: None,
        };
        let json = serde_json::to_value(&turn).unwrap();
        assert!(json.get("options").is_none());
    }

    #[test]
    fn test_continue_request_action_defaults_empty() {
        let req: ContinueRequest = serde_json::from_str(r#"{"session_id": "s1"}"#).unwrap();
        assert_eq!(req.session_id, "s1");
        assert!(req.player_action.is_empty());
    }
}
