//! Narrator prompt assembly.

/// Format the fixed narrator instruction around the accumulated context
/// and the player's latest action. Deterministic: same inputs, same
/// prompt text.
pub fn build_prompt(context: &str, player_action: &str) -> String {
    format!(
        r#"You are the narrator of a text adventure game.

Reply strictly as a JSON object:
{{
  "text": "The next story beat",
  "options": ["option1", "option2", "option3"]
}}

Context:
{context}

Player action: {player_action}
"#
    )
}
