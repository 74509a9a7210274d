//! Parse free-text voice commands into shortlist actions via the LLM
//!
//! The model is given the candidate listing and asked for a single JSON
//! object. Anything that does not parse into that shape is an error here;
//! degrading to keyword matching is the translator's job, not this module's.

use crate::command::action::{ActionKind, ProposedAction, ShortlistOperation};
use crate::core::error::{BridgeError, Result};
use crate::llm::client::CompletionBackend;
use crate::llm::context::CandidateContext;
use serde::Deserialize;

/// Reply shape requested from the model
#[derive(Debug, Clone, Deserialize)]
pub struct BackendReply {
    pub interpretation: String,
    #[serde(default)]
    pub actions: Vec<BackendAction>,
}

/// One action as the model writes it
#[derive(Debug, Clone, Deserialize)]
pub struct BackendAction {
    #[serde(rename = "type", default)]
    pub kind: ActionKind,
    pub action: ShortlistOperation,
    #[serde(rename = "candidateName")]
    pub candidate_name: String,
    pub confidence: f32,
}

impl From<BackendAction> for ProposedAction {
    fn from(action: BackendAction) -> Self {
        let mut proposal =
            ProposedAction::new(action.action, action.candidate_name, action.confidence);
        proposal.kind = action.kind;
        proposal
    }
}

/// Ask the backend to translate a voice command
///
/// # Arguments
/// * `backend` - The completion backend to call
/// * `input` - The raw voice text
/// * `context` - Candidate listing the model must pick names from
pub async fn request_translation(
    backend: &dyn CompletionBackend,
    input: &str,
    context: &CandidateContext,
) -> Result<BackendReply> {
    let system_prompt = format!("{}\n{}", TRANSLATE_SYSTEM_PROMPT, context.summary());
    let user_prompt = format!("VOICE COMMAND:\n{}\n\nTranslate this command into JSON:", input);

    let response = backend.complete(&system_prompt, &user_prompt).await?;
    tracing::debug!(reply = %response, "backend reply");
    parse_reply(&response)
}

/// Parse a raw completion into the typed reply
pub fn parse_reply(response: &str) -> Result<BackendReply> {
    let json_str = extract_json(response)?;
    serde_json::from_str(json_str).map_err(|e| {
        BridgeError::Translation(format!(
            "Failed to parse reply: {} - Response: {}",
            e, response
        ))
    })
}

/// Extract JSON object from LLM response (handles surrounding text)
fn extract_json(response: &str) -> Result<&str> {
    let start = response
        .find('{')
        .ok_or_else(|| BridgeError::Translation("No JSON found in response".into()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| BridgeError::Translation("No closing brace found in response".into()))?;
    if end < start {
        return Err(BridgeError::Translation("Malformed JSON in response".into()));
    }
    Ok(&response[start..=end])
}

/// System prompt for voice-command translation
const TRANSLATE_SYSTEM_PROMPT: &str = r#"You are a voice command interpreter for a candidate shortlisting system.
Convert spoken requests into shortlist actions.

AVAILABLE ACTIONS:
- add: put a candidate on the shortlist
- remove: take a candidate off the shortlist

RULES:
- Only use candidate names copied EXACTLY from the list below.
- Never invent a name. If a spoken name matches nobody on the list, emit no action for it.
- If no clear shortlist action is requested, return an empty actions array.

OUTPUT FORMAT (JSON only, no explanation):
{
  "interpretation": "Brief explanation of what the user wants",
  "actions": [
    {"type": "shortlist", "action": "add" or "remove", "candidateName": "Exact candidate name", "confidence": 0.0-1.0}
  ]
}

Examples:
"Shortlist Todd Kurtz and Kyle Scharnhorst" -> {"interpretation": "Add two candidates to the shortlist", "actions": [{"type": "shortlist", "action": "add", "candidateName": "Todd Kurtz", "confidence": 0.95}, {"type": "shortlist", "action": "add", "candidateName": "Kyle Scharnhorst", "confidence": 0.95}]}
"Remove Scott Goldwater from shortlist" -> {"interpretation": "Remove one candidate", "actions": [{"type": "shortlist", "action": "remove", "candidateName": "Scott Goldwater", "confidence": 0.9}]}
"what time is it" -> {"interpretation": "Not a shortlist request", "actions": []}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_simple() {
        let response = r#"{"interpretation": "x", "actions": []}"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, response);
    }

    #[test]
    fn test_extract_json_with_surrounding_text() {
        let response = r#"Here you go:
{"interpretation": "Add Todd", "actions": [{"type": "shortlist", "action": "add", "candidateName": "Todd Kurtz", "confidence": 0.9}]}
Anything else?"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
    }

    #[test]
    fn test_extract_json_no_json() {
        assert!(extract_json("I don't understand that command").is_err());
        assert!(extract_json("} backwards {").is_err());
    }

    #[test]
    fn test_parse_reply_full() {
        let reply = parse_reply(
            r#"{
                "interpretation": "Shortlist Todd, drop Kyle",
                "actions": [
                    {"type": "shortlist", "action": "add", "candidateName": "Todd Kurtz", "confidence": 0.92},
                    {"action": "remove", "candidateName": "Kyle Scharnhorst", "confidence": 0.8}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(reply.actions.len(), 2);
        assert_eq!(reply.actions[0].action, ShortlistOperation::Add);
        assert_eq!(reply.actions[1].kind, ActionKind::Shortlist);
        assert_eq!(reply.actions[1].candidate_name, "Kyle Scharnhorst");
    }

    #[test]
    fn test_parse_reply_missing_actions_is_empty() {
        let reply = parse_reply(r#"{"interpretation": "nothing to do"}"#).unwrap();
        assert!(reply.actions.is_empty());
    }

    #[test]
    fn test_parse_reply_rejects_unknown_operation() {
        let result = parse_reply(
            r#"{"interpretation": "x", "actions": [{"action": "promote", "candidateName": "A", "confidence": 1.0}]}"#,
        );
        assert!(matches!(result, Err(BridgeError::Translation(_))));
    }

    #[test]
    fn test_backend_action_confidence_clamped() {
        let action = BackendAction {
            kind: ActionKind::Shortlist,
            action: ShortlistOperation::Add,
            candidate_name: "A".into(),
            confidence: 3.0,
        };
        assert_eq!(ProposedAction::from(action).confidence, 1.0);
    }
}
