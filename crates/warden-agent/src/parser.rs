// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response parsing: free-form model output into an ordered action list.
//!
//! The model is an untrusted free-text generator, so [`parse_response`] is a
//! total function: any failure degrades to a single visible `error` action
//! carrying the cause and the original text, never a panic or an `Err` past
//! this boundary.

use serde_json::{Map, Value, json};
use tracing::warn;
use warden_core::RawAction;

/// Marker introducing the primary JSON action list format.
const ACTIONS_MARKER: &str = "ACTIONS:";
/// Markers of the legacy single-action line format.
const LEGACY_ACTION_MARKER: &str = "ACTION:";
const LEGACY_PARAMS_MARKER: &str = "PARAMS:";

/// Parses a raw model response into an ordered action sequence.
///
/// On any failure the result is exactly one `error` action, so the caller
/// can surface malformed replies uniformly.
pub fn parse_response(raw: &str) -> Vec<RawAction> {
    match try_parse(raw) {
        Ok(actions) => actions,
        Err(cause) => {
            warn!(cause = cause.as_str(), "failed to parse model response");
            vec![error_action(&cause, raw)]
        }
    }
}

/// Builds the `error` action produced for an unusable model reply.
pub fn error_action(cause: &str, original: &str) -> RawAction {
    RawAction {
        action: "error".to_string(),
        params: json!({
            "error": format!("could not process response: {cause}"),
            "original_response": original,
        }),
    }
}

fn try_parse(raw: &str) -> Result<Vec<RawAction>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("empty response".to_string());
    }

    if let Some(pos) = trimmed.find(ACTIONS_MARKER) {
        let json_part = trimmed[pos + ACTIONS_MARKER.len()..].trim();
        let value: Value =
            serde_json::from_str(json_part).map_err(|e| format!("invalid JSON: {e}"))?;
        let elements = match value {
            Value::Array(items) => items,
            single => vec![single],
        };
        return elements.into_iter().map(validate_element).collect();
    }

    parse_legacy(trimmed)
}

/// Each element must be an object with a string `action` field and an
/// optional object `params` field (default empty). Unrecognized action
/// names pass through; rejecting them is the dispatcher's job.
fn validate_element(value: Value) -> Result<RawAction, String> {
    let Value::Object(mut map) = value else {
        return Err("action entry is not an object".to_string());
    };
    let action = match map.get("action") {
        Some(Value::String(s)) => s.clone(),
        _ => return Err("action entry is missing a string `action` field".to_string()),
    };
    let params = match map.remove("params") {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(params @ Value::Object(_)) => params,
        Some(_) => return Err(format!("`params` of action `{action}` is not an object")),
    };
    Ok(RawAction { action, params })
}

/// Legacy fallback: first `ACTION:` line plus first `PARAMS:` line with a
/// JSON object remainder.
fn parse_legacy(text: &str) -> Result<Vec<RawAction>, String> {
    let action_line = text
        .lines()
        .find_map(|line| line.trim().strip_prefix(LEGACY_ACTION_MARKER))
        .ok_or_else(|| "response contains neither ACTIONS: nor ACTION:".to_string())?;
    let params_line = text
        .lines()
        .find_map(|line| line.trim().strip_prefix(LEGACY_PARAMS_MARKER))
        .ok_or_else(|| "legacy response is missing a PARAMS: line".to_string())?;

    let params: Value = serde_json::from_str(params_line.trim())
        .map_err(|e| format!("invalid legacy PARAMS JSON: {e}"))?;
    if !params.is_object() {
        return Err("legacy PARAMS is not an object".to_string());
    }

    Ok(vec![RawAction {
        action: action_line.trim().to_string(),
        params,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn valid_actions_array_preserves_order() {
        let raw = r#"Sure, doing that now.
ACTIONS: [
    {"action": "create_category", "params": {"name": "Info"}},
    {"action": "create_channel", "params": {"name": "news", "type": "text", "category": "Info"}},
    {"action": "send_message", "params": {"channel": "news", "message": "hi"}}
]"#;
        let actions = parse_response(raw);
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0].action, "create_category");
        assert_eq!(actions[1].action, "create_channel");
        assert_eq!(actions[2].action, "send_message");
        assert_eq!(actions[2].params["message"], "hi");
    }

    #[test]
    fn single_object_is_wrapped_into_a_sequence() {
        let raw = r#"ACTIONS: {"action": "list_users"}"#;
        let actions = parse_response(raw);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, "list_users");
        assert!(actions[0].params.as_object().unwrap().is_empty());
    }

    #[test]
    fn empty_input_yields_one_error_action() {
        for raw in ["", "   \n\t  "] {
            let actions = parse_response(raw);
            assert_eq!(actions.len(), 1);
            assert_eq!(actions[0].action, "error");
            assert!(
                actions[0].params["error"]
                    .as_str()
                    .unwrap()
                    .contains("empty response")
            );
        }
    }

    #[test]
    fn invalid_json_yields_one_error_action_with_original_text() {
        let raw = "ACTIONS: [{not json}]";
        let actions = parse_response(raw);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, "error");
        assert!(
            actions[0].params["error"]
                .as_str()
                .unwrap()
                .contains("invalid JSON")
        );
        assert_eq!(actions[0].params["original_response"], raw);
    }

    #[test]
    fn element_without_action_field_fails_the_whole_parse() {
        let raw = r#"ACTIONS: [{"params": {}}]"#;
        let actions = parse_response(raw);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, "error");
    }

    #[test]
    fn unknown_action_names_pass_through() {
        let raw = r#"ACTIONS: [{"action": "summon_dragons", "params": {"count": 3}}]"#;
        let actions = parse_response(raw);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, "summon_dragons");
    }

    #[test]
    fn legacy_format_parses_one_action() {
        let raw = "Here you go.\nACTION: send_message\nPARAMS: {\"channel\": \"bot\", \"message\": \"hi\"}";
        let actions = parse_response(raw);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, "send_message");
        assert_eq!(actions[0].params["channel"], "bot");
    }

    #[test]
    fn legacy_format_without_params_line_is_an_error() {
        let actions = parse_response("ACTION: send_message");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, "error");
    }

    #[test]
    fn text_before_the_marker_is_ignored() {
        let raw = "I'll send that message for you!\n\nACTIONS: [{\"action\": \"list_commands\"}]";
        let actions = parse_response(raw);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, "list_commands");
    }

    #[test]
    fn null_params_defaults_to_empty_object() {
        let raw = r#"ACTIONS: [{"action": "analyze_roles", "params": null}]"#;
        let actions = parse_response(raw);
        assert_eq!(actions[0].action, "analyze_roles");
        assert!(actions[0].params.as_object().unwrap().is_empty());
    }

    proptest! {
        /// For all valid ACTIONS arrays, parse returns one action per element,
        /// preserving order.
        #[test]
        fn parse_preserves_length_and_order(
            names in proptest::collection::vec("[a-z_]{1,16}", 0..8)
        ) {
            let elements: Vec<serde_json::Value> = names
                .iter()
                .map(|n| serde_json::json!({"action": n, "params": {}}))
                .collect();
            let raw = format!("ACTIONS: {}", serde_json::Value::Array(elements));
            let actions = parse_response(&raw);
            prop_assert_eq!(actions.len(), names.len());
            for (parsed, name) in actions.iter().zip(&names) {
                prop_assert_eq!(&parsed.action, name);
            }
        }
    }
}
