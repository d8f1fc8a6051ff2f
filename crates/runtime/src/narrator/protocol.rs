//! Permissive JSON extraction for model output.
//!
//! Models wrap JSON in markdown fences or add chatter around it. The parser
//! strips one fenced block, then narrows to the span between the first `{`
//! and the last `}`, then requires a JSON object. Anything else yields
//! `None`; it never panics.

use serde_json::{Map, Value};

const FENCE: &str = "```";

pub fn parse_json_object(raw: &str) -> Option<Map<String, Value>> {
    let body = extract_braces(strip_fence(raw.trim()));

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            tracing::debug!(?map, "parsed narrator JSON");
            Some(map)
        }
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "narrator JSON is not an object");
            None
        }
        Err(err) => {
            tracing::warn!(%err, "narrator response is not valid JSON");
            None
        }
    }
}

/// Drops an opening fence line (```` ``` ```` or ```` ```json ````) and the
/// last closing fence, if the text starts with one.
fn strip_fence(raw: &str) -> &str {
    let Some(rest) = raw.strip_prefix(FENCE) else {
        return raw;
    };
    let Some(newline) = rest.find('\n') else {
        return raw;
    };
    let body = &rest[newline + 1..];
    let body = match body.rfind(FENCE) {
        Some(end) => &body[..end],
        None => body,
    };
    body.trim()
}

fn extract_braces(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
