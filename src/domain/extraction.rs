//! Recovery of structured field data from language-backend output.
//!
//! The backend is asked for a bare JSON object, but real responses arrive
//! raw, inside a fenced code block (with or without a language tag), or
//! surrounded by prose. Parsing failures are data, not exceptions: the
//! outcome is a tagged result and the failure variants deterministically
//! trigger the keyword fallback upstream.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// Outcome of one AI extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// The backend returned a parseable field mapping.
    Extracted(BTreeMap<String, String>),
    /// The backend answered, but the response was not a usable JSON object.
    Malformed(String),
    /// The backend call itself failed.
    ServiceFailure,
}

/// Errors produced while recovering a field mapping from raw text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseFieldsError {
    #[error("JSON parse error: {0}")]
    Parse(String),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Parses a field mapping out of raw backend output.
///
/// Non-string scalar values are stringified; nested values are dropped.
/// Key filtering against the fixed vocabulary happens at merge time.
pub fn parse_field_json(raw: &str) -> Result<BTreeMap<String, String>, ParseFieldsError> {
    let candidate = extract_json_payload(raw);
    let value: Value =
        serde_json::from_str(&candidate).map_err(|e| ParseFieldsError::Parse(e.to_string()))?;

    let object = match value {
        Value::Object(map) => map,
        Value::Array(_) => return Err(ParseFieldsError::NotAnObject("an array")),
        Value::String(_) => return Err(ParseFieldsError::NotAnObject("a string")),
        Value::Number(_) => return Err(ParseFieldsError::NotAnObject("a number")),
        Value::Bool(_) => return Err(ParseFieldsError::NotAnObject("a boolean")),
        Value::Null => return Err(ParseFieldsError::NotAnObject("null")),
    };

    let mut fields = BTreeMap::new();
    for (key, value) in object {
        match value {
            Value::String(s) => {
                fields.insert(key, s);
            }
            Value::Number(n) => {
                fields.insert(key, n.to_string());
            }
            Value::Bool(b) => {
                fields.insert(key, b.to_string());
            }
            // Nested structures and nulls carry no field value.
            _ => {}
        }
    }
    Ok(fields)
}

/// Pulls the JSON payload out of a possibly-decorated response.
fn extract_json_payload(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Some(inner) = extract_from_code_block(trimmed) {
        return inner;
    }

    if let Some(start) = trimmed.find('{') {
        if let Some(balanced) = extract_balanced_object(trimmed, start) {
            return balanced;
        }
    }

    trimmed.to_string()
}

/// Looks for ```json ... ``` or ``` ... ``` fences.
fn extract_from_code_block(s: &str) -> Option<String> {
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    for pattern in patterns {
        if let Some(start) = s.find(pattern) {
            let payload_start = start + pattern.len();
            if let Some(end) = s[payload_start..].find("```") {
                return Some(s[payload_start..payload_start + end].trim().to_string());
            }
        }
    }
    None
}

/// Scans for a balanced object starting at `start`, string-aware.
fn extract_balanced_object(s: &str, start: usize) -> Option<String> {
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(s[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }
    None
}
