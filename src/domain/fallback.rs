//! Deterministic keyword-based fallback extraction.
//!
//! Used whenever the AI extraction path fails (backend unavailable or
//! malformed output). Trades precision for availability: each rule sets
//! the raw current message as the field value, and already-set fields are
//! never re-evaluated.

use super::fields::{ComplaintFields, FieldKey};

/// Place and locality markers. Matched against the lowercased message.
const LOCATION_INDICATORS: [&str; 19] = [
    "at ", "in ", "near ", "location", "address", "street", "road", "area", "station", "stop",
    "sector", "block", "metro", "railway", "chowk", "nagar", "colony", "phase", "gate",
];

/// Temporal markers. Matched against the lowercased message.
const TIME_INDICATORS: [&str; 20] = [
    "today", "yesterday", "last", "ago", "since", "when", "time", "date", "morning", "evening",
    "night", "afternoon", "am", "pm", "o'clock", "hour", "minute", "day", "week", "month",
];

/// Words suggesting the message carries a callback number.
const CONTACT_INDICATORS: [&str; 6] = ["phone", "mobile", "number", "contact", "call", "reach"];

/// Minimum digit count for a message to be treated as carrying a phone
/// number.
const MIN_CONTACT_DIGITS: usize = 10;

fn digit_count(s: &str) -> usize {
    s.chars().filter(|c| c.is_ascii_digit()).count()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Applies the fallback rules for one user message.
///
/// `turn_count` is the number of turns recorded in the session so far
/// (including the message being processed). The first substantive message
/// is assumed to be the complaint description; that rule short-circuits
/// and no other field is inferred on the same pass.
pub fn apply_fallback(fields: &mut ComplaintFields, turn_count: usize, message: &str) {
    if turn_count <= 2 && !fields.is_set(FieldKey::Description) {
        fields.set_if_substantive(FieldKey::Description, message);
        return;
    }

    let lower = message.to_lowercase();

    if !fields.is_set(FieldKey::Location) && contains_any(&lower, &LOCATION_INDICATORS) {
        fields.set_if_substantive(FieldKey::Location, message);
    }

    if !fields.is_set(FieldKey::Time) && contains_any(&lower, &TIME_INDICATORS) {
        fields.set_if_substantive(FieldKey::Time, message);
    }

    if !fields.is_set(FieldKey::Contact)
        && (contains_any(&lower, &CONTACT_INDICATORS) || message.chars().any(|c| c.is_ascii_digit()))
        && digit_count(message) >= MIN_CONTACT_DIGITS
    {
        fields.set_if_substantive(FieldKey::Contact, message);
    }
}
