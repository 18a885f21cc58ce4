//! The fixed complaint field vocabulary and its update discipline.
//!
//! Every complaint is represented by at most four structured fields:
//! description, location, time, and contact. Presence of a field (not its
//! value) drives dialog progression, so the update rules matter:
//! a set field is only ever overwritten by a later *non-empty* value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A key in the fixed complaint field vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKey {
    Description,
    Location,
    Time,
    Contact,
}

impl FieldKey {
    /// All keys, in the information-collection order.
    pub const ALL: [FieldKey; 4] = [
        FieldKey::Description,
        FieldKey::Location,
        FieldKey::Time,
        FieldKey::Contact,
    ];

    /// The wire/prompt name of this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Description => "description",
            FieldKey::Location => "location",
            FieldKey::Time => "time",
            FieldKey::Contact => "contact",
        }
    }

    /// Parses a key from its wire name. Unknown names are rejected so
    /// extraneous keys in backend output are silently dropped upstream.
    pub fn parse(s: &str) -> Option<FieldKey> {
        match s {
            "description" => Some(FieldKey::Description),
            "location" => Some(FieldKey::Location),
            "time" => Some(FieldKey::Time),
            "contact" => Some(FieldKey::Contact),
            _ => None,
        }
    }

    /// Human-facing label used in outbound mail.
    pub fn display_label(&self) -> &'static str {
        match self {
            FieldKey::Description => "What Happened",
            FieldKey::Location => "Location",
            FieldKey::Time => "When",
            FieldKey::Contact => "Contact Information",
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structured fields collected for one complaint.
///
/// Values are stored trimmed; an empty or whitespace-only value never
/// replaces an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl ComplaintFields {
    /// Creates an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for a key, if set.
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        match key {
            FieldKey::Description => self.description.as_deref(),
            FieldKey::Location => self.location.as_deref(),
            FieldKey::Time => self.time.as_deref(),
            FieldKey::Contact => self.contact.as_deref(),
        }
    }

    /// Returns true if the key holds a non-empty value.
    pub fn is_set(&self, key: FieldKey) -> bool {
        self.get(key).is_some()
    }

    /// Sets a field if the candidate value is substantive (non-empty after
    /// trimming). Returns true if the field was updated.
    pub fn set_if_substantive(&mut self, key: FieldKey, value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return false;
        }
        let slot = match key {
            FieldKey::Description => &mut self.description,
            FieldKey::Location => &mut self.location,
            FieldKey::Time => &mut self.time,
            FieldKey::Contact => &mut self.contact,
        };
        *slot = Some(trimmed.to_string());
        true
    }

    /// Merges an extracted key/value mapping. Unknown keys and empty
    /// values are ignored; known non-empty values overwrite.
    pub fn merge_extracted(&mut self, extracted: &BTreeMap<String, String>) {
        for (name, value) in extracted {
            if let Some(key) = FieldKey::parse(name) {
                self.set_if_substantive(key, value);
            }
        }
    }

    /// Keys still missing, in collection order.
    pub fn missing(&self) -> Vec<FieldKey> {
        FieldKey::ALL
            .into_iter()
            .filter(|k| !self.is_set(*k))
            .collect()
    }

    /// Keys already collected, in collection order.
    pub fn collected(&self) -> Vec<FieldKey> {
        FieldKey::ALL
            .into_iter()
            .filter(|k| self.is_set(*k))
            .collect()
    }

    /// True once the three essential fields are present. Contact is
    /// optional and does not gate completion.
    pub fn essentials_complete(&self) -> bool {
        self.description.is_some() && self.location.is_some() && self.time.is_some()
    }

    /// True if no field has been collected yet.
    pub fn is_empty(&self) -> bool {
        FieldKey::ALL.iter().all(|k| !self.is_set(*k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_never_overwrites() {
        let mut fields = ComplaintFields::new();
        assert!(fields.set_if_substantive(FieldKey::Location, "Rajiv Chowk Metro"));
        assert!(!fields.set_if_substantive(FieldKey::Location, "   "));
        assert!(!fields.set_if_substantive(FieldKey::Location, ""));
        assert_eq!(fields.get(FieldKey::Location), Some("Rajiv Chowk Metro"));
    }

    #[test]
    fn later_nonempty_value_overwrites() {
        let mut fields = ComplaintFields::new();
        fields.set_if_substantive(FieldKey::Time, "yesterday");
        fields.set_if_substantive(FieldKey::Time, "4:00 PM yesterday");
        assert_eq!(fields.get(FieldKey::Time), Some("4:00 PM yesterday"));
    }

    #[test]
    fn values_are_stored_trimmed() {
        let mut fields = ComplaintFields::new();
        fields.set_if_substantive(FieldKey::Description, "  my wallet was stolen  ");
        assert_eq!(fields.get(FieldKey::Description), Some("my wallet was stolen"));
    }

    #[test]
    fn merge_ignores_unknown_keys_and_empty_values() {
        let mut fields = ComplaintFields::new();
        let mut extracted = BTreeMap::new();
        extracted.insert("description".to_string(), "pothole on the road".to_string());
        extracted.insert("severity".to_string(), "high".to_string());
        extracted.insert("location".to_string(), "  ".to_string());
        fields.merge_extracted(&extracted);

        assert_eq!(fields.get(FieldKey::Description), Some("pothole on the road"));
        assert!(!fields.is_set(FieldKey::Location));
    }

    #[test]
    fn missing_follows_collection_order() {
        let mut fields = ComplaintFields::new();
        fields.set_if_substantive(FieldKey::Location, "Sector 15");
        assert_eq!(
            fields.missing(),
            vec![FieldKey::Description, FieldKey::Time, FieldKey::Contact]
        );
    }

    #[test]
    fn essentials_ignore_contact() {
        let mut fields = ComplaintFields::new();
        fields.set_if_substantive(FieldKey::Description, "theft");
        fields.set_if_substantive(FieldKey::Location, "metro station");
        assert!(!fields.essentials_complete());
        fields.set_if_substantive(FieldKey::Time, "4pm");
        assert!(fields.essentials_complete());
        assert!(!fields.is_set(FieldKey::Contact));
    }

    #[test]
    fn serializes_only_present_fields() {
        let mut fields = ComplaintFields::new();
        fields.set_if_substantive(FieldKey::Description, "noise complaint");
        let json = serde_json::to_string(&fields).unwrap();
        assert!(json.contains("description"));
        assert!(!json.contains("location"));
    }

    #[test]
    fn field_key_round_trips_through_wire_name() {
        for key in FieldKey::ALL {
            assert_eq!(FieldKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(FieldKey::parse("severity"), None);
    }
}
