//! The closed department routing taxonomy.
//!
//! Five fixed categories; `General` is the universal safe default. The
//! topic hints exist only for prompt construction and never participate
//! in matching logic.

use serde::{Deserialize, Serialize};

/// A handling department a complaint can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Railway,
    DelhiPolice,
    IncomeTax,
    DelhiTraffic,
    General,
}

impl Department {
    /// All departments, `General` last.
    pub const ALL: [Department; 5] = [
        Department::Railway,
        Department::DelhiPolice,
        Department::IncomeTax,
        Department::DelhiTraffic,
        Department::General,
    ];

    /// The lowercase, underscore-joined routing key.
    pub fn as_key(&self) -> &'static str {
        match self {
            Department::Railway => "railway",
            Department::DelhiPolice => "delhi_police",
            Department::IncomeTax => "income_tax",
            Department::DelhiTraffic => "delhi_traffic",
            Department::General => "general",
        }
    }

    /// Human-facing name used in mail subjects and summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            Department::Railway => "Railway",
            Department::DelhiPolice => "Delhi Police",
            Department::IncomeTax => "Income Tax",
            Department::DelhiTraffic => "Delhi Traffic",
            Department::General => "General",
        }
    }

    /// Example sub-topics embedded in the classification prompt.
    pub fn topic_hints(&self) -> &'static str {
        match self {
            Department::Railway => {
                "train issues, railway stations, railway accidents, coach problems, \
                 railway booking, railway safety, railway staff, tracks, platforms"
            }
            Department::DelhiPolice => {
                "crime, theft, law and order, police complaints, FIR, harassment, \
                 missing persons, police misconduct"
            }
            Department::IncomeTax => {
                "tax issues, tax refunds, tax fraud, PAN card, income tax returns, \
                 tax notices, tax assessment"
            }
            Department::DelhiTraffic => {
                "traffic violations, traffic signals, traffic accidents, road safety, \
                 parking issues, traffic police, challan, DL, RC"
            }
            Department::General => "other issues not fitting above categories",
        }
    }

    /// Parses a routing key after normalization (trim + lowercase).
    ///
    /// Returns `None` for anything outside the taxonomy; the caller
    /// decides the default.
    pub fn parse_key(raw: &str) -> Option<Department> {
        match raw.trim().to_lowercase().as_str() {
            "railway" => Some(Department::Railway),
            "delhi_police" => Some(Department::DelhiPolice),
            "income_tax" => Some(Department::IncomeTax),
            "delhi_traffic" => Some(Department::DelhiTraffic),
            "general" => Some(Department::General),
            _ => None,
        }
    }

}

// Display writes the routing key so logs and serialized values agree.
impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}
