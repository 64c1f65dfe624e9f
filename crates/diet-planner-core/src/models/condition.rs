//! Medical condition vocabulary shared by the engine and the advisor.

use serde::{Deserialize, Serialize};

/// A normalized medical-condition key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKey {
    Diabetes,
    HeartDisease,
    Hypertension,
    Obesity,
}

impl ConditionKey {
    pub const ALL: [ConditionKey; 4] = [
        ConditionKey::Diabetes,
        ConditionKey::HeartDisease,
        ConditionKey::Hypertension,
        ConditionKey::Obesity,
    ];

    /// Wire key of the condition.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionKey::Diabetes => "diabetes",
            ConditionKey::HeartDisease => "heart_disease",
            ConditionKey::Hypertension => "hypertension",
            ConditionKey::Obesity => "obesity",
        }
    }

    /// Name shown on profile forms ("Heart Disease").
    pub fn display_name(&self) -> &'static str {
        match self {
            ConditionKey::Diabetes => "Diabetes",
            ConditionKey::HeartDisease => "Heart Disease",
            ConditionKey::Hypertension => "Hypertension",
            ConditionKey::Obesity => "Obesity",
        }
    }

    /// Parse a single condition name.
    ///
    /// Accepts both keys (`heart_disease`) and display names (`Heart Disease`).
    pub fn parse(text: &str) -> Option<Self> {
        let key = text.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "diabetes" => Some(ConditionKey::Diabetes),
            "heart_disease" => Some(ConditionKey::HeartDisease),
            "hypertension" => Some(ConditionKey::Hypertension),
            "obesity" => Some(ConditionKey::Obesity),
            _ => None,
        }
    }

    /// Parse a comma-joined condition list.
    ///
    /// Unknown entries are dropped; duplicates keep their first position.
    pub fn parse_list(text: &str) -> Vec<Self> {
        let mut keys = Vec::new();
        for key in text.split(',').filter_map(Self::parse) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    /// Join keys back into the comma-separated display form stored on profiles.
    pub fn join_display(keys: &[ConditionKey]) -> String {
        keys.iter()
            .map(|k| k.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
