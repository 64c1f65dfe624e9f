//! User profile models consumed by the recommendation engine.

use serde::{Deserialize, Serialize};

use super::{ConditionKey, DietaryPreference};

/// A self-reported health profile as stored for a user.
///
/// Conditions, preference and allergies are kept as the free text the user
/// submitted; the simple engine matches on substrings of these fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Profile {
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Gender, compared case-insensitively against "male"
    pub gender: String,
    /// Body weight in kg
    pub weight_kg: Option<f64>,
    /// Height in cm
    pub height_cm: Option<f64>,
    /// Activity level (e.g., "sedentary", "moderate")
    pub activity_level: Option<String>,
    /// Comma-joined condition names (e.g., "Diabetes, Heart Disease")
    pub medical_conditions: String,
    /// Dietary preference (vegan, vegetarian, eggetarian, non_vegetarian)
    pub dietary_preferences: String,
    /// Comma-separated allergy keywords
    pub allergies: String,
    /// Comma-separated disliked-food keywords
    pub dislikes: String,
    /// Explicit daily calorie goal, if the user set one
    pub daily_calories: Option<u32>,
}

impl Profile {
    /// Create a profile with the fields every engine requires.
    pub fn new(name: impl Into<String>, age: u32, gender: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            gender: gender.into(),
            ..Default::default()
        }
    }

    /// Condition text as the classifier sees it (lower-cased, trimmed).
    pub fn normalized_conditions(&self) -> String {
        self.medical_conditions.trim().to_lowercase()
    }

    /// Preference text as the note generator sees it (lower-cased, trimmed).
    pub fn normalized_preference(&self) -> String {
        self.dietary_preferences.trim().to_lowercase()
    }

    pub fn is_male(&self) -> bool {
        self.gender.trim().eq_ignore_ascii_case("male")
    }
}

/// Profile for the macro-nutrient engine, with conditions as normalized keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtendedProfile {
    pub name: Option<String>,
    pub age: u32,
    pub gender: String,
    /// Required only for the obesity protein floor
    pub weight_kg: Option<f64>,
    /// Base calories; 2000 when unset
    pub daily_calories: Option<u32>,
    /// Active conditions in the order they were reported
    pub conditions: Vec<ConditionKey>,
    pub dietary_preference: DietaryPreference,
    /// Substring exclusions (case-insensitive)
    pub allergies: Vec<String>,
    /// Substring exclusions (case-insensitive)
    pub dislikes: Vec<String>,
}

impl ExtendedProfile {
    pub fn has_condition(&self, key: ConditionKey) -> bool {
        self.conditions.contains(&key)
    }
}

impl From<&Profile> for ExtendedProfile {
    fn from(profile: &Profile) -> Self {
        let name = profile.name.trim();
        Self {
            name: if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            },
            age: profile.age,
            gender: profile.gender.clone(),
            weight_kg: profile.weight_kg,
            daily_calories: profile.daily_calories,
            conditions: ConditionKey::parse_list(&profile.medical_conditions),
            dietary_preference: DietaryPreference::parse(&profile.dietary_preferences),
            allergies: split_keywords(&profile.allergies),
            dislikes: split_keywords(&profile.dislikes),
        }
    }
}

/// Split a comma-separated keyword field, dropping blanks.
pub fn split_keywords(text: &str) -> Vec<String> {
    text.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
