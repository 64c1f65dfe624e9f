//! Health category classification.
//!
//! Strict priority, not multi-label: diabetes > heart/hypertension > general.

use tracing::debug;

use crate::models::{Category, ConditionKey};

/// Maps a profile's conditions to a single health category.
///
/// The keyword rules below are the default; a trained model can be plugged
/// in by implementing this trait.
pub trait CategoryClassifier: Send + Sync {
    /// Classify free-text conditions (e.g., "Diabetes, Heart Disease").
    fn classify(&self, conditions: &str) -> Category;

    /// Classify a normalized condition list.
    fn classify_keys(&self, conditions: &[ConditionKey]) -> Category;
}

/// Substring keyword classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl CategoryClassifier for KeywordClassifier {
    fn classify(&self, conditions: &str) -> Category {
        let text = conditions.trim().to_lowercase();

        let category = if text.contains("diabetes") {
            Category::DiabeticFriendly
        } else if text.contains("hypertension") || text.contains("heart") {
            Category::HeartHealthy
        } else {
            Category::General
        };

        debug!(conditions = %text, category = category.as_str(), "classified profile");
        category
    }

    fn classify_keys(&self, conditions: &[ConditionKey]) -> Category {
        if conditions.contains(&ConditionKey::Diabetes) {
            Category::DiabeticFriendly
        } else if conditions.contains(&ConditionKey::Hypertension)
            || conditions.contains(&ConditionKey::HeartDisease)
        {
            Category::HeartHealthy
        } else {
            Category::General
        }
    }
}
