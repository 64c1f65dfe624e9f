//! Reference data for the recommendation engine.
//!
//! Food catalog, medical guideline table and ingredient templates are loaded
//! once and shared read-only by every engine call. A JSON document may
//! override any section; omitted sections keep the built-in defaults.

mod catalog;
mod guidelines;
mod templates;

pub use catalog::*;
pub use guidelines::*;
pub use templates::*;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Category, MealSlot};

/// Reference data loading errors.
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Failed to read reference data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid reference data JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog has no {category:?} bucket for {slot:?}")]
    MissingBucket { slot: MealSlot, category: Category },
}

pub type ReferenceResult<T> = Result<T, ReferenceError>;

/// Immutable configuration injected into the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReferenceData {
    pub catalog: FoodCatalog,
    pub guidelines: GuidelineTable,
    pub templates: TemplateBook,
}

impl ReferenceData {
    /// Built-in tables.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON reference document.
    pub fn from_json_str(json: &str) -> ReferenceResult<Self> {
        let data: ReferenceData = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Load and validate a JSON reference file.
    pub fn load<P: AsRef<Path>>(path: P) -> ReferenceResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let data = Self::from_json_str(&text)?;
        info!(
            path = %path.as_ref().display(),
            catalog_items = data.catalog.len(),
            "loaded reference data"
        );
        Ok(data)
    }

    /// Load a reference file, falling back to the built-in tables on any error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(data) => data,
            Err(e) => {
                warn!(
                    path = %path.as_ref().display(),
                    error = %e,
                    "using built-in reference data"
                );
                Self::builtin()
            }
        }
    }

    /// Check that every (slot, category) bucket exists.
    ///
    /// Buckets lacking items for some preference are logged but accepted;
    /// selection falls back to the fixed per-slot item for those.
    pub fn validate(&self) -> ReferenceResult<()> {
        if let Some(&(slot, category)) = self.catalog.missing_buckets().first() {
            return Err(ReferenceError::MissingBucket { slot, category });
        }

        for gap in self.catalog.coverage_gaps() {
            warn!(
                slot = gap.slot.as_str(),
                category = gap.category.as_str(),
                preference = ?gap.preference,
                "no compatible catalog item; slot fallback will be served"
            );
        }
        Ok(())
    }

    /// Serialize to pretty JSON (the same shape `from_json_str` reads).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConditionKey, DietaryPreference};

    #[test]
    fn test_builtin_validates() {
        assert!(ReferenceData::builtin().validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_builtin_sections() {
        let data = ReferenceData::from_json_str("{}").unwrap();
        assert_eq!(data, ReferenceData::builtin());
    }

    #[test]
    fn test_guideline_override_keeps_other_sections() {
        let json = r#"{
            "guidelines": {
                "hypertension": {"sodium_limit": 1200, "potassium_min": 4700}
            }
        }"#;
        let data = ReferenceData::from_json_str(json).unwrap();

        let rule = data.guidelines.get(ConditionKey::Hypertension).unwrap();
        assert_eq!(rule.sodium_limit, Some(1200.0));
        // The table was replaced wholesale
        assert!(data.guidelines.get(ConditionKey::Diabetes).is_none());
        // Catalog untouched
        assert_eq!(data.catalog, FoodCatalog::builtin());
    }

    #[test]
    fn test_incomplete_catalog_rejected() {
        let json = r#"{
            "catalog": {
                "breakfast": {"general": [{"name": "Vegetable poha", "type": "vegan"}]}
            }
        }"#;
        let result = ReferenceData::from_json_str(json);
        assert!(matches!(
            result,
            Err(ReferenceError::MissingBucket { .. })
        ));
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            ReferenceData::from_json_str("{not json"),
            Err(ReferenceError::Json(_))
        ));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.json");
        std::fs::write(&path, ReferenceData::builtin().to_json().unwrap()).unwrap();

        let loaded = ReferenceData::load(&path).unwrap();
        assert_eq!(loaded, ReferenceData::builtin());
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let data = ReferenceData::load_or_default("/nonexistent/reference.json");
        assert_eq!(
            data.catalog
                .compatible_names(MealSlot::Lunch, Category::General, DietaryPreference::Vegan)
                .len(),
            1
        );
    }
}
