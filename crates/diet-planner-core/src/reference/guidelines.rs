//! Medical guideline table.
//!
//! Thresholds follow WHO, ADA, AHA and DASH recommendations. Every numeric
//! field is optional so a loaded table may omit what it does not define; the
//! nutrition calculator skips a clamp whose value is absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::ConditionKey;

/// Per-condition thresholds and food keyword lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Guideline {
    /// grams of carbohydrate per meal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carb_limit: Option<f64>,
    /// grams of fiber per day (floor)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber_min: Option<f64>,
    /// grams of sugar per day (ceiling)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugar_limit: Option<f64>,
    /// mg of sodium per day (ceiling)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium_limit: Option<f64>,
    /// grams of saturated fat per day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturated_fat_limit: Option<f64>,
    /// mg of potassium per day (floor)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potassium_min: Option<f64>,
    /// kcal below maintenance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorie_deficit: Option<f64>,
    /// grams of protein per kg of body weight
    #[serde(rename = "protein_min", skip_serializing_if = "Option::is_none")]
    pub protein_min_per_kg: Option<f64>,
    pub recommended_foods: Vec<String>,
    /// Lower-case keywords; an ingredient containing any of them is excluded
    pub avoid_foods: Vec<String>,
}

impl Guideline {
    /// First avoid-keyword contained in `ingredient`, if any.
    pub fn avoid_match(&self, ingredient: &str) -> Option<&str> {
        let lower = ingredient.to_lowercase();
        self.avoid_foods
            .iter()
            .map(String::as_str)
            .find(|keyword| lower.contains(keyword))
    }
}

/// Guideline table keyed by condition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct GuidelineTable {
    rules: BTreeMap<ConditionKey, Guideline>,
}

impl Default for GuidelineTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GuidelineTable {
    pub fn from_rules(rules: BTreeMap<ConditionKey, Guideline>) -> Self {
        Self { rules }
    }

    pub fn get(&self, condition: ConditionKey) -> Option<&Guideline> {
        self.rules.get(&condition)
    }

    pub fn conditions(&self) -> impl Iterator<Item = ConditionKey> + '_ {
        self.rules.keys().copied()
    }

    /// The built-in guideline table.
    pub fn builtin() -> Self {
        let mut rules = BTreeMap::new();

        rules.insert(
            ConditionKey::Diabetes,
            Guideline {
                carb_limit: Some(45.0),
                fiber_min: Some(25.0),
                sugar_limit: Some(25.0),
                recommended_foods: strings(&[
                    "whole grains",
                    "lean proteins",
                    "non-starchy vegetables",
                    "legumes",
                    "nuts",
                    "seeds",
                    "low-fat dairy",
                ]),
                avoid_foods: strings(&[
                    "refined sugars",
                    "white bread",
                    "sugary drinks",
                    "processed foods",
                    "high-sodium foods",
                ]),
                ..Default::default()
            },
        );

        rules.insert(
            ConditionKey::HeartDisease,
            Guideline {
                sodium_limit: Some(2300.0),
                saturated_fat_limit: Some(13.0),
                fiber_min: Some(25.0),
                recommended_foods: strings(&[
                    "fatty fish",
                    "olive oil",
                    "nuts",
                    "whole grains",
                    "fruits",
                    "vegetables",
                    "legumes",
                ]),
                avoid_foods: strings(&[
                    "trans fats",
                    "processed meats",
                    "high-sodium foods",
                    "refined carbohydrates",
                    "excessive alcohol",
                ]),
                ..Default::default()
            },
        );

        // DASH diet
        rules.insert(
            ConditionKey::Hypertension,
            Guideline {
                sodium_limit: Some(1500.0),
                potassium_min: Some(3500.0),
                recommended_foods: strings(&[
                    "leafy greens",
                    "berries",
                    "bananas",
                    "beets",
                    "oats",
                    "garlic",
                    "fatty fish",
                    "seeds",
                ]),
                avoid_foods: strings(&[
                    "processed foods",
                    "canned soups",
                    "deli meats",
                    "pizza",
                    "alcohol",
                    "caffeine",
                ]),
                ..Default::default()
            },
        );

        rules.insert(
            ConditionKey::Obesity,
            Guideline {
                calorie_deficit: Some(500.0),
                protein_min_per_kg: Some(1.2),
                recommended_foods: strings(&[
                    "lean proteins",
                    "vegetables",
                    "fruits",
                    "whole grains",
                    "legumes",
                    "low-fat dairy",
                ]),
                avoid_foods: strings(&[
                    "high-calorie drinks",
                    "fried foods",
                    "sweets",
                    "processed snacks",
                    "large portions",
                ]),
                ..Default::default()
            },
        );

        Self { rules }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
