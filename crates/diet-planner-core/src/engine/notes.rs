//! Advisory notes, cooking instructions and health benefit lines.

use crate::models::ConditionKey;

const BULLET: &str = "• ";

/// Fiber estimate shown on every computed meal.
pub const MEAL_FIBER_RANGE: &str = "8-12g";

/// Sodium estimate shown on every computed meal.
pub const MEAL_SODIUM_RANGE: &str = "300-600mg";

const DIABETES_NOTES: &[&str] = &[
    "Avoid sugar and refined carbs",
    "Include high-fiber foods",
    "Eat small frequent meals",
];

const HEART_NOTES: &[&str] = &[
    "Limit salt intake",
    "Include omega-3 rich foods",
    "Avoid processed foods",
];

const VEGETARIAN_NOTES: &[&str] = &[
    "Ensure adequate protein from legumes and dairy",
    "Include B12 and iron-rich foods",
];

const EGGETARIAN_NOTES: &[&str] = &[
    "Eggs are a great protein source",
    "Avoid frying eggs; boil or poach instead",
];

const GENERAL_NOTES: &[&str] = &["Drink plenty of water", "Exercise regularly"];

const COOKING_STEPS: [&str; 5] = [
    "1. Prepare all ingredients according to portion sizes",
    "2. Cook proteins using healthy methods (grilling, baking, steaming)",
    "3. Steam or lightly sauté vegetables with minimal oil",
    "4. Combine ingredients and season with herbs and spices",
    "5. Serve immediately while fresh",
];

/// Bullet notes for the simple engine.
///
/// Both arguments are lower-cased free text. Matching is by substring, so a
/// "non_vegetarian" preference also receives the vegetarian notes.
pub fn advisory_notes(conditions: &str, preference: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();

    if conditions.contains("diabetes") {
        lines.extend_from_slice(DIABETES_NOTES);
    }
    if conditions.contains("hypertension") || conditions.contains("heart") {
        lines.extend_from_slice(HEART_NOTES);
    }

    if preference.contains("vegetarian") {
        lines.extend_from_slice(VEGETARIAN_NOTES);
    } else if preference.contains("eggetarian") {
        lines.extend_from_slice(EGGETARIAN_NOTES);
    }

    lines.extend_from_slice(GENERAL_NOTES);

    lines
        .iter()
        .map(|line| format!("{BULLET}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The fixed five-step preparation method.
pub fn cooking_instructions() -> Vec<String> {
    COOKING_STEPS.iter().map(|s| s.to_string()).collect()
}

/// Two benefit lines per active condition, in condition order.
pub fn health_benefits(conditions: &[ConditionKey]) -> Vec<String> {
    conditions
        .iter()
        .flat_map(|condition| benefit_lines(*condition))
        .map(|s| s.to_string())
        .collect()
}

fn benefit_lines(condition: ConditionKey) -> [&'static str; 2] {
    match condition {
        ConditionKey::Diabetes => [
            "Helps stabilize blood sugar levels",
            "High fiber content aids glucose control",
        ],
        ConditionKey::HeartDisease => [
            "Supports cardiovascular health",
            "Rich in heart-healthy omega-3 fatty acids",
        ],
        ConditionKey::Hypertension => [
            "Low sodium content helps manage blood pressure",
            "Potassium-rich foods support healthy BP",
        ],
        ConditionKey::Obesity => [
            "Balanced macronutrients support weight management",
            "High protein content promotes satiety",
        ],
    }
}
