//! Canned response table.
//!
//! Categories are kept in a list because matching breaks ties by table
//! order. The JSON form is therefore an array of
//! `{"name", "patterns", "responses"}` objects rather than a map.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Category used when no other category matches.
pub const DEFAULT_CATEGORY: &str = "default";

/// Response table loading errors.
#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("Failed to read response table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid response table JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Category {0:?} has no responses")]
    NoResponses(String),

    #[error("Duplicate category {0:?}")]
    DuplicateCategory(String),
}

pub type ResponseResult<T> = Result<T, ResponseError>;

/// A topic with its trigger keywords and candidate replies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseCategory {
    pub name: String,
    /// Lower-case substrings; each one found in a message counts once
    #[serde(default)]
    pub patterns: Vec<String>,
    pub responses: Vec<String>,
}

impl ResponseCategory {
    fn new(name: &str, patterns: &[&str], responses: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
            responses: responses.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Number of patterns contained in a lower-cased message.
    pub fn match_count(&self, message: &str) -> usize {
        self.patterns
            .iter()
            .filter(|pattern| message.contains(pattern.as_str()))
            .count()
    }
}

/// Ordered response categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ResponseTable {
    categories: Vec<ResponseCategory>,
}

impl Default for ResponseTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ResponseTable {
    /// Build a table from categories, checking names and responses.
    pub fn from_categories(categories: Vec<ResponseCategory>) -> ResponseResult<Self> {
        let table = Self { categories };
        table.validate()?;
        Ok(table)
    }

    pub fn from_json_str(json: &str) -> ResponseResult<Self> {
        let categories: Vec<ResponseCategory> = serde_json::from_str(json)?;
        Self::from_categories(categories)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> ResponseResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let table = Self::from_json_str(&text)?;
        info!(
            path = %path.as_ref().display(),
            categories = table.categories.len(),
            "loaded response table"
        );
        Ok(table)
    }

    /// Load a table, falling back to the built-in responses on any error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(table) => table,
            Err(e) => {
                warn!(
                    path = %path.as_ref().display(),
                    error = %e,
                    "using built-in responses"
                );
                Self::builtin()
            }
        }
    }

    fn validate(&self) -> ResponseResult<()> {
        for (i, category) in self.categories.iter().enumerate() {
            if category.responses.is_empty() {
                return Err(ResponseError::NoResponses(category.name.clone()));
            }
            if self.categories[..i].iter().any(|c| c.name == category.name) {
                return Err(ResponseError::DuplicateCategory(category.name.clone()));
            }
        }
        Ok(())
    }

    pub fn categories(&self) -> &[ResponseCategory] {
        &self.categories
    }

    pub fn get(&self, name: &str) -> Option<&ResponseCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn default_category(&self) -> Option<&ResponseCategory> {
        self.get(DEFAULT_CATEGORY)
    }

    /// Category with the most pattern hits; the earliest wins a tie.
    ///
    /// `message` must already be lower-cased. Returns `None` when nothing
    /// matches; the default category is never returned here.
    pub fn best_match(&self, message: &str) -> Option<&ResponseCategory> {
        let mut best: Option<(&ResponseCategory, usize)> = None;
        for category in &self.categories {
            if category.name == DEFAULT_CATEGORY {
                continue;
            }
            let hits = category.match_count(message);
            if hits > best.map_or(0, |(_, n)| n) {
                best = Some((category, hits));
            }
        }
        best.map(|(category, _)| category)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The built-in responses.
    pub fn builtin() -> Self {
        let categories = vec![
            ResponseCategory::new(
                "greetings",
                &["hello", "hi", "hey", "good morning", "good afternoon"],
                &[
                    "Hello! I'm your personal diet assistant. How can I help you with your nutrition goals today?",
                    "Hi there! I'm here to help you with diet planning and nutrition questions. What would you like to know?",
                    "Welcome! I'm your diet assistant, ready to assist you with healthy eating and meal planning. How can I help?",
                ],
            ),
            ResponseCategory::new(
                "diabetes",
                &["diabetes", "blood sugar", "glucose", "diabetic", "insulin"],
                &[
                    "For diabetes management, focus on complex carbohydrates, lean proteins, and high-fiber foods. Limit simple sugars and refined carbs.",
                    "Managing diabetes involves eating regular meals, monitoring carb intake (45g per meal), and choosing low glycemic index foods.",
                    "Key diabetes-friendly foods include: whole grains, legumes, non-starchy vegetables, lean proteins, and healthy fats like nuts and olive oil.",
                ],
            ),
            ResponseCategory::new(
                "heart_disease",
                &["heart", "cardiovascular", "cholesterol", "heart disease", "cardiac"],
                &[
                    "For heart health, follow a Mediterranean-style diet rich in omega-3 fatty acids, fiber, and antioxidants. Limit saturated fats and sodium.",
                    "Heart-healthy foods include: fatty fish, olive oil, nuts, whole grains, fruits, and vegetables. Avoid trans fats and processed foods.",
                    "The DASH diet is excellent for heart health - emphasize fruits, vegetables, whole grains, and lean proteins while limiting sodium to 2300mg daily.",
                ],
            ),
            ResponseCategory::new(
                "hypertension",
                &["blood pressure", "hypertension", "high bp", "pressure"],
                &[
                    "For high blood pressure, follow the DASH diet: increase potassium-rich foods, limit sodium to 1500mg daily, and eat plenty of fruits and vegetables.",
                    "Foods that help lower blood pressure include: leafy greens, berries, beets, oats, bananas, garlic, and fatty fish.",
                    "Reduce sodium by avoiding processed foods, canned soups, and restaurant meals. Use herbs and spices for flavor instead of salt.",
                ],
            ),
            ResponseCategory::new(
                "weight_loss",
                &["weight loss", "lose weight", "obesity", "overweight", "diet"],
                &[
                    "For healthy weight loss, create a moderate calorie deficit (500 calories/day), focus on protein (1.2g per kg body weight), and eat plenty of vegetables.",
                    "Effective weight loss strategies: portion control, regular meals, high-protein foods, fiber-rich vegetables, and staying hydrated.",
                    "Choose nutrient-dense, low-calorie foods like vegetables, lean proteins, and whole grains. Avoid liquid calories and processed snacks.",
                ],
            ),
            ResponseCategory::new(
                "meal_planning",
                &["meal plan", "what to eat", "menu", "meals", "planning"],
                &[
                    "A balanced meal should include: 1/2 plate vegetables, 1/4 plate lean protein, 1/4 plate whole grains, plus healthy fats.",
                    "Plan meals around your health conditions. Include variety, prepare in advance, and focus on whole, unprocessed foods.",
                    "Meal planning tips: batch cook proteins, prep vegetables, use herbs and spices for flavor, and keep healthy snacks available.",
                ],
            ),
            ResponseCategory::new(
                "nutrition",
                &["nutrition", "nutrients", "vitamins", "minerals", "healthy eating"],
                &[
                    "Focus on getting nutrients from whole foods: colorful fruits and vegetables, lean proteins, whole grains, and healthy fats.",
                    "Key nutrients for health: fiber (25g daily), protein (0.8-1.2g per kg), omega-3 fatty acids, vitamins D and B12, and minerals like iron and calcium.",
                    "Eat a rainbow of colors to ensure diverse nutrients. Each color provides different antioxidants and phytonutrients.",
                ],
            ),
            ResponseCategory::new(
                "cooking",
                &["cooking", "recipe", "how to cook", "preparation", "cook"],
                &[
                    "Healthy cooking methods: steaming, grilling, baking, sautéing with minimal oil, and roasting. Avoid deep frying.",
                    "Cooking tips: use herbs and spices instead of salt, cook vegetables until just tender, and don't overcook to preserve nutrients.",
                    "Meal prep ideas: batch cook grains and proteins, pre-cut vegetables, and prepare healthy snacks in advance.",
                ],
            ),
            ResponseCategory::new(
                "supplements",
                &["supplements", "vitamins", "pills", "supplement"],
                &[
                    "Focus on getting nutrients from food first. Common supplements that may be beneficial: Vitamin D, B12 (for vegans), and omega-3 if you don't eat fish.",
                    "Consult your healthcare provider before starting supplements. Most nutrients are better absorbed from whole foods.",
                    "If you have specific deficiencies, targeted supplements may help, but a balanced diet should be your primary source of nutrients.",
                ],
            ),
            ResponseCategory::new(
                "exercise",
                &["exercise", "workout", "physical activity", "fitness"],
                &[
                    "Combine diet with regular physical activity for best results. Aim for 150 minutes of moderate exercise weekly.",
                    "Exercise helps with blood sugar control, heart health, and weight management. Start slowly and gradually increase intensity.",
                    "Both cardio and strength training are important. Even a 10-minute walk after meals can help with blood sugar control.",
                ],
            ),
            ResponseCategory::new(
                DEFAULT_CATEGORY,
                &[],
                &[
                    "I'm here to help with diet and nutrition questions. You can ask me about meal planning, specific health conditions, or healthy eating tips.",
                    "I can assist with diabetes, heart disease, hypertension, and weight management nutrition. What specific topic interests you?",
                    "Feel free to ask about healthy recipes, meal planning, or nutrition for your specific health needs. How can I help you today?",
                ],
            ),
        ];

        Self { categories }
    }
}
