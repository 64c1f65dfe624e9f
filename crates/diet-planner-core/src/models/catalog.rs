//! Food catalog vocabulary: meal slots, health categories, diet types.

use serde::{Deserialize, Serialize};

/// One of the four meal occasions in a day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    /// All slots in serving order.
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snacks,
    ];

    /// Wire name of the slot.
    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snacks => "snacks",
        }
    }

    /// Title-cased name used in generated meal names.
    pub fn display_name(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snacks => "Snacks",
        }
    }

    /// Share of the daily calorie target served in this slot.
    pub fn calorie_share(&self) -> f64 {
        match self {
            MealSlot::Breakfast => 0.25,
            MealSlot::Lunch => 0.35,
            MealSlot::Dinner => 0.30,
            MealSlot::Snacks => 0.10,
        }
    }

    /// Item served when no catalog entry survives preference filtering.
    pub fn fallback_item(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Oats with fruits",
            MealSlot::Lunch => "Dal rice with vegetables",
            MealSlot::Dinner => "Roti with vegetables",
            MealSlot::Snacks => "Fresh fruits",
        }
    }
}

/// Collapsed health focus used by the simple engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    DiabeticFriendly,
    HeartHealthy,
    General,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::DiabeticFriendly,
        Category::HeartHealthy,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DiabeticFriendly => "diabetic_friendly",
            Category::HeartHealthy => "heart_healthy",
            Category::General => "general",
        }
    }

    /// Parse a stored category name. Unknown names map to `General`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "diabetic_friendly" => Category::DiabeticFriendly,
            "heart_healthy" => Category::HeartHealthy,
            _ => Category::General,
        }
    }
}

/// Diet-compatibility tag carried by every catalog item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    Vegan,
    Vegetarian,
    Eggetarian,
    NonVegetarian,
}

/// A user's dietary preference as understood by the catalog filter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DietaryPreference {
    Vegan,
    Vegetarian,
    Eggetarian,
    NonVegetarian,
    /// Anything unrecognized; filters like `NonVegetarian`.
    #[default]
    Omnivore,
}

impl DietaryPreference {
    /// Preferences that have a dedicated compatibility set.
    pub const SUPPORTED: [DietaryPreference; 4] = [
        DietaryPreference::Vegan,
        DietaryPreference::Vegetarian,
        DietaryPreference::Eggetarian,
        DietaryPreference::NonVegetarian,
    ];

    /// Parse free text (case-insensitive, trimmed).
    pub fn parse(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "vegan" => DietaryPreference::Vegan,
            "vegetarian" => DietaryPreference::Vegetarian,
            "eggetarian" => DietaryPreference::Eggetarian,
            "non_vegetarian" => DietaryPreference::NonVegetarian,
            _ => DietaryPreference::Omnivore,
        }
    }

    /// Catalog diet types this preference may eat.
    pub fn compatible_types(&self) -> &'static [DietType] {
        match self {
            DietaryPreference::Vegan => &[DietType::Vegan],
            DietaryPreference::Vegetarian => &[DietType::Vegan, DietType::Vegetarian],
            DietaryPreference::Eggetarian => &[DietType::Eggetarian],
            DietaryPreference::NonVegetarian | DietaryPreference::Omnivore => {
                &[DietType::NonVegetarian, DietType::Eggetarian]
            }
        }
    }

    /// Check whether an item tagged `diet_type` fits this preference.
    pub fn accepts(&self, diet_type: DietType) -> bool {
        self.compatible_types().contains(&diet_type)
    }
}

/// A named dish in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodItem {
    /// Display name of the dish
    pub name: String,
    /// Diet compatibility tag
    #[serde(rename = "type")]
    pub diet_type: DietType,
}

impl FoodItem {
    pub fn new(name: impl Into<String>, diet_type: DietType) -> Self {
        Self {
            name: name.into(),
            diet_type,
        }
    }
}

/// Role an ingredient plays in a rich-engine meal template.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IngredientRole {
    Base,
    Protein,
    Carbs,
    Vegetables,
    HealthyFats,
    Options,
}

impl IngredientRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientRole::Base => "base",
            IngredientRole::Protein => "protein",
            IngredientRole::Carbs => "carbs",
            IngredientRole::Vegetables => "vegetables",
            IngredientRole::HealthyFats => "healthy_fats",
            IngredientRole::Options => "options",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_parsing() {
        assert_eq!(DietaryPreference::parse("Vegan"), DietaryPreference::Vegan);
        assert_eq!(DietaryPreference::parse("  VEGETARIAN "), DietaryPreference::Vegetarian);
        assert_eq!(DietaryPreference::parse("eggetarian"), DietaryPreference::Eggetarian);
        assert_eq!(
            DietaryPreference::parse("non_vegetarian"),
            DietaryPreference::NonVegetarian
        );

        // Unknown text falls back to the omnivore filter
        assert_eq!(DietaryPreference::parse("pescatarian"), DietaryPreference::Omnivore);
        assert_eq!(DietaryPreference::parse(""), DietaryPreference::Omnivore);
    }

    #[test]
    fn test_compatibility_sets() {
        assert!(DietaryPreference::Vegan.accepts(DietType::Vegan));
        assert!(!DietaryPreference::Vegan.accepts(DietType::Vegetarian));

        assert!(DietaryPreference::Vegetarian.accepts(DietType::Vegan));
        assert!(DietaryPreference::Vegetarian.accepts(DietType::Vegetarian));
        assert!(!DietaryPreference::Vegetarian.accepts(DietType::Eggetarian));

        // Eggetarian is egg dishes only
        assert!(DietaryPreference::Eggetarian.accepts(DietType::Eggetarian));
        assert!(!DietaryPreference::Eggetarian.accepts(DietType::Vegan));

        assert!(DietaryPreference::NonVegetarian.accepts(DietType::NonVegetarian));
        assert!(DietaryPreference::NonVegetarian.accepts(DietType::Eggetarian));
        assert!(!DietaryPreference::NonVegetarian.accepts(DietType::Vegan));

        assert_eq!(
            DietaryPreference::Omnivore.compatible_types(),
            DietaryPreference::NonVegetarian.compatible_types()
        );
    }

    #[test]
    fn test_calorie_shares_sum_to_one() {
        let total: f64 = MealSlot::ALL.iter().map(|s| s.calorie_share()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_food_item_wire_format() {
        let item = FoodItem::new("Idli with sambhar", DietType::Vegan);
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"name":"Idli with sambhar","type":"vegan"}"#);

        let parsed: FoodItem =
            serde_json::from_str(r#"{"name":"Fish fry","type":"non_vegetarian"}"#).unwrap();
        assert_eq!(parsed.diet_type, DietType::NonVegetarian);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("heart_healthy"), Category::HeartHealthy);
        assert_eq!(Category::parse("whatever"), Category::General);
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), category);
        }
    }
}
