//! Ingredient templates for the macro-nutrient engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{IngredientRole, MealSlot};

/// Ingredient buckets for one meal slot.
pub type MealTemplate = BTreeMap<IngredientRole, Vec<String>>;

/// Templates keyed by slot. A loaded book may leave slots out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TemplateBook {
    slots: BTreeMap<MealSlot, MealTemplate>,
}

impl Default for TemplateBook {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateBook {
    pub fn from_templates(slots: BTreeMap<MealSlot, MealTemplate>) -> Self {
        Self { slots }
    }

    pub fn get(&self, slot: MealSlot) -> Option<&MealTemplate> {
        self.slots.get(&slot)
    }

    /// Remove a slot's template, returning it.
    pub fn remove(&mut self, slot: MealSlot) -> Option<MealTemplate> {
        self.slots.remove(&slot)
    }

    /// The built-in templates.
    pub fn builtin() -> Self {
        use IngredientRole::{Base, Carbs, HealthyFats, Options, Protein, Vegetables};

        let mut slots = BTreeMap::new();

        slots.insert(
            MealSlot::Breakfast,
            template(&[
                (Base, &["oatmeal", "whole grain toast", "greek yogurt", "eggs"]),
                (Protein, &["eggs", "greek yogurt", "cottage cheese", "nuts"]),
                (Carbs, &["oatmeal", "whole grain bread", "berries", "banana"]),
                (HealthyFats, &["avocado", "nuts", "seeds", "olive oil"]),
            ]),
        );

        slots.insert(
            MealSlot::Lunch,
            template(&[
                (Base, &["quinoa", "brown rice", "whole grain wrap", "salad"]),
                (Protein, &["grilled chicken", "salmon", "tofu", "legumes"]),
                (Vegetables, &["spinach", "broccoli", "bell peppers", "tomatoes"]),
                (HealthyFats, &["olive oil", "avocado", "nuts", "seeds"]),
            ]),
        );

        slots.insert(
            MealSlot::Dinner,
            template(&[
                (Base, &["quinoa", "sweet potato", "brown rice", "cauliflower rice"]),
                (Protein, &["grilled fish", "lean beef", "chicken breast", "lentils"]),
                (Vegetables, &["asparagus", "brussels sprouts", "kale", "carrots"]),
                (HealthyFats, &["olive oil", "avocado", "nuts"]),
            ]),
        );

        slots.insert(
            MealSlot::Snacks,
            template(&[(
                Options,
                &[
                    "apple with almond butter",
                    "greek yogurt with berries",
                    "hummus with vegetables",
                    "handful of nuts",
                    "cottage cheese with cucumber",
                ],
            )]),
        );

        Self { slots }
    }
}

fn template(entries: &[(IngredientRole, &[&str])]) -> MealTemplate {
    entries
        .iter()
        .map(|&(role, names)| (role, names.iter().map(|n| n.to_string()).collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates() {
        let book = TemplateBook::builtin();
        for slot in MealSlot::ALL {
            assert!(book.get(slot).is_some(), "missing template for {:?}", slot);
        }

        let snacks = book.get(MealSlot::Snacks).unwrap();
        assert_eq!(snacks.len(), 1);
        assert_eq!(snacks[&IngredientRole::Options].len(), 5);

        let dinner = book.get(MealSlot::Dinner).unwrap();
        assert_eq!(
            dinner.keys().copied().collect::<Vec<_>>(),
            vec![
                IngredientRole::Base,
                IngredientRole::Protein,
                IngredientRole::Vegetables,
                IngredientRole::HealthyFats,
            ]
        );
    }

    #[test]
    fn test_partial_book_from_json() {
        let book: TemplateBook =
            serde_json::from_str(r#"{"snacks": {"options": ["roasted chickpeas"]}}"#).unwrap();
        assert!(book.get(MealSlot::Breakfast).is_none());
        assert_eq!(
            book.get(MealSlot::Snacks).unwrap()[&IngredientRole::Options],
            vec!["roasted chickpeas".to_string()]
        );
    }
}
