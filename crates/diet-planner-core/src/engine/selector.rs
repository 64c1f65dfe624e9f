//! Catalog selection and template ingredient filtering.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::models::{Category, DietaryPreference, ExtendedProfile, IngredientRole, MealSlot};
use crate::reference::{FoodCatalog, GuidelineTable, MealTemplate};

/// Animal proteins a vegetarian never gets.
const VEGETARIAN_EXCLUDED: &[&str] = &["chicken", "beef", "fish", "salmon"];

/// Animal-derived ingredients a vegan never gets.
const VEGAN_EXCLUDED: &[&str] = &["eggs", "yogurt", "cheese", "chicken", "beef", "fish", "salmon"];

/// Catalog items of a (slot, category) bucket that fit a preference.
pub fn compatible_items(
    catalog: &FoodCatalog,
    slot: MealSlot,
    category: Category,
    preference: DietaryPreference,
) -> Vec<&str> {
    catalog.compatible_names(slot, category, preference)
}

/// Pick one compatible catalog item for a slot, or the slot's fallback dish.
pub fn select_item<R: Rng + ?Sized>(
    catalog: &FoodCatalog,
    slot: MealSlot,
    category: Category,
    preference: DietaryPreference,
    rng: &mut R,
) -> String {
    let candidates = compatible_items(catalog, slot, category, preference);
    match candidates.choose(rng) {
        Some(name) => name.to_string(),
        None => {
            debug!(
                slot = slot.as_str(),
                category = category.as_str(),
                preference = ?preference,
                "no compatible item, serving fallback"
            );
            slot.fallback_item().to_string()
        }
    }
}

/// Why an ingredient was dropped from a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    Allergy(String),
    Dislike(String),
    Diet(DietaryPreference),
    Guideline(String),
}

/// Check one ingredient against a profile, returning the first reason to drop it.
pub fn exclusion_for(
    ingredient: &str,
    profile: &ExtendedProfile,
    guidelines: &GuidelineTable,
) -> Option<Exclusion> {
    let lower = ingredient.to_lowercase();

    if let Some(allergy) = profile.allergies.iter().find(|a| matches_keyword(&lower, a)) {
        return Some(Exclusion::Allergy(allergy.clone()));
    }
    if let Some(dislike) = profile.dislikes.iter().find(|d| matches_keyword(&lower, d)) {
        return Some(Exclusion::Dislike(dislike.clone()));
    }

    let diet_excluded: &[&str] = match profile.dietary_preference {
        DietaryPreference::Vegetarian => VEGETARIAN_EXCLUDED,
        DietaryPreference::Vegan => VEGAN_EXCLUDED,
        _ => &[],
    };
    if diet_excluded.iter().any(|word| lower.contains(word)) {
        return Some(Exclusion::Diet(profile.dietary_preference));
    }

    profile
        .conditions
        .iter()
        .filter_map(|&condition| guidelines.get(condition))
        .find_map(|rule| rule.avoid_match(&lower))
        .map(|keyword| Exclusion::Guideline(keyword.to_string()))
}

/// Drop every template ingredient the profile must not eat.
///
/// Role order and ingredient order are preserved. A role may end up empty;
/// it is kept so the meal still shows which buckets were considered.
pub fn filter_template(
    template: &MealTemplate,
    profile: &ExtendedProfile,
    guidelines: &GuidelineTable,
) -> MealTemplate {
    template
        .iter()
        .map(|(&role, ingredients)| {
            let kept = ingredients
                .iter()
                .filter(|ingredient| match exclusion_for(ingredient, profile, guidelines) {
                    Some(reason) => {
                        trace!(ingredient = %ingredient, ?reason, "excluded ingredient");
                        false
                    }
                    None => true,
                })
                .cloned()
                .collect();
            (role, kept)
        })
        .collect()
}

/// Pick one ingredient from each non-empty role.
pub fn pick_selection<R: Rng + ?Sized>(
    ingredients: &MealTemplate,
    rng: &mut R,
) -> BTreeMap<IngredientRole, String> {
    ingredients
        .iter()
        .filter_map(|(&role, options)| options.choose(rng).map(|pick| (role, pick.clone())))
        .collect()
}

fn matches_keyword(ingredient: &str, keyword: &str) -> bool {
    let keyword = keyword.trim().to_lowercase();
    !keyword.is_empty() && ingredient.contains(&keyword)
}
