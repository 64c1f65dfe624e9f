//! Plan assembly for both engines.
//!
//! ```text
//! Profile ──► classifier ──► category ──► select_item ×4 ──► MealPlan
//!                                          + calories + notes
//!
//! ExtendedProfile ──► calculate_targets ──► generate_meal ×4 ──► today
//!                                        └► generate_meal ×4 ×7 ──► weekly_plan
//! ```

use std::collections::BTreeMap;

use rand::Rng;
use tracing::{debug, warn};

use super::classifier::{CategoryClassifier, KeywordClassifier};
use super::notes::{
    advisory_notes, cooking_instructions, health_benefits, MEAL_FIBER_RANGE, MEAL_SODIUM_RANGE,
};
use super::nutrition::calculate_targets;
use super::selector::{filter_template, pick_selection, select_item};
use super::{PlanError, PlanResult};
use crate::models::{
    DailyMeals, DietaryPreference, EstimatedNutrition, ExtendedProfile, IngredientRole, Meal,
    MealPlan, MealPlanExtended, MealSlot, NutritionTargets, PlanOutcome, Portions, Profile,
    Weekday,
};
use crate::reference::ReferenceData;

const BASE_DAILY_CALORIES: i32 = 1800;
const DIABETES_ADJUSTMENT: i32 = -300;
const HYPERTENSION_ADJUSTMENT: i32 = -200;
const SENIOR_AGE: u32 = 50;
const SENIOR_ADJUSTMENT: i32 = -100;
const MALE_ADJUSTMENT: i32 = 200;

/// Recommendation engine over a shared, read-only reference context.
pub struct DietEngine<'a> {
    reference: &'a ReferenceData,
    classifier: Box<dyn CategoryClassifier>,
}

impl<'a> DietEngine<'a> {
    /// Engine with the keyword classifier.
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self::with_classifier(reference, Box::new(KeywordClassifier::new()))
    }

    pub fn with_classifier(
        reference: &'a ReferenceData,
        classifier: Box<dyn CategoryClassifier>,
    ) -> Self {
        Self {
            reference,
            classifier,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        self.reference
    }

    /// Simple engine: one catalog dish per slot, a calorie figure and notes.
    ///
    /// Never fails. Slots with no compatible dish get their fixed fallback.
    pub fn generate_plan<R: Rng + ?Sized>(&self, profile: &Profile, rng: &mut R) -> MealPlan {
        let conditions = profile.normalized_conditions();
        let preference_text = profile.normalized_preference();
        let preference = DietaryPreference::parse(&preference_text);
        let category = self.classifier.classify(&conditions);

        let catalog = &self.reference.catalog;
        let mut pick = |slot| select_item(catalog, slot, category, preference, &mut *rng);

        let plan = MealPlan {
            category,
            breakfast: pick(MealSlot::Breakfast),
            lunch: pick(MealSlot::Lunch),
            dinner: pick(MealSlot::Dinner),
            snacks: pick(MealSlot::Snacks),
            total_calories: daily_calorie_target(profile),
            notes: advisory_notes(&conditions, &preference_text),
        };

        debug!(
            category = category.as_str(),
            total_calories = plan.total_calories,
            "generated meal plan"
        );
        plan
    }

    /// Rich engine: structured meals, a weekly plan and nutrition targets.
    ///
    /// Never fails past this boundary. Any internal error is logged and the
    /// fixed minimal plan is returned as [`PlanOutcome::Fallback`].
    pub fn generate_meal_plan<R: Rng + ?Sized>(
        &self,
        profile: &ExtendedProfile,
        rng: &mut R,
    ) -> PlanOutcome {
        match self.try_generate(profile, rng) {
            Ok(plan) => PlanOutcome::Computed { plan },
            Err(e) => {
                warn!(error = %e, "meal plan generation failed, serving fallback plan");
                PlanOutcome::Fallback {
                    plan: fallback_plan(),
                    reason: e.to_string(),
                }
            }
        }
    }

    fn try_generate<R: Rng + ?Sized>(
        &self,
        profile: &ExtendedProfile,
        rng: &mut R,
    ) -> PlanResult<MealPlanExtended> {
        let nutrition_summary = self.targets(profile);
        let today = self.daily_meals(profile, &nutrition_summary, rng)?;

        let mut weekly_plan = BTreeMap::new();
        for day in Weekday::ALL {
            let targets = self.targets(profile);
            weekly_plan.insert(day, self.daily_meals(profile, &targets, rng)?);
        }

        Ok(MealPlanExtended {
            today,
            weekly_plan,
            nutrition_summary,
        })
    }

    fn targets(&self, profile: &ExtendedProfile) -> NutritionTargets {
        calculate_targets(
            &self.reference.guidelines,
            profile.daily_calories,
            &profile.conditions,
            profile.weight_kg,
        )
    }

    fn daily_meals<R: Rng + ?Sized>(
        &self,
        profile: &ExtendedProfile,
        targets: &NutritionTargets,
        rng: &mut R,
    ) -> PlanResult<DailyMeals> {
        Ok(DailyMeals {
            breakfast: self.generate_meal(MealSlot::Breakfast, profile, targets, rng)?,
            lunch: self.generate_meal(MealSlot::Lunch, profile, targets, rng)?,
            dinner: self.generate_meal(MealSlot::Dinner, profile, targets, rng)?,
            snacks: self.generate_meal(MealSlot::Snacks, profile, targets, rng)?,
        })
    }

    /// Build one structured meal for a slot.
    pub fn generate_meal<R: Rng + ?Sized>(
        &self,
        slot: MealSlot,
        profile: &ExtendedProfile,
        targets: &NutritionTargets,
        rng: &mut R,
    ) -> PlanResult<Meal> {
        let template = self
            .reference
            .templates
            .get(slot)
            .ok_or(PlanError::MissingTemplate(slot))?;

        let ingredients = filter_template(template, profile, &self.reference.guidelines);
        let selection = pick_selection(&ingredients, rng);
        let portions = portions(targets, slot);

        Ok(Meal {
            name: format!("Personalized {}", slot.display_name()),
            ingredients,
            selection,
            portions: Some(portions),
            instructions: cooking_instructions(),
            nutrition: EstimatedNutrition {
                calories: portions.calories,
                protein: format!("{}g", portions.protein),
                carbohydrates: Some(format!("{}g", portions.carbs)),
                fat: Some(format!("{}g", portions.fat)),
                fiber: Some(MEAL_FIBER_RANGE.to_string()),
                sodium: Some(MEAL_SODIUM_RANGE.to_string()),
            },
            health_benefits: health_benefits(&profile.conditions),
        })
    }
}

/// Simple-engine calorie figure.
///
/// Diabetes and hypertension adjustments are exclusive, matching the
/// classifier's priority. Deterministic in (conditions, age, gender).
pub fn daily_calorie_target(profile: &Profile) -> i32 {
    let conditions = profile.normalized_conditions();
    let mut calories = BASE_DAILY_CALORIES;

    if conditions.contains("diabetes") {
        calories += DIABETES_ADJUSTMENT;
    } else if conditions.contains("hypertension") {
        calories += HYPERTENSION_ADJUSTMENT;
    }
    if profile.age > SENIOR_AGE {
        calories += SENIOR_ADJUSTMENT;
    }
    if profile.is_male() {
        calories += MALE_ADJUSTMENT;
    }
    calories
}

/// A slot's share of the daily targets, halves rounded to even.
pub fn portions(targets: &NutritionTargets, slot: MealSlot) -> Portions {
    let share = slot.calorie_share();
    Portions {
        calories: (targets.calories * share).round_ties_even() as i64,
        protein: (targets.protein * share).round_ties_even() as i64,
        carbs: (targets.carbs * share).round_ties_even() as i64,
        fat: (targets.fat * share).round_ties_even() as i64,
    }
}

/// The fixed minimal plan served when rich generation fails.
pub fn fallback_plan() -> DailyMeals {
    DailyMeals {
        breakfast: fixed_meal(
            "Healthy Breakfast",
            &[(IngredientRole::Base, "oatmeal"), (IngredientRole::Protein, "greek yogurt")],
            300,
            "15g",
            "Provides sustained energy",
        ),
        lunch: fixed_meal(
            "Balanced Lunch",
            &[(IngredientRole::Base, "quinoa"), (IngredientRole::Protein, "grilled chicken")],
            450,
            "25g",
            "Complete protein source",
        ),
        dinner: fixed_meal(
            "Nutritious Dinner",
            &[(IngredientRole::Base, "brown rice"), (IngredientRole::Protein, "salmon")],
            400,
            "30g",
            "Rich in omega-3 fatty acids",
        ),
        snacks: fixed_meal(
            "Healthy Snack",
            &[(IngredientRole::Options, "apple with almond butter")],
            150,
            "5g",
            "Provides healthy fats and fiber",
        ),
    }
}

fn fixed_meal(
    name: &str,
    ingredients: &[(IngredientRole, &str)],
    calories: i64,
    protein: &str,
    benefit: &str,
) -> Meal {
    Meal {
        name: name.to_string(),
        ingredients: ingredients
            .iter()
            .map(|&(role, item)| (role, vec![item.to_string()]))
            .collect(),
        selection: BTreeMap::new(),
        portions: None,
        instructions: Vec::new(),
        nutrition: EstimatedNutrition {
            calories,
            protein: protein.to_string(),
            carbohydrates: None,
            fat: None,
            fiber: None,
            sodium: None,
        },
        health_benefits: vec![benefit.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ConditionKey};
    use crate::reference::GuidelineTable;
    use rand::rngs::mock::StepRng;

    fn profile(conditions: &str, preference: &str, age: u32, gender: &str) -> Profile {
        let mut p = Profile::new("Test", age, gender);
        p.medical_conditions = conditions.into();
        p.dietary_preferences = preference.into();
        p
    }

    #[test]
    fn test_calorie_target_rules() {
        assert_eq!(daily_calorie_target(&profile("", "", 30, "female")), 1800);
        assert_eq!(daily_calorie_target(&profile("Diabetes", "", 55, "female")), 1400);
        assert_eq!(daily_calorie_target(&profile("Hypertension", "", 40, "male")), 1800);
        // Diabetes wins over hypertension
        assert_eq!(
            daily_calorie_target(&profile("Hypertension, Diabetes", "", 30, "female")),
            1500
        );
        // Heart disease alone carries no calorie adjustment
        assert_eq!(daily_calorie_target(&profile("Heart Disease", "", 30, "female")), 1800);
        // Exactly 50 is not senior
        assert_eq!(daily_calorie_target(&profile("", "", 50, "male")), 2000);
    }

    #[test]
    fn test_simple_plan_with_first_pick() {
        let reference = ReferenceData::builtin();
        let engine = DietEngine::new(&reference);
        let mut rng = StepRng::new(0, 0);

        let plan = engine.generate_plan(&profile("Heart Disease", "vegan", 35, "female"), &mut rng);
        assert_eq!(plan.category, Category::HeartHealthy);
        assert_eq!(plan.breakfast, "Oats with ground flaxseed and almond milk");
        assert_eq!(plan.lunch, "Barley and lentil soup with whole grain roll");
        assert_eq!(plan.dinner, "Vegetable khichdi with flaxseed tadka");
        assert_eq!(plan.snacks, "Fresh fruit bowl with chia");
        assert!(plan.notes.contains("• Limit salt intake"));
    }

    #[test]
    fn test_custom_classifier_is_used() {
        struct AlwaysGeneral;
        impl CategoryClassifier for AlwaysGeneral {
            fn classify(&self, _: &str) -> Category {
                Category::General
            }
            fn classify_keys(&self, _: &[ConditionKey]) -> Category {
                Category::General
            }
        }

        let reference = ReferenceData::builtin();
        let engine = DietEngine::with_classifier(&reference, Box::new(AlwaysGeneral));
        let mut rng = StepRng::new(0, 0);

        let plan = engine.generate_plan(&profile("Diabetes", "vegan", 30, "female"), &mut rng);
        assert_eq!(plan.category, Category::General);
        assert_eq!(plan.breakfast, "Idli with sambhar");
        // Calories and notes still follow the condition text
        assert_eq!(plan.total_calories, 1500);
    }

    #[test]
    fn test_portions() {
        let targets = NutritionTargets::baseline(2000.0);
        let breakfast = portions(&targets, MealSlot::Breakfast);
        assert_eq!(
            breakfast,
            Portions {
                calories: 500,
                protein: 19,
                carbs: 62,
                fat: 20,
            }
        );
    }

    #[test]
    fn test_portions_round_half_to_even() {
        let targets = NutritionTargets::baseline(2000.0);
        // 75 * 0.30 = 22.5, 250 * 0.25 = 62.5, 78 * 0.25 = 19.5
        assert_eq!(portions(&targets, MealSlot::Dinner).protein, 22);
        assert_eq!(portions(&targets, MealSlot::Breakfast).carbs, 62);
        assert_eq!(portions(&targets, MealSlot::Breakfast).fat, 20);

        let diabetic = calculate_targets(
            &GuidelineTable::builtin(),
            None,
            &[ConditionKey::Diabetes],
            None,
        );
        // 135 * 0.30 = 40.5
        assert_eq!(portions(&diabetic, MealSlot::Dinner).carbs, 40);
    }

    #[test]
    fn test_generate_meal_shape() {
        let reference = ReferenceData::builtin();
        let engine = DietEngine::new(&reference);
        let mut rng = StepRng::new(0, 0);
        let extended = ExtendedProfile {
            conditions: vec![ConditionKey::Diabetes],
            ..Default::default()
        };
        let targets = NutritionTargets::baseline(2000.0);

        let meal = engine
            .generate_meal(MealSlot::Snacks, &extended, &targets, &mut rng)
            .unwrap();
        assert_eq!(meal.name, "Personalized Snacks");
        assert_eq!(meal.nutrition.calories, 200);
        assert_eq!(meal.nutrition.fiber.as_deref(), Some("8-12g"));
        assert_eq!(meal.instructions.len(), 5);
        assert_eq!(meal.health_benefits.len(), 2);
        assert_eq!(
            meal.selection[&IngredientRole::Options],
            "apple with almond butter"
        );
    }

    #[test]
    fn test_fallback_plan_contents() {
        let plan = fallback_plan();
        assert_eq!(plan.breakfast.name, "Healthy Breakfast");
        assert_eq!(plan.lunch.nutrition.calories, 450);
        assert_eq!(plan.dinner.ingredients[&IngredientRole::Protein], vec!["salmon"]);
        assert_eq!(plan.snacks.health_benefits, vec!["Provides healthy fats and fiber"]);
        let total: i64 = plan.iter().map(|(_, meal)| meal.nutrition.calories).sum();
        assert_eq!(total, 1300);
    }

    #[test]
    fn test_negative_calorie_target_still_computes() {
        let reference = ReferenceData::builtin();
        let engine = DietEngine::new(&reference);
        let mut rng = StepRng::new(0, 0);

        // 400 kcal minus the 500 kcal obesity deficit
        let extended = ExtendedProfile {
            daily_calories: Some(400),
            conditions: vec![ConditionKey::Obesity],
            ..Default::default()
        };
        let outcome = engine.generate_meal_plan(&extended, &mut rng);
        let plan = outcome.computed().unwrap();

        assert_eq!(plan.nutrition_summary.calories, -100.0);
        assert_eq!(plan.today.breakfast.nutrition.calories, -25);
        assert_eq!(plan.weekly_plan.len(), 7);
    }
}
