//! Daily nutrition target calculation.
//!
//! Starts from a 15/50/35 protein/carb/fat split of the base calories, then
//! applies each active condition's clamps in the order the conditions are
//! listed. Sodium and fiber clamps are min/max and therefore order-free;
//! saturated fat and potassium are set directly and never interact.

use crate::models::{ConditionKey, NutritionTargets};
use crate::reference::GuidelineTable;

/// Base calories when the profile sets none.
pub const DEFAULT_DAILY_CALORIES: f64 = 2000.0;

/// ADA daily carbohydrate ceiling for diabetes (grams).
pub const DIABETES_DAILY_CARB_CAP: f64 = 135.0;

const PROTEIN_SHARE: f64 = 0.15;
const CARB_SHARE: f64 = 0.50;
const FAT_SHARE: f64 = 0.35;

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARB: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

const DEFAULT_FIBER_G: f64 = 25.0;
const DEFAULT_SODIUM_MG: f64 = 2300.0;
const DEFAULT_SUGAR_G: f64 = 50.0;

impl NutritionTargets {
    /// Unadjusted targets for a calorie budget.
    pub fn baseline(calories: f64) -> Self {
        Self {
            calories,
            protein: (calories * PROTEIN_SHARE / KCAL_PER_G_PROTEIN).round_ties_even(),
            carbs: (calories * CARB_SHARE / KCAL_PER_G_CARB).round_ties_even(),
            fat: (calories * FAT_SHARE / KCAL_PER_G_FAT).round_ties_even(),
            fiber: DEFAULT_FIBER_G,
            sodium: DEFAULT_SODIUM_MG,
            sugar: DEFAULT_SUGAR_G,
            saturated_fat: None,
            potassium: None,
        }
    }
}

/// Compute daily targets for a set of active conditions.
///
/// Never fails: conditions without a guideline entry are skipped, as is any
/// clamp whose guideline value is absent. The obesity protein floor needs a
/// positive `weight_kg` and is skipped otherwise.
pub fn calculate_targets(
    guidelines: &GuidelineTable,
    daily_calories: Option<u32>,
    conditions: &[ConditionKey],
    weight_kg: Option<f64>,
) -> NutritionTargets {
    let base = daily_calories
        .map(f64::from)
        .unwrap_or(DEFAULT_DAILY_CALORIES);
    let mut targets = NutritionTargets::baseline(base);

    for &condition in conditions {
        let Some(rule) = guidelines.get(condition) else {
            continue;
        };

        match condition {
            ConditionKey::Diabetes => {
                targets.carbs = targets.carbs.min(DIABETES_DAILY_CARB_CAP);
                if let Some(fiber_min) = rule.fiber_min {
                    targets.fiber = targets.fiber.max(fiber_min);
                }
                if let Some(sugar_limit) = rule.sugar_limit {
                    targets.sugar = targets.sugar.min(sugar_limit);
                }
            }
            ConditionKey::HeartDisease => {
                if let Some(sodium_limit) = rule.sodium_limit {
                    targets.sodium = targets.sodium.min(sodium_limit);
                }
                if let Some(fiber_min) = rule.fiber_min {
                    targets.fiber = targets.fiber.max(fiber_min);
                }
                if let Some(limit) = rule.saturated_fat_limit {
                    targets.saturated_fat = Some(limit);
                }
            }
            ConditionKey::Hypertension => {
                if let Some(sodium_limit) = rule.sodium_limit {
                    targets.sodium = targets.sodium.min(sodium_limit);
                }
                if let Some(potassium_min) = rule.potassium_min {
                    targets.potassium = Some(potassium_min);
                }
            }
            ConditionKey::Obesity => {
                if let Some(deficit) = rule.calorie_deficit {
                    targets.calories -= deficit;
                }
                match (weight_kg, rule.protein_min_per_kg) {
                    (Some(weight), Some(per_kg)) if weight > 0.0 => {
                        targets.protein = targets.protein.max(weight * per_kg);
                    }
                    _ => {}
                }
            }
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> GuidelineTable {
        GuidelineTable::builtin()
    }

    #[test]
    fn test_baseline_split() {
        let targets = calculate_targets(&table(), None, &[], None);
        assert_eq!(targets.calories, 2000.0);
        assert_eq!(targets.protein, 75.0);
        assert_eq!(targets.carbs, 250.0);
        assert_eq!(targets.fat, 78.0); // 700 / 9 = 77.8
        assert_eq!(targets.fiber, 25.0);
        assert_eq!(targets.sodium, 2300.0);
        assert_eq!(targets.sugar, 50.0);
        assert_eq!(targets.saturated_fat, None);
        assert_eq!(targets.potassium, None);
    }

    #[test]
    fn test_diabetes_clamps() {
        let targets = calculate_targets(&table(), Some(1800), &[ConditionKey::Diabetes], None);
        assert_eq!(targets.carbs, 135.0);
        assert_eq!(targets.sugar, 25.0);
        assert_eq!(targets.fiber, 25.0);
        assert_eq!(targets.calories, 1800.0);
    }

    #[test]
    fn test_diabetes_keeps_lower_carbs() {
        // 1000 kcal → 125 g carbs, already under the cap
        let targets = calculate_targets(&table(), Some(1000), &[ConditionKey::Diabetes], None);
        assert_eq!(targets.carbs, 125.0);
    }

    #[test]
    fn test_heart_disease_and_hypertension() {
        let targets = calculate_targets(
            &table(),
            None,
            &[ConditionKey::HeartDisease, ConditionKey::Hypertension],
            None,
        );
        assert_eq!(targets.sodium, 1500.0);
        assert_eq!(targets.saturated_fat, Some(13.0));
        assert_eq!(targets.potassium, Some(3500.0));

        // Reversed order gives the same result
        let reversed = calculate_targets(
            &table(),
            None,
            &[ConditionKey::Hypertension, ConditionKey::HeartDisease],
            None,
        );
        assert_eq!(targets, reversed);
    }

    #[test]
    fn test_obesity_deficit_and_protein_floor() {
        let targets = calculate_targets(&table(), Some(2200), &[ConditionKey::Obesity], Some(95.0));
        assert_eq!(targets.calories, 1700.0);
        // 95 kg * 1.2 = 114 g beats 2200 * 0.15 / 4 = 82.5 → 82 g
        assert!((targets.protein - 114.0).abs() < 1e-9);
    }

    #[test]
    fn test_baseline_rounds_half_to_even() {
        // 82.5 g protein
        assert_eq!(NutritionTargets::baseline(2200.0).protein, 82.0);
        // 1300 * 0.35 / 9 = 50.6 g fat, 162.5 g carbs
        let targets = NutritionTargets::baseline(1300.0);
        assert_eq!(targets.carbs, 162.0);
        assert_eq!(targets.fat, 51.0);
    }

    #[test]
    fn test_obesity_without_weight_skips_protein_floor() {
        let targets = calculate_targets(&table(), None, &[ConditionKey::Obesity], None);
        assert_eq!(targets.calories, 1500.0);
        assert_eq!(targets.protein, 75.0);

        let zero = calculate_targets(&table(), None, &[ConditionKey::Obesity], Some(0.0));
        assert_eq!(zero.protein, 75.0);
    }

    #[test]
    fn test_condition_without_guideline_is_skipped() {
        let empty = GuidelineTable::from_rules(Default::default());
        let targets = calculate_targets(&empty, None, &ConditionKey::ALL, Some(80.0));
        assert_eq!(targets, NutritionTargets::baseline(2000.0));
    }

    #[test]
    fn test_idempotent() {
        let conditions = [ConditionKey::Obesity, ConditionKey::Diabetes];
        let a = calculate_targets(&table(), Some(2400), &conditions, Some(88.0));
        let b = calculate_targets(&table(), Some(2400), &conditions, Some(88.0));
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
