//! Meal plan models produced by the engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Category, IngredientRole, MealSlot};

/// Daily nutrition targets derived from base calories and active conditions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionTargets {
    /// kcal per day
    pub calories: f64,
    /// grams per day
    pub protein: f64,
    /// grams per day
    pub carbs: f64,
    /// grams per day
    pub fat: f64,
    /// grams per day
    pub fiber: f64,
    /// mg per day
    pub sodium: f64,
    /// grams per day
    pub sugar: f64,
    /// grams per day (set when heart disease is active)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<f64>,
    /// mg per day (set when hypertension is active)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potassium: Option<f64>,
}

/// Per-meal share of the daily targets, rounded to whole units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Portions {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

/// Display-ready nutrition estimate for a meal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimatedNutrition {
    pub calories: i64,
    /// e.g. "19g"
    pub protein: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium: Option<String>,
}

/// A structured meal from the macro-nutrient engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    /// e.g. "Personalized Lunch"
    pub name: String,
    /// Surviving ingredients grouped by role; a role may be empty
    pub ingredients: BTreeMap<IngredientRole, Vec<String>>,
    /// One pick per non-empty role
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selection: BTreeMap<IngredientRole, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portions: Option<Portions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,
    pub nutrition: EstimatedNutrition,
    pub health_benefits: Vec<String>,
}

/// One meal per slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyMeals {
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    pub snacks: Meal,
}

impl DailyMeals {
    pub fn get(&self, slot: MealSlot) -> &Meal {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    /// Iterate meals in serving order.
    pub fn iter(&self) -> impl Iterator<Item = (MealSlot, &Meal)> {
        MealSlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }
}

/// Day of the week used as the weekly plan key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];
}

/// Simple-engine output: one dish per slot plus calories and notes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPlan {
    /// Category the profile was classified into
    pub category: Category,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    pub snacks: String,
    pub total_calories: i32,
    /// Newline-joined bullet lines
    pub notes: String,
}

impl MealPlan {
    pub fn item(&self, slot: MealSlot) -> &str {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    /// Individual note bullets.
    pub fn note_lines(&self) -> impl Iterator<Item = &str> {
        self.notes.lines()
    }
}

/// A simple-engine plan as kept in a user's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredPlan {
    pub plan_id: String,
    pub user_id: String,
    /// YYYY-MM-DD (UTC)
    pub plan_date: String,
    #[serde(flatten)]
    pub plan: MealPlan,
    /// RFC 3339
    pub created_at: String,
}

/// Macro-nutrient engine output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPlanExtended {
    #[serde(flatten)]
    pub today: DailyMeals,
    pub weekly_plan: BTreeMap<Weekday, DailyMeals>,
    pub nutrition_summary: NutritionTargets,
}

/// Result of a macro-nutrient plan request.
///
/// Generation never fails past its boundary; an internal error yields the
/// fixed minimal plan and the reason it was used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlanOutcome {
    Computed { plan: MealPlanExtended },
    Fallback { plan: DailyMeals, reason: String },
}

impl PlanOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, PlanOutcome::Fallback { .. })
    }

    /// Today's meals, regardless of outcome.
    pub fn meals(&self) -> &DailyMeals {
        match self {
            PlanOutcome::Computed { plan } => &plan.today,
            PlanOutcome::Fallback { plan, .. } => plan,
        }
    }

    pub fn computed(&self) -> Option<&MealPlanExtended> {
        match self {
            PlanOutcome::Computed { plan } => Some(plan),
            PlanOutcome::Fallback { .. } => None,
        }
    }
}
