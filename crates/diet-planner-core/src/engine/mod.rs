//! Recommendation engines.
//!
//! The simple engine classifies a profile into one category and draws one
//! catalog dish per slot. The macro-nutrient engine derives daily targets
//! from every active condition and builds structured meals from templates.

pub mod classifier;
pub mod notes;
pub mod nutrition;
pub mod planner;
pub mod selector;

pub use classifier::{CategoryClassifier, KeywordClassifier};
pub use nutrition::{calculate_targets, DIABETES_DAILY_CARB_CAP};
pub use planner::{daily_calorie_target, fallback_plan, DietEngine};

use thiserror::Error;

use crate::models::MealSlot;

/// Internal macro-nutrient engine failures.
///
/// Never returned by [`DietEngine::generate_meal_plan`]; they select the
/// fallback plan instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("No ingredient template for {0:?}")]
    MissingTemplate(MealSlot),
}

pub type PlanResult<T> = Result<T, PlanError>;
