//! Diet Planner Core Library
//!
//! Rule-based meal plan recommendations for self-reported health profiles,
//! with a local plan history.
//!
//! # Architecture
//!
//! ```text
//!                    ReferenceData (catalog, guidelines, templates)
//!                          │  loaded once, shared read-only
//!          ┌───────────────┴────────────────┐
//!          ▼                                ▼
//!   Profile (free text)             ExtendedProfile (condition keys)
//!          │                                │
//!     Classifier                   Nutrition Target Calculator
//!          │                                │
//!   Catalog Selector ×4             Template Filter ×4 (+ ×7 weekdays)
//!          │                                │
//!          ▼                                ▼
//!      MealPlan                      PlanOutcome
//!          │                        (Computed | Fallback)
//!          ▼
//!   [diet_plans history]
//! ```
//!
//! # Core Principle
//!
//! **Recommendation never fails.** The simple engine serves a fixed dish
//! when no catalog item fits; the macro-nutrient engine serves a fixed plan
//! when assembly hits an internal error and says so in its outcome.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Profile, MealPlan, NutritionTargets, etc.)
//! - [`reference`]: Food catalog, guideline table and meal templates
//! - [`engine`]: Classifier, target calculator, selectors and planners
//! - [`db`]: SQLite store for profiles and plan history

pub mod db;
pub mod engine;
pub mod models;
pub mod reference;

// Re-export commonly used types
pub use db::Database;
pub use engine::{CategoryClassifier, DietEngine, KeywordClassifier, PlanError};
pub use models::{
    Category, ConditionKey, DailyMeals, DietaryPreference, ExtendedProfile, Meal, MealPlan,
    MealPlanExtended, MealSlot, NutritionTargets, PlanOutcome, Profile, StoredPlan,
};
pub use reference::{ReferenceData, ReferenceError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use tracing::info;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum DietPlannerError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for DietPlannerError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(what) => DietPlannerError::NotFound(what),
            other => DietPlannerError::DatabaseError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for DietPlannerError {
    fn from(e: serde_json::Error) -> Self {
        DietPlannerError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for DietPlannerError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DietPlannerError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a planner database at the given path.
///
/// `reference_path` points at a JSON reference document; when it is absent
/// or unreadable the built-in tables are used.
#[uniffi::export]
pub fn open_planner(
    db_path: String,
    reference_path: Option<String>,
) -> Result<Arc<DietPlannerCore>, DietPlannerError> {
    let db = Database::open(&db_path)?;
    let reference = match reference_path {
        Some(path) => ReferenceData::load_or_default(path),
        None => ReferenceData::builtin(),
    };
    info!(db_path = %db_path, "opened planner");
    Ok(Arc::new(DietPlannerCore::new(db, reference)))
}

/// Create an in-memory planner with built-in reference data (for testing).
#[uniffi::export]
pub fn open_planner_in_memory() -> Result<Arc<DietPlannerCore>, DietPlannerError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(DietPlannerCore::new(db, ReferenceData::builtin())))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe planner for FFI.
#[derive(uniffi::Object)]
pub struct DietPlannerCore {
    db: Arc<Mutex<Database>>,
    reference: Arc<ReferenceData>,
}

impl DietPlannerCore {
    fn new(db: Database, reference: ReferenceData) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            reference: Arc::new(reference),
        }
    }
}

#[uniffi::export]
impl DietPlannerCore {
    // =========================================================================
    // Profile Operations
    // =========================================================================

    /// Save or replace a user's health profile.
    pub fn save_profile(&self, user_id: String, profile: FfiProfile) -> Result<(), DietPlannerError> {
        if user_id.trim().is_empty() {
            return Err(DietPlannerError::InvalidInput("user_id is empty".into()));
        }
        let db = self.db.lock()?;
        db.upsert_profile(&user_id, &profile.into())?;
        Ok(())
    }

    /// Get a user's health profile.
    pub fn get_profile(&self, user_id: String) -> Result<Option<FfiProfile>, DietPlannerError> {
        let db = self.db.lock()?;
        let profile = db.get_profile(&user_id)?;
        Ok(profile.map(|p| p.into()))
    }

    // =========================================================================
    // Plan Operations
    // =========================================================================

    /// Generate a plan from the user's saved profile and record it.
    pub fn generate_plan(&self, user_id: String) -> Result<FfiStoredPlan, DietPlannerError> {
        let db = self.db.lock()?;
        let profile = db.require_profile(&user_id)?;

        let engine = DietEngine::new(&self.reference);
        let plan = engine.generate_plan(&profile, &mut rand::thread_rng());
        let stored = db.insert_plan(&user_id, &plan)?;

        info!(
            user_id = %user_id,
            plan_id = %stored.plan_id,
            category = stored.plan.category.as_str(),
            "generated plan"
        );
        Ok(stored.into())
    }

    /// Most recent stored plan for a user.
    pub fn latest_plan(&self, user_id: String) -> Result<Option<FfiStoredPlan>, DietPlannerError> {
        let db = self.db.lock()?;
        let plan = db.latest_plan(&user_id)?;
        Ok(plan.map(|p| p.into()))
    }

    /// A user's stored plans, newest first.
    pub fn plan_history(
        &self,
        user_id: String,
        limit: u32,
    ) -> Result<Vec<FfiStoredPlan>, DietPlannerError> {
        let db = self.db.lock()?;
        let plans = db.plan_history(&user_id, limit as usize)?;
        Ok(plans.into_iter().map(|p| p.into()).collect())
    }

    /// Delete a stored plan.
    pub fn delete_plan(&self, plan_id: String) -> Result<bool, DietPlannerError> {
        let db = self.db.lock()?;
        Ok(db.delete_plan(&plan_id)?)
    }

    /// Macro-nutrient plan for the user's saved profile, as JSON.
    ///
    /// The `outcome` field is `computed` or `fallback`.
    pub fn generate_meal_plan_json(&self, user_id: String) -> Result<String, DietPlannerError> {
        let profile = {
            let db = self.db.lock()?;
            db.require_profile(&user_id)?
        };

        let engine = DietEngine::new(&self.reference);
        let extended = ExtendedProfile::from(&profile);
        let outcome = engine.generate_meal_plan(&extended, &mut rand::thread_rng());
        Ok(serde_json::to_string(&outcome)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe health profile.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProfile {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub activity_level: Option<String>,
    pub medical_conditions: String,
    pub dietary_preferences: String,
    pub allergies: String,
    pub dislikes: String,
    pub daily_calories: Option<u32>,
}

impl From<Profile> for FfiProfile {
    fn from(profile: Profile) -> Self {
        Self {
            name: profile.name,
            age: profile.age,
            gender: profile.gender,
            weight_kg: profile.weight_kg,
            height_cm: profile.height_cm,
            activity_level: profile.activity_level,
            medical_conditions: profile.medical_conditions,
            dietary_preferences: profile.dietary_preferences,
            allergies: profile.allergies,
            dislikes: profile.dislikes,
            daily_calories: profile.daily_calories,
        }
    }
}

impl From<FfiProfile> for Profile {
    fn from(profile: FfiProfile) -> Self {
        Profile {
            name: profile.name,
            age: profile.age,
            gender: profile.gender,
            weight_kg: profile.weight_kg,
            height_cm: profile.height_cm,
            activity_level: profile.activity_level,
            medical_conditions: profile.medical_conditions,
            dietary_preferences: profile.dietary_preferences,
            allergies: profile.allergies,
            dislikes: profile.dislikes,
            daily_calories: profile.daily_calories,
        }
    }
}

/// FFI-safe simple meal plan.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMealPlan {
    pub category: String,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    pub snacks: String,
    pub total_calories: i32,
    pub notes: String,
}

impl From<MealPlan> for FfiMealPlan {
    fn from(plan: MealPlan) -> Self {
        Self {
            category: plan.category.as_str().to_string(),
            breakfast: plan.breakfast,
            lunch: plan.lunch,
            dinner: plan.dinner,
            snacks: plan.snacks,
            total_calories: plan.total_calories,
            notes: plan.notes,
        }
    }
}

/// FFI-safe stored plan.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStoredPlan {
    pub plan_id: String,
    pub user_id: String,
    pub plan_date: String,
    pub created_at: String,
    pub plan: FfiMealPlan,
}

impl From<StoredPlan> for FfiStoredPlan {
    fn from(stored: StoredPlan) -> Self {
        Self {
            plan_id: stored.plan_id,
            user_id: stored.user_id,
            plan_date: stored.plan_date,
            created_at: stored.created_at,
            plan: stored.plan.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ffi_profile() -> FfiProfile {
        FfiProfile {
            name: "Meera".into(),
            age: 58,
            gender: "female".into(),
            weight_kg: Some(82.0),
            height_cm: Some(160.0),
            activity_level: Some("sedentary".into()),
            medical_conditions: "Hypertension, Obesity".into(),
            dietary_preferences: "vegetarian".into(),
            allergies: "".into(),
            dislikes: "kale".into(),
            daily_calories: Some(1900),
        }
    }

    #[test]
    fn test_profile_round_trip() {
        let core = open_planner_in_memory().unwrap();
        core.save_profile("u1".into(), ffi_profile()).unwrap();

        let fetched = core.get_profile("u1".into()).unwrap().unwrap();
        assert_eq!(fetched.medical_conditions, "Hypertension, Obesity");
        assert_eq!(fetched.daily_calories, Some(1900));
    }

    #[test]
    fn test_empty_user_id_rejected() {
        let core = open_planner_in_memory().unwrap();
        let result = core.save_profile("  ".into(), ffi_profile());
        assert!(matches!(result, Err(DietPlannerError::InvalidInput(_))));
    }

    #[test]
    fn test_generate_plan_requires_profile() {
        let core = open_planner_in_memory().unwrap();
        let result = core.generate_plan("ghost".into());
        assert!(matches!(result, Err(DietPlannerError::NotFound(_))));
    }

    #[test]
    fn test_generate_plan_is_recorded() {
        let core = open_planner_in_memory().unwrap();
        core.save_profile("u1".into(), ffi_profile()).unwrap();

        let stored = core.generate_plan("u1".into()).unwrap();
        assert_eq!(stored.plan.category, "heart_healthy");
        // 1800 - 200 (hypertension) - 100 (age > 50)
        assert_eq!(stored.plan.total_calories, 1500);

        let latest = core.latest_plan("u1".into()).unwrap().unwrap();
        assert_eq!(latest.plan_id, stored.plan_id);
        assert_eq!(core.plan_history("u1".into(), 10).unwrap().len(), 1);

        assert!(core.delete_plan(stored.plan_id).unwrap());
        assert!(core.latest_plan("u1".into()).unwrap().is_none());
    }

    #[test]
    fn test_generate_meal_plan_json() {
        let core = open_planner_in_memory().unwrap();
        core.save_profile("u1".into(), ffi_profile()).unwrap();

        let json = core.generate_meal_plan_json("u1".into()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["outcome"], "computed");
        // 1900 - 500 obesity deficit
        assert_eq!(value["plan"]["nutrition_summary"]["calories"], 1400.0);
        assert_eq!(value["plan"]["nutrition_summary"]["sodium"], 1500.0);
        assert_eq!(value["plan"]["weekly_plan"].as_object().unwrap().len(), 7);
        assert_eq!(value["plan"]["breakfast"]["name"], "Personalized Breakfast");
    }

    #[test]
    fn test_open_planner_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.db");
        let path = path.to_string_lossy().to_string();

        {
            let core = open_planner(path.clone(), None).unwrap();
            core.save_profile("u1".into(), ffi_profile()).unwrap();
            core.generate_plan("u1".into()).unwrap();
        }

        let reopened = open_planner(path, Some("/nonexistent/reference.json".into())).unwrap();
        assert_eq!(reopened.plan_history("u1".into(), 10).unwrap().len(), 1);
    }
}
