//! Plan-history store integration tests.

use diet_planner_core::db::{Database, DEFAULT_HISTORY_LIMIT};
use diet_planner_core::models::Profile;
use diet_planner_core::{DietEngine, ReferenceData};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sample_profile() -> Profile {
    let mut profile = Profile::new("Asha", 55, "female");
    profile.medical_conditions = "Diabetes".into();
    profile.dietary_preferences = "vegan".into();
    profile
}

#[test]
fn test_generated_plans_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.db");

    let reference = ReferenceData::builtin();
    let engine = DietEngine::new(&reference);
    let mut rng = StdRng::seed_from_u64(42);

    let mut plan_ids = Vec::new();
    {
        let db = Database::open(&path).unwrap();
        db.upsert_profile("asha", &sample_profile()).unwrap();
        for _ in 0..12 {
            let plan = engine.generate_plan(&sample_profile(), &mut rng);
            plan_ids.push(db.insert_plan("asha", &plan).unwrap().plan_id);
        }
    }

    let db = Database::open(&path).unwrap();
    let history = db.plan_history("asha", DEFAULT_HISTORY_LIMIT).unwrap();
    assert_eq!(history.len(), 10);
    assert_eq!(history[0].plan_id, plan_ids[11]);
    assert!(history.iter().all(|p| p.plan.total_calories == 1400));

    let profile = db.get_profile("asha").unwrap().unwrap();
    assert_eq!(profile, sample_profile());
}

#[test]
fn test_stored_plan_json_is_flat() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_profile("asha", &sample_profile()).unwrap();

    let reference = ReferenceData::builtin();
    let engine = DietEngine::new(&reference);
    let plan = engine.generate_plan(&sample_profile(), &mut StdRng::seed_from_u64(1));
    let stored = db.insert_plan("asha", &plan).unwrap();

    let json = serde_json::to_value(&stored).unwrap();
    assert_eq!(json["user_id"], "asha");
    assert_eq!(json["category"], "diabetic_friendly");
    assert_eq!(json["total_calories"], 1400);
    assert!(json["notes"].as_str().unwrap().contains("• Drink plenty of water"));
}
