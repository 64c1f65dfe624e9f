//! SQLite schema definition.

/// Complete database schema for the plan-history store.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- User Profiles
-- ============================================================================

CREATE TABLE IF NOT EXISTS user_profiles (
    user_id TEXT PRIMARY KEY,                    -- caller-supplied identity
    name TEXT NOT NULL,
    age INTEGER NOT NULL CHECK (age >= 0),
    gender TEXT NOT NULL DEFAULT '',
    weight_kg REAL,
    height_cm REAL,
    activity_level TEXT,
    medical_conditions TEXT NOT NULL DEFAULT '', -- comma-joined display names
    dietary_preferences TEXT NOT NULL DEFAULT '',
    allergies TEXT NOT NULL DEFAULT '',          -- comma-separated keywords
    dislikes TEXT NOT NULL DEFAULT '',           -- comma-separated keywords
    daily_calories INTEGER,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- ============================================================================
-- Diet Plans (history, newest first)
-- ============================================================================

CREATE TABLE IF NOT EXISTS diet_plans (
    plan_id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES user_profiles(user_id) ON DELETE CASCADE,
    plan_date TEXT NOT NULL,                     -- YYYY-MM-DD (UTC)
    category TEXT NOT NULL
        CHECK (category IN ('diabetic_friendly', 'heart_healthy', 'general')),
    breakfast TEXT NOT NULL,
    lunch TEXT NOT NULL,
    dinner TEXT NOT NULL,
    snacks TEXT NOT NULL,
    total_calories INTEGER NOT NULL,
    notes TEXT NOT NULL DEFAULT '',              -- newline-joined bullets
    created_at TEXT NOT NULL                     -- RFC 3339, microseconds
);

CREATE INDEX IF NOT EXISTS idx_plans_user_created ON diet_plans(user_id, created_at);
"#;
