//! User profile database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::Profile;

impl Database {
    /// Insert or replace the profile stored for a user.
    pub fn upsert_profile(&self, user_id: &str, profile: &Profile) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO user_profiles (
                user_id, name, age, gender, weight_kg, height_cm, activity_level,
                medical_conditions, dietary_preferences, allergies, dislikes,
                daily_calories
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ON CONFLICT(user_id) DO UPDATE SET
                name = excluded.name,
                age = excluded.age,
                gender = excluded.gender,
                weight_kg = excluded.weight_kg,
                height_cm = excluded.height_cm,
                activity_level = excluded.activity_level,
                medical_conditions = excluded.medical_conditions,
                dietary_preferences = excluded.dietary_preferences,
                allergies = excluded.allergies,
                dislikes = excluded.dislikes,
                daily_calories = excluded.daily_calories,
                updated_at = datetime('now')
            "#,
            params![
                user_id,
                profile.name,
                profile.age,
                profile.gender,
                profile.weight_kg,
                profile.height_cm,
                profile.activity_level,
                profile.medical_conditions,
                profile.dietary_preferences,
                profile.allergies,
                profile.dislikes,
                profile.daily_calories,
            ],
        )?;
        Ok(())
    }

    /// Get the profile stored for a user.
    pub fn get_profile(&self, user_id: &str) -> DbResult<Option<Profile>> {
        self.conn
            .query_row(
                r#"
                SELECT name, age, gender, weight_kg, height_cm, activity_level,
                       medical_conditions, dietary_preferences, allergies, dislikes,
                       daily_calories
                FROM user_profiles
                WHERE user_id = ?
                "#,
                [user_id],
                |row| {
                    Ok(Profile {
                        name: row.get(0)?,
                        age: row.get(1)?,
                        gender: row.get(2)?,
                        weight_kg: row.get(3)?,
                        height_cm: row.get(4)?,
                        activity_level: row.get(5)?,
                        medical_conditions: row.get(6)?,
                        dietary_preferences: row.get(7)?,
                        allergies: row.get(8)?,
                        dislikes: row.get(9)?,
                        daily_calories: row.get(10)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get the profile stored for a user, failing when there is none.
    pub fn require_profile(&self, user_id: &str) -> DbResult<Profile> {
        self.get_profile(user_id)?
            .ok_or_else(|| DbError::NotFound(format!("profile for user {}", user_id)))
    }

    /// Delete a user's profile and, by cascade, their plan history.
    pub fn delete_profile(&self, user_id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM user_profiles WHERE user_id = ?", [user_id])?;
        Ok(rows_affected > 0)
    }
}
