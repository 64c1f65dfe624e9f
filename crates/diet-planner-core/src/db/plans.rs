//! Diet plan history operations.

use chrono::{SecondsFormat, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{Database, DbResult};
use crate::models::{Category, MealPlan, StoredPlan};

/// Plans shown by default in a user's history.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

const PLAN_COLUMNS: &str = r#"
    plan_id, user_id, plan_date, category, breakfast, lunch, dinner,
    snacks, total_calories, notes, created_at
"#;

impl Database {
    /// Record a generated plan for a user, dated today (UTC).
    pub fn insert_plan(&self, user_id: &str, plan: &MealPlan) -> DbResult<StoredPlan> {
        let now = Utc::now();
        let stored = StoredPlan {
            plan_id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            plan_date: now.date_naive().to_string(),
            plan: plan.clone(),
            created_at: now.to_rfc3339_opts(SecondsFormat::Micros, true),
        };

        self.conn.execute(
            r#"
            INSERT INTO diet_plans (
                plan_id, user_id, plan_date, category, breakfast, lunch, dinner,
                snacks, total_calories, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                stored.plan_id,
                stored.user_id,
                stored.plan_date,
                stored.plan.category.as_str(),
                stored.plan.breakfast,
                stored.plan.lunch,
                stored.plan.dinner,
                stored.plan.snacks,
                stored.plan.total_calories,
                stored.plan.notes,
                stored.created_at,
            ],
        )?;

        debug!(plan_id = %stored.plan_id, user_id, "stored diet plan");
        Ok(stored)
    }

    /// Get a plan by ID.
    pub fn get_plan(&self, plan_id: &str) -> DbResult<Option<StoredPlan>> {
        self.conn
            .query_row(
                &format!("SELECT {PLAN_COLUMNS} FROM diet_plans WHERE plan_id = ?"),
                [plan_id],
                plan_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Most recent plan for a user.
    pub fn latest_plan(&self, user_id: &str) -> DbResult<Option<StoredPlan>> {
        Ok(self.plan_history(user_id, 1)?.into_iter().next())
    }

    /// A user's plans, newest first.
    pub fn plan_history(&self, user_id: &str, limit: usize) -> DbResult<Vec<StoredPlan>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {PLAN_COLUMNS}
            FROM diet_plans
            WHERE user_id = ?1
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?2
            "#
        ))?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![user_id, limit], plan_from_row)?;

        let mut plans = Vec::new();
        for row in rows {
            plans.push(row?);
        }
        Ok(plans)
    }

    /// Delete a plan.
    pub fn delete_plan(&self, plan_id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM diet_plans WHERE plan_id = ?", [plan_id])?;
        Ok(rows_affected > 0)
    }
}

fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<StoredPlan> {
    let category: String = row.get(3)?;
    Ok(StoredPlan {
        plan_id: row.get(0)?,
        user_id: row.get(1)?,
        plan_date: row.get(2)?,
        plan: MealPlan {
            category: Category::parse(&category),
            breakfast: row.get(4)?,
            lunch: row.get(5)?,
            dinner: row.get(6)?,
            snacks: row.get(7)?,
            total_calories: row.get(8)?,
            notes: row.get(9)?,
        },
        created_at: row.get(10)?,
    })
}
