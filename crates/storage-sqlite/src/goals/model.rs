//! Database models for goals.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use goalsync_core::constants::DEFAULT_GOAL_CATEGORY;
use goalsync_core::goals::{Frequency, Goal, NewGoal};

/// Database model for goals
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub frequency: String,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub checked_today: bool,
    pub last_check_in_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a new goal
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
pub struct NewGoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub frequency: String,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub checked_today: bool,
    pub last_check_in_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// The columns a check-in is allowed to change.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(treat_none_as_null = true)]
pub struct GoalStreakChangeset {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub checked_today: bool,
    pub last_check_in_at: Option<NaiveDateTime>,
}

// Conversion to domain models
impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            description: db.description,
            category: db.category,
            frequency: Frequency::from_db(&db.frequency),
            current_streak: db.current_streak,
            longest_streak: db.longest_streak,
            checked_today: db.checked_today,
            last_check_in_at: db.last_check_in_at.map(|at| at.and_utc()),
            created_at: db.created_at.and_utc(),
        }
    }
}

impl From<NewGoal> for NewGoalDB {
    fn from(domain: NewGoal) -> Self {
        Self {
            id: domain.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: domain.user_id,
            title: domain.title,
            description: domain.description,
            category: domain
                .category
                .unwrap_or_else(|| DEFAULT_GOAL_CATEGORY.to_string()),
            frequency: domain.frequency.as_str().to_string(),
            current_streak: 0,
            longest_streak: 0,
            checked_today: false,
            last_check_in_at: None,
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl From<&Goal> for GoalStreakChangeset {
    fn from(goal: &Goal) -> Self {
        Self {
            current_streak: goal.current_streak,
            longest_streak: goal.longest_streak,
            checked_today: goal.checked_today,
            last_check_in_at: goal.last_check_in_at.map(|at| at.naive_utc()),
        }
    }
}
