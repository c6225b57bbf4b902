//! Database models for check-ins.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use goalsync_core::checkins::CheckIn;

#[derive(Queryable, Insertable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::check_ins)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CheckInDB {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub photo_reference: Option<String>,
    pub caption: Option<String>,
    pub streak_at_check_in: i32,
    pub verification_message: Option<String>,
    pub like_count: i64,
    pub created_at: NaiveDateTime,
}

impl From<CheckInDB> for CheckIn {
    fn from(db: CheckInDB) -> Self {
        Self {
            id: db.id,
            goal_id: db.goal_id,
            user_id: db.user_id,
            photo_reference: db.photo_reference,
            caption: db.caption,
            streak_at_check_in: db.streak_at_check_in,
            verification_message: db.verification_message,
            like_count: db.like_count,
            created_at: db.created_at.and_utc(),
        }
    }
}

impl From<&CheckIn> for CheckInDB {
    fn from(domain: &CheckIn) -> Self {
        Self {
            id: domain.id.clone(),
            goal_id: domain.goal_id.clone(),
            user_id: domain.user_id.clone(),
            photo_reference: domain.photo_reference.clone(),
            caption: domain.caption.clone(),
            streak_at_check_in: domain.streak_at_check_in,
            verification_message: domain.verification_message.clone(),
            like_count: domain.like_count,
            created_at: domain.created_at.naive_utc(),
        }
    }
}
