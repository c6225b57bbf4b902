use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use goalsync_core::friends::{Friendship, FriendshipStatus, NewFriendship};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::friendships)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FriendshipDB {
    pub id: String,
    pub requester_id: String,
    pub addressee_id: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::friendships)]
pub struct NewFriendshipDB {
    pub id: String,
    pub requester_id: String,
    pub addressee_id: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl From<FriendshipDB> for Friendship {
    fn from(db: FriendshipDB) -> Self {
        Self {
            id: db.id,
            requester_id: db.requester_id,
            addressee_id: db.addressee_id,
            status: FriendshipStatus::from_db(&db.status),
            created_at: db.created_at.and_utc(),
        }
    }
}

/// New requests always start out pending.
impl From<NewFriendship> for NewFriendshipDB {
    fn from(domain: NewFriendship) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            requester_id: domain.requester_id,
            addressee_id: domain.addressee_id,
            status: FriendshipStatus::Pending.as_str().to_string(),
            created_at: Utc::now().naive_utc(),
        }
    }
}
