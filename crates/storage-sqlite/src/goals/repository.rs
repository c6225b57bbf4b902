use goalsync_core::errors::DatabaseError;
use goalsync_core::goals::{Goal, GoalRepositoryTrait, NewGoal};
use goalsync_core::Result;

use super::model::{GoalDB, NewGoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::goals;
use crate::schema::goals::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

/// Reads one goal on `conn`, mapping a missing row to `NotFound`.
pub(crate) fn find_goal(conn: &mut SqliteConnection, goal_id: &str) -> Result<GoalDB> {
    goals
        .find(goal_id)
        .select(GoalDB::as_select())
        .first::<GoalDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| DatabaseError::NotFound(format!("Goal {} not found", goal_id)).into())
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn load_goals(&self, owner_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let goals_db = goals
            .filter(user_id.eq(owner_id))
            .order(created_at.asc())
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(goals_db.into_iter().map(Goal::from).collect())
    }

    fn load_goals_by_ids(&self, goal_ids: &[String]) -> Result<Vec<Goal>> {
        if goal_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = get_connection(&self.pool)?;
        let goals_db = goals
            .filter(id.eq_any(goal_ids))
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(goals_db.into_iter().map(Goal::from).collect())
    }

    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        find_goal(&mut conn, goal_id).map(Goal::from)
    }

    async fn insert_new_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let new_goal_db: NewGoalDB = new_goal.into();

                let result_db = diesel::insert_into(goals::table)
                    .values(&new_goal_db)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::from(result_db))
            })
            .await
    }

    async fn delete_goal(&self, goal_id_to_delete: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(goals.find(goal_id_to_delete))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
