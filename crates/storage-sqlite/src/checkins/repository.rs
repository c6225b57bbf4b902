use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use goalsync_core::checkins::{CheckIn, CheckInMutation, CheckInOutcome, CheckInRepositoryTrait};
use goalsync_core::errors::DatabaseError;
use goalsync_core::goals::Goal;
use goalsync_core::Result;

use super::model::CheckInDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::goals::{find_goal, GoalDB, GoalStreakChangeset};
use crate::schema::{check_ins, goals};

pub struct CheckInRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CheckInRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CheckInRepository { pool, writer }
    }
}

fn find_check_in(conn: &mut SqliteConnection, check_in_id: &str) -> Result<CheckInDB> {
    check_ins::table
        .find(check_in_id)
        .select(CheckInDB::as_select())
        .first::<CheckInDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| {
            DatabaseError::NotFound(format!("Check-in {} not found", check_in_id)).into()
        })
}

#[async_trait]
impl CheckInRepositoryTrait for CheckInRepository {
    async fn commit_check_in(
        &self,
        goal_id: String,
        mutation: CheckInMutation,
    ) -> Result<CheckInOutcome> {
        // One writer job: the read, the streak update and both writes share a
        // single IMMEDIATE transaction, so a concurrent check-in for the same
        // goal waits and then sees this one.
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CheckInOutcome> {
                let goal_db: GoalDB = find_goal(conn, &goal_id)?;
                let outcome = mutation(Goal::from(goal_db))?;

                diesel::update(goals::table.find(&outcome.goal.id))
                    .set(GoalStreakChangeset::from(&outcome.goal))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::insert_into(check_ins::table)
                    .values(CheckInDB::from(&outcome.check_in))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                debug!(
                    "Committed check-in {} for goal {}",
                    outcome.check_in.id, outcome.goal.id
                );
                Ok(outcome)
            })
            .await
    }

    fn get_check_in(&self, check_in_id: &str) -> Result<CheckIn> {
        let mut conn = get_connection(&self.pool)?;
        find_check_in(&mut conn, check_in_id).map(CheckIn::from)
    }

    fn list_check_ins(
        &self,
        goal_id: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<Vec<CheckIn>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = check_ins::table.into_boxed();
        if let Some(goal_id) = goal_id {
            query = query.filter(check_ins::goal_id.eq(goal_id));
        }
        if let Some(user_id) = user_id {
            query = query.filter(check_ins::user_id.eq(user_id));
        }
        let rows = query
            .order(check_ins::created_at.desc())
            .select(CheckInDB::as_select())
            .load::<CheckInDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(CheckIn::from).collect())
    }

    fn list_check_ins_since(&self, since: DateTime<Utc>) -> Result<Vec<CheckIn>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = check_ins::table
            .filter(check_ins::created_at.ge(since.naive_utc()))
            .order(check_ins::created_at.desc())
            .select(CheckInDB::as_select())
            .load::<CheckInDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(CheckIn::from).collect())
    }

    async fn increment_like_count(&self, check_in_id: String) -> Result<CheckIn> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CheckIn> {
                let updated = diesel::update(check_ins::table.find(&check_in_id))
                    .set(check_ins::like_count.eq(check_ins::like_count + 1))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if updated == 0 {
                    return Err(DatabaseError::NotFound(format!(
                        "Check-in {} not found",
                        check_in_id
                    ))
                    .into());
                }
                find_check_in(conn, &check_in_id).map(CheckIn::from)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use crate::goals::GoalRepository;
    use chrono::TimeZone;
    use goalsync_core::checkins::{CheckInService, CheckInServiceTrait, NewCheckIn};
    use goalsync_core::errors::{CheckInError, Error};
    use goalsync_core::goals::{Frequency, GoalRepositoryTrait, NewGoal};
    use goalsync_core::settings::CheckInSettings;
    use tempfile::tempdir;

    struct Fixture {
        goals: Arc<GoalRepository>,
        check_ins: Arc<CheckInRepository>,
        service: Arc<CheckInService>,
        _dir: tempfile::TempDir,
    }

    fn setup() -> Fixture {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("checkins.db");
        let pool = create_pool(db_path.to_str().unwrap()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        let goals = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
        let check_ins = Arc::new(CheckInRepository::new(pool, writer));
        let settings = CheckInSettings {
            enforce_window: false,
            ..CheckInSettings::default()
        };
        let service = Arc::new(CheckInService::new(check_ins.clone(), Arc::new(settings)));
        Fixture {
            goals,
            check_ins,
            service,
            _dir: temp_dir,
        }
    }

    async fn create_goal(fixture: &Fixture) -> Goal {
        fixture
            .goals
            .insert_new_goal(NewGoal {
                id: None,
                user_id: "demo-user".to_string(),
                title: "Journal".to_string(),
                description: None,
                category: None,
                frequency: Frequency::Daily,
            })
            .await
            .unwrap()
    }

    fn submission(goal_id: &str) -> NewCheckIn {
        NewCheckIn {
            goal_id: goal_id.to_string(),
            user_id: "demo-user".to_string(),
            photo_reference: Some("photos/page.jpg".to_string()),
            caption: Some("Wrote two pages".to_string()),
            verification: None,
        }
    }

    fn at(day: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, day, h, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn check_in_persists_goal_and_row_together() {
        let fixture = setup();
        let goal = create_goal(&fixture).await;

        let outcome = fixture
            .service
            .submit_check_in(submission(&goal.id), at(10, 9))
            .await
            .unwrap();
        assert_eq!(outcome.goal.current_streak, 1);

        let stored = fixture.goals.get_goal(&goal.id).unwrap();
        assert_eq!(stored.current_streak, 1);
        assert_eq!(stored.longest_streak, 1);
        assert!(stored.checked_today);
        assert_eq!(stored.last_check_in_at, Some(at(10, 9)));

        let rows = fixture.check_ins.list_check_ins(Some(&goal.id), None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], outcome.check_in);

        fixture
            .service
            .submit_check_in(submission(&goal.id), at(11, 9))
            .await
            .unwrap();
        assert_eq!(fixture.goals.get_goal(&goal.id).unwrap().current_streak, 2);
    }

    #[tokio::test]
    async fn rejected_check_in_writes_nothing() {
        let fixture = setup();
        let goal = create_goal(&fixture).await;
        fixture
            .service
            .submit_check_in(submission(&goal.id), at(10, 9))
            .await
            .unwrap();
        let before = fixture.goals.get_goal(&goal.id).unwrap();

        let err = fixture
            .service
            .submit_check_in(submission(&goal.id), at(10, 21))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::CheckIn(CheckInError::AlreadyCheckedInToday { .. })
        ));
        assert_eq!(fixture.goals.get_goal(&goal.id).unwrap(), before);
        assert_eq!(fixture.check_ins.list_check_ins(None, None).unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_check_ins_for_one_goal_increment_once() {
        let fixture = setup();
        let goal = create_goal(&fixture).await;

        let mut handles = Vec::new();
        for _ in 0..8 {
            let service = fixture.service.clone();
            let goal_id = goal.id.clone();
            handles.push(tokio::spawn(async move {
                service
                    .submit_check_in(submission(&goal_id), at(10, 9))
                    .await
            }));
        }

        let mut accepted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(err) => assert!(matches!(
                    err,
                    Error::CheckIn(CheckInError::AlreadyCheckedInToday { .. })
                )),
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(fixture.goals.get_goal(&goal.id).unwrap().current_streak, 1);
        assert_eq!(fixture.check_ins.list_check_ins(None, None).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_goal_is_not_found() {
        let fixture = setup();
        let err = fixture
            .service
            .submit_check_in(submission("missing"), at(10, 9))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn likes_and_time_filtered_listing() {
        let fixture = setup();
        let goal = create_goal(&fixture).await;
        let first = fixture
            .service
            .submit_check_in(submission(&goal.id), at(10, 9))
            .await
            .unwrap();
        fixture
            .service
            .submit_check_in(submission(&goal.id), at(11, 9))
            .await
            .unwrap();

        let liked = fixture
            .check_ins
            .increment_like_count(first.check_in.id.clone())
            .await
            .unwrap();
        assert_eq!(liked.like_count, 1);
        assert!(fixture
            .check_ins
            .increment_like_count("missing".to_string())
            .await
            .unwrap_err()
            .is_not_found());

        let recent = fixture.check_ins.list_check_ins_since(at(11, 0)).unwrap();
        assert_eq!(recent.len(), 1);
        let all = fixture.check_ins.list_check_ins(None, Some("demo-user")).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].created_at > all[1].created_at);
    }

    #[tokio::test]
    async fn deleting_goal_cascades_to_check_ins() {
        let fixture = setup();
        let goal = create_goal(&fixture).await;
        fixture
            .service
            .submit_check_in(submission(&goal.id), at(10, 9))
            .await
            .unwrap();

        fixture.goals.delete_goal(goal.id.clone()).await.unwrap();
        assert!(fixture.check_ins.list_check_ins(None, None).unwrap().is_empty());
    }
}
