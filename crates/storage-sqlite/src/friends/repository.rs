use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use goalsync_core::errors::DatabaseError;
use goalsync_core::friends::{
    FriendRequestCheck, Friendship, FriendshipRepositoryTrait, FriendshipTransition,
    NewFriendship,
};
use goalsync_core::Result;

use super::model::{FriendshipDB, NewFriendshipDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::friendships;
use crate::schema::friendships::dsl::*;

pub struct FriendshipRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FriendshipRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        FriendshipRepository { pool, writer }
    }
}

fn find_friendship(conn: &mut SqliteConnection, friendship_id: &str) -> Result<FriendshipDB> {
    friendships
        .find(friendship_id)
        .select(FriendshipDB::as_select())
        .first::<FriendshipDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| {
            DatabaseError::NotFound(format!("Friendship {} not found", friendship_id)).into()
        })
}

#[async_trait]
impl FriendshipRepositoryTrait for FriendshipRepository {
    fn get_friendship(&self, friendship_id: &str) -> Result<Friendship> {
        let mut conn = get_connection(&self.pool)?;
        find_friendship(&mut conn, friendship_id).map(Friendship::from)
    }

    fn list_friendships(&self, member_id: &str) -> Result<Vec<Friendship>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = friendships
            .filter(requester_id.eq(member_id).or(addressee_id.eq(member_id)))
            .order(created_at.desc())
            .select(FriendshipDB::as_select())
            .load::<FriendshipDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Friendship::from).collect())
    }

    async fn insert_friendship(
        &self,
        new_friendship: NewFriendship,
        check: FriendRequestCheck,
    ) -> Result<Friendship> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Friendship> {
                let (a, b) = (
                    new_friendship.requester_id.as_str(),
                    new_friendship.addressee_id.as_str(),
                );
                let between_pair: Vec<Friendship> = friendships
                    .filter(
                        requester_id
                            .eq(a)
                            .and(addressee_id.eq(b))
                            .or(requester_id.eq(b).and(addressee_id.eq(a))),
                    )
                    .select(FriendshipDB::as_select())
                    .load::<FriendshipDB>(conn)
                    .map_err(StorageError::from)?
                    .into_iter()
                    .map(Friendship::from)
                    .collect();
                check(&between_pair)?;

                let row: NewFriendshipDB = new_friendship.into();
                let inserted = diesel::insert_into(friendships::table)
                    .values(&row)
                    .returning(FriendshipDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Friendship::from(inserted))
            })
            .await
    }

    async fn update_status(
        &self,
        friendship_id: String,
        transition: FriendshipTransition,
    ) -> Result<Friendship> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Friendship> {
                let current = Friendship::from(find_friendship(conn, &friendship_id)?);
                let new_status = transition(&current)?;
                diesel::update(friendships.find(&friendship_id))
                    .set(status.eq(new_status.as_str()))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                find_friendship(conn, &friendship_id).map(Friendship::from)
            })
            .await
    }

    async fn delete_friendship(&self, friendship_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(friendships.find(friendship_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use goalsync_core::errors::Error;
    use goalsync_core::friends::{FriendService, FriendServiceTrait, FriendshipStatus};
    use tempfile::tempdir;

    fn setup() -> (Arc<FriendshipRepository>, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("friends.db");
        let pool = create_pool(db_path.to_str().unwrap()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (Arc::new(FriendshipRepository::new(pool, writer)), temp_dir)
    }

    fn allow_any() -> FriendRequestCheck {
        Box::new(|_: &[Friendship]| Ok(()))
    }

    fn move_to(next: FriendshipStatus) -> FriendshipTransition {
        Box::new(move |_: &Friendship| Ok(next))
    }

    fn request(from: &str, to: &str) -> NewFriendship {
        NewFriendship {
            requester_id: from.to_string(),
            addressee_id: to.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_lists_from_both_sides() {
        let (repo, _dir) = setup();
        let created = repo
            .insert_friendship(request("alex", "sam"), allow_any())
            .await
            .unwrap();
        assert_eq!(created.status, FriendshipStatus::Pending);

        assert_eq!(repo.list_friendships("alex").unwrap(), vec![created.clone()]);
        assert_eq!(repo.list_friendships("sam").unwrap(), vec![created]);
        assert!(repo.list_friendships("kim").unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let (repo, _dir) = setup();
        let created = repo
            .insert_friendship(request("alex", "sam"), allow_any())
            .await
            .unwrap();

        let accepted = repo
            .update_status(created.id.clone(), move_to(FriendshipStatus::Accepted))
            .await
            .unwrap();
        assert_eq!(accepted.status, FriendshipStatus::Accepted);
        assert!(repo
            .update_status("missing".to_string(), move_to(FriendshipStatus::Accepted))
            .await
            .unwrap_err()
            .is_not_found());

        assert_eq!(repo.delete_friendship(created.id.clone()).await.unwrap(), 1);
        assert!(repo.get_friendship(&created.id).unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn self_friendship_is_refused_by_the_database() {
        let (repo, _dir) = setup();
        assert!(repo
            .insert_friendship(request("alex", "alex"), allow_any())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn request_flow_through_service() {
        let (repo, _dir) = setup();
        let service = FriendService::new(repo);

        let sent = service.send_request("alex", "sam").await.unwrap();
        assert_eq!(service.get_pending_requests("sam").unwrap().len(), 1);
        assert!(service.get_pending_requests("alex").unwrap().is_empty());

        service.accept_request("sam", &sent.id).await.unwrap();
        assert!(service.friend_ids("alex").unwrap().contains("sam"));
        assert!(service.friend_ids("sam").unwrap().contains("alex"));

        service.remove_friend("alex", &sent.id).await.unwrap();
        assert!(service.get_friends("sam").unwrap().is_empty());
    }

    #[tokio::test]
    async fn check_sees_requests_from_both_directions() {
        let (repo, _dir) = setup();
        repo.insert_friendship(request("alex", "sam"), allow_any())
            .await
            .unwrap();
        repo.insert_friendship(request("kim", "sam"), allow_any())
            .await
            .unwrap();

        let seen = Arc::new(std::sync::Mutex::new(0));
        let counter = seen.clone();
        let check: FriendRequestCheck = Box::new(move |between_pair: &[Friendship]| {
            *counter.lock().unwrap() = between_pair.len();
            Err(Error::ConstraintViolation("taken".to_string()))
        });
        assert!(repo
            .insert_friendship(request("sam", "alex"), check)
            .await
            .is_err());
        assert_eq!(*seen.lock().unwrap(), 1);
        assert_eq!(repo.list_friendships("sam").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn failed_transition_leaves_status_unchanged() {
        let (repo, _dir) = setup();
        let created = repo
            .insert_friendship(request("alex", "sam"), allow_any())
            .await
            .unwrap();
        let refuse: FriendshipTransition =
            Box::new(|_: &Friendship| Err(Error::PermissionDenied("no".to_string())));
        assert!(repo.update_status(created.id.clone(), refuse).await.is_err());
        assert_eq!(
            repo.get_friendship(&created.id).unwrap().status,
            FriendshipStatus::Pending
        );
    }

    #[tokio::test]
    async fn concurrent_crossed_requests_create_one_friendship() {
        let (repo, _dir) = setup();
        let service = Arc::new(FriendService::new(repo.clone()));

        let forward = {
            let service = service.clone();
            tokio::spawn(async move { service.send_request("alex", "sam").await })
        };
        let backward = {
            let service = service.clone();
            tokio::spawn(async move { service.send_request("sam", "alex").await })
        };
        let results = [forward.await.unwrap(), backward.await.unwrap()];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(Error::ConstraintViolation(_)))));
        assert_eq!(repo.list_friendships("alex").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_answers_apply_only_once() {
        let (repo, _dir) = setup();
        let service = Arc::new(FriendService::new(repo.clone()));
        let sent = service.send_request("alex", "sam").await.unwrap();

        let accept = {
            let (service, friendship_id) = (service.clone(), sent.id.clone());
            tokio::spawn(async move { service.accept_request("sam", &friendship_id).await })
        };
        let reject = {
            let (service, friendship_id) = (service.clone(), sent.id.clone());
            tokio::spawn(async move { service.reject_request("sam", &friendship_id).await })
        };
        let accepted = accept.await.unwrap();
        let rejected = reject.await.unwrap();

        assert!(accepted.is_ok() != rejected.is_ok());
        let stored = repo.get_friendship(&sent.id).unwrap().status;
        let expected = if accepted.is_ok() {
            FriendshipStatus::Accepted
        } else {
            FriendshipStatus::Rejected
        };
        assert_eq!(stored, expected);
    }
}
