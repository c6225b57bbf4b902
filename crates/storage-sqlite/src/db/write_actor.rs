use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use goalsync_core::errors::{DatabaseError, Error, Result};
use log::error;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A write job runs against the actor's connection and returns a core Result.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type AnyResult = Result<Box<dyn Any + Send + 'static>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    // The boxed Any erases each job's return type; `exec` downcasts it back.
    tx: mpsc::Sender<(Job<Box<dyn Any + Send + 'static>>, oneshot::Sender<AnyResult>)>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// Jobs run one at a time, each inside its own `IMMEDIATE` transaction.
    /// An error returned by the job rolls the transaction back and reaches
    /// the caller unchanged.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| DatabaseError::Internal("Writer actor has stopped".to_string()))?;

        let boxed = ret_rx.await.map_err(|_| {
            DatabaseError::Internal("Writer actor dropped the reply channel".to_string())
        })??;

        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::Unexpected("Writer actor returned an unexpected type".to_string()))
    }
}

/// Spawns a background Tokio task that acts as the single writer to the
/// database. The actor owns one pooled connection and processes jobs serially.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) =
        mpsc::channel::<(Job<Box<dyn Any + Send + 'static>>, oneshot::Sender<AnyResult>)>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!("Writer actor could not get a database connection: {}", e);
                while let Some((_, reply_tx)) = rx.recv().await {
                    let _ = reply_tx.send(Err(
                        DatabaseError::ConnectionFailed(e.to_string()).into(),
                    ));
                }
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: AnyResult = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // The requester may have gone away; nothing to do then.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
