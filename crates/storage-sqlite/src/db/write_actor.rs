//! Single-writer actor for SQLite.
//!
//! SQLite allows one writer at a time; funnelling every write through one
//! dedicated connection serializes them and makes each job a single atomic
//! read-modify-write (jobs run inside an immediate transaction).

use super::DbPool;
use crate::errors::StorageError;
use diesel::{Connection, SqliteConnection};
use std::any::Any;
use tokio::sync::{mpsc, oneshot};
use tradehub_core::errors::Result;

// A write job: runs against the actor's connection, returns a core Result.
// The return type is erased to `Box<dyn Any>` so one channel carries jobs of
// any result type.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type ErasedReply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, ErasedReply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer's dedicated connection, inside
    /// an immediate transaction.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |conn| job(conn).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                reply_tx,
            ))
            .await
            .expect("writer actor channel closed; the actor has stopped");

        reply_rx
            .await
            .expect("writer actor dropped the reply sender")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("writer actor result had an unexpected type"))
            })
    }
}

/// Spawns the background writer task. The actor owns one pooled connection
/// for its whole lifetime and processes jobs serially until every
/// `WriteHandle` is dropped.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, ErasedReply)>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("failed to check out the writer actor connection");

        while let Some((job, reply_tx)) = rx.recv().await {
            // StorageError::Core carries the job's own error through the
            // transaction wrapper without flattening it to a string.
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::Core))
                .map_err(|e: StorageError| match e {
                    StorageError::Core(err) => err,
                    other => other.into(),
                });

            // The requester may have gone away; nothing to do then.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
