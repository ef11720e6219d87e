//! Store handle and the worker thread that owns the connection.
//!
//! Handlers hold a cloneable [`Store`]. Each call sends one
//! [`StoreRequest`] to the worker and awaits its reply, so every HTTP
//! request maps to a single statement and a single suspension point.

use std::thread;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::config::StoreConfig;
use crate::database::{Database, Row};
use crate::error::{StoreError, StoreResult};
use crate::schema::Table;

type Reply<T> = oneshot::Sender<StoreResult<T>>;

/// Operation sent to the store worker.
#[derive(Debug)]
pub enum StoreRequest {
    ListAll {
        table: Table,
        response: Reply<Vec<Row>>,
    },
    GetById {
        table: Table,
        id: String,
        response: Reply<Option<Row>>,
    },
    Insert {
        table: Table,
        values: Vec<Value>,
        response: Reply<i64>,
    },
    Update {
        table: Table,
        id: String,
        values: Vec<Value>,
        response: Reply<usize>,
    },
    Delete {
        table: Table,
        id: String,
        response: Reply<usize>,
    },
}

impl StoreRequest {
    /// Executes the request and sends the result to the waiting caller.
    fn execute(self, db: &Database) {
        match self {
            StoreRequest::ListAll { table, response } => {
                let result = db.list_all(table);
                log_outcome("list_all", table, &result);
                let _ = response.send(result);
            }
            StoreRequest::GetById {
                table,
                id,
                response,
            } => {
                let result = db.get_by_id(table, &id);
                log_outcome("get_by_id", table, &result);
                let _ = response.send(result);
            }
            StoreRequest::Insert {
                table,
                values,
                response,
            } => {
                let result = db.insert(table, &values);
                log_outcome("insert", table, &result);
                let _ = response.send(result);
            }
            StoreRequest::Update {
                table,
                id,
                values,
                response,
            } => {
                let result = db.update(table, &id, &values);
                log_outcome("update", table, &result);
                let _ = response.send(result);
            }
            StoreRequest::Delete {
                table,
                id,
                response,
            } => {
                let result = db.delete(table, &id);
                log_outcome("delete", table, &result);
                let _ = response.send(result);
            }
        }
    }
}

fn log_outcome<T>(operation: &str, table: Table, result: &StoreResult<T>) {
    match result {
        Ok(_) => tracing::debug!(operation, %table, "Statement executed"),
        Err(e) => tracing::warn!(operation, %table, error = %e, "Statement failed"),
    }
}

/// Cloneable handle to the volatile store.
///
/// The worker thread, and the data with it, lives until the last handle
/// is dropped.
#[derive(Debug, Clone)]
pub struct Store {
    tx: mpsc::Sender<StoreRequest>,
}

impl Store {
    /// Opens the in-memory database and spawns its worker thread.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let db = Database::open_in_memory()?;
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));

        thread::Builder::new()
            .name("store-worker".to_string())
            .spawn(move || run_worker(db, rx))
            .map_err(|e| {
                tracing::error!("Failed to spawn store worker: {}", e);
                StoreError::Unavailable
            })?;

        Ok(Self { tx })
    }

    /// Returns every row of `table`, ordered by id.
    pub async fn list_all(&self, table: Table) -> StoreResult<Vec<Row>> {
        self.call(|response| StoreRequest::ListAll { table, response })
            .await
    }

    /// Returns the row with the given id, or `None`.
    pub async fn get_by_id(&self, table: Table, id: &str) -> StoreResult<Option<Row>> {
        let id = id.to_string();
        self.call(|response| StoreRequest::GetById {
            table,
            id,
            response,
        })
        .await
    }

    /// Inserts a row and returns its generated id.
    pub async fn insert(&self, table: Table, values: Vec<Value>) -> StoreResult<i64> {
        self.call(|response| StoreRequest::Insert {
            table,
            values,
            response,
        })
        .await
    }

    /// Replaces the non-id columns of a row; returns rows affected.
    pub async fn update(&self, table: Table, id: &str, values: Vec<Value>) -> StoreResult<usize> {
        let id = id.to_string();
        self.call(|response| StoreRequest::Update {
            table,
            id,
            values,
            response,
        })
        .await
    }

    /// Deletes a row; returns rows affected.
    pub async fn delete(&self, table: Table, id: &str) -> StoreResult<usize> {
        let id = id.to_string();
        self.call(|response| StoreRequest::Delete {
            table,
            id,
            response,
        })
        .await
    }

    async fn call<T>(&self, build: impl FnOnce(Reply<T>) -> StoreRequest) -> StoreResult<T> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(build(tx))
            .await
            .map_err(|_| StoreError::Unavailable)?;
        rx.await.map_err(|_| StoreError::Unavailable)?
    }
}

fn run_worker(db: Database, mut rx: mpsc::Receiver<StoreRequest>) {
    tracing::debug!("Store worker started");
    while let Some(request) = rx.blocking_recv() {
        request.execute(&db);
    }
    tracing::debug!("Store worker stopped; dropping volatile data");
}
