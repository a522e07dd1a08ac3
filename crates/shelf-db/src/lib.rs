//! # shelf-db
//!
//! libSQL persistence for the Shelf catalog and loan ledger.
//!
//! Holds all relational state: books, categories, book/category links, and
//! lendings. `ShelfService` hosts the catalog and ledger repositories;
//! [`gateway`] exposes the narrow transactional surface the lending engine
//! runs against.
//!
//! Uses the `libsql` crate (C `SQLite` fork) with a single local connection.
//! Access goes through a gate: writes hold it exclusively and always run
//! inside an `IMMEDIATE` transaction, reads share it. A reader therefore only
//! ever sees committed state.

pub mod error;
pub mod gateway;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use std::ops::Deref;
use std::sync::Arc;

use error::DatabaseError;
use libsql::{Builder, TransactionBehavior};
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

/// Central database handle for all Shelf state operations.
///
/// Cheap to clone: clones share the same connection and gate, so the
/// catalog service and the lending engine can hold their own handles.
#[derive(Clone)]
pub struct ShelfDb {
    /// Keeps the database open for as long as any handle exists.
    _db: Arc<libsql::Database>,
    conn: libsql::Connection,
    gate: Arc<RwLock<()>>,
}

impl ShelfDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let shelf_db = Self {
            _db: Arc::new(db),
            conn,
            gate: Arc::new(RwLock::new(())),
        };
        shelf_db.run_migrations().await?;
        tracing::debug!(path, "opened shelf database");
        Ok(shelf_db)
    }

    /// Connection for read-only queries.
    ///
    /// Waits while a write transaction is open on this handle (or its clones),
    /// so queries never observe uncommitted rows. Hold the returned guard
    /// across several queries to read one consistent state.
    pub async fn read(&self) -> ReadConn {
        let gate = Arc::clone(&self.gate).read_owned().await;
        ReadConn {
            conn: self.conn.clone(),
            _gate: gate,
        }
    }

    /// Begin a write transaction.
    ///
    /// Waits for readers and any other writer on this handle (or its clones)
    /// to finish, then opens an `IMMEDIATE` transaction so the database write
    /// lock is taken up front rather than on the first write.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the transaction cannot be started.
    pub async fn begin_write(&self) -> Result<WriteTx, DatabaseError> {
        let gate = Arc::clone(&self.gate).write_owned().await;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?;
        Ok(WriteTx {
            tx,
            conn: self.conn.clone(),
            _gate: gate,
        })
    }
}

/// A shared hold on the gate, dereferencing to the connection.
pub struct ReadConn {
    conn: libsql::Connection,
    _gate: OwnedRwLockReadGuard<()>,
}

impl Deref for ReadConn {
    type Target = libsql::Connection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

/// An open write transaction holding the gate exclusively.
///
/// Derefs to the connection so repo helpers run inside the transaction.
/// Dropping it without [`WriteTx::commit`] leaves the rollback to libSQL;
/// callers on an error path should call [`WriteTx::rollback`] explicitly.
pub struct WriteTx {
    tx: libsql::Transaction,
    conn: libsql::Connection,
    _gate: OwnedRwLockWriteGuard<()>,
}

impl Deref for WriteTx {
    type Target = libsql::Connection;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}

impl WriteTx {
    /// Commit all writes made in this transaction.
    ///
    /// If the commit itself fails the transaction is rolled back before the
    /// error is returned, so nothing from it stays visible.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the commit fails.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        let Self { tx, conn, _gate } = self;
        if let Err(error) = tx.commit().await {
            if let Err(rollback_error) = conn.execute("ROLLBACK", ()).await {
                tracing::debug!(%rollback_error, "rollback after failed commit");
            }
            return Err(error.into());
        }
        Ok(())
    }

    /// Discard all writes made in this transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the rollback fails.
    pub async fn rollback(self) -> Result<(), DatabaseError> {
        self.tx.rollback().await?;
        Ok(())
    }

    /// Commit when `result` is `Ok`, roll back otherwise, and hand `result` back.
    ///
    /// # Errors
    ///
    /// Returns the original error, or the commit error if committing fails.
    pub async fn finish<T>(self, result: Result<T, DatabaseError>) -> Result<T, DatabaseError> {
        match result {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback_error) = self.rollback().await {
                    tracing::warn!(%rollback_error, "rollback failed");
                }
                Err(error)
            }
        }
    }
}
