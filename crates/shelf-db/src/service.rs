//! Service layer hosting the catalog and ledger repositories.
//!
//! `ShelfService` wraps `ShelfDb`. All repo methods are implemented as
//! `impl ShelfService` blocks under [`crate::repos`].

use crate::ShelfDb;
use crate::error::DatabaseError;

/// Catalog and ledger access for front ends.
///
/// Mutations that touch more than one row run inside a single write
/// transaction. Borrow/return transitions are not here; they belong to the
/// lending engine, which runs against [`crate::gateway::LendingGateway`].
#[derive(Clone)]
pub struct ShelfService {
    db: ShelfDb,
}

impl ShelfService {
    /// Create a new service wrapping a local database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = ShelfDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `ShelfDb`.
    #[must_use]
    pub const fn from_db(db: ShelfDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &ShelfDb {
        &self.db
    }
}
