//! Transactional surface consumed by the lending engine.
//!
//! [`LendingGateway`] hands out units of work; a [`UnitOfWork`] reads and
//! writes books and lendings inside one transaction that is either committed
//! or rolled back as a whole. `ShelfDb` implements the gateway with `WriteTx`
//! as its unit.

use shelf_core::entities::{Book, Lending, NewLending};

use crate::error::DatabaseError;
use crate::repos::book::{fetch_book, store_book};
use crate::repos::lending::{
    LendingFilter, fetch_active_lending, fetch_lending, insert_lending, query_lendings,
    store_lending,
};
use crate::{ShelfDb, WriteTx};

/// One atomic batch of reads and writes.
#[allow(async_fn_in_trait)]
pub trait UnitOfWork {
    async fn get_book(&self, id: i64) -> Result<Option<Book>, DatabaseError>;

    /// Persist title, author, copy count, and average rating.
    async fn update_book(&self, book: &Book) -> Result<(), DatabaseError>;

    async fn get_lending(&self, id: i64) -> Result<Option<Lending>, DatabaseError>;

    async fn add_lending(&self, new: &NewLending) -> Result<Lending, DatabaseError>;

    /// Persist the return date and rating of a lending.
    async fn update_lending(&self, lending: &Lending) -> Result<(), DatabaseError>;

    async fn lendings_for_book(&self, book_id: i64) -> Result<Vec<Lending>, DatabaseError>;

    async fn active_lending(
        &self,
        book_id: i64,
        borrower: &str,
    ) -> Result<Option<Lending>, DatabaseError>;

    async fn commit(self) -> Result<(), DatabaseError>;

    async fn rollback(self) -> Result<(), DatabaseError>;
}

/// Source of units of work plus the read-only ledger queries.
#[allow(async_fn_in_trait)]
pub trait LendingGateway {
    type Unit: UnitOfWork;

    /// Open a unit of work. Units are serialized: this waits for any other
    /// open unit, and for in-flight reads, to finish.
    ///
    /// The read methods below wait for an open unit instead of seeing its
    /// uncommitted writes.
    async fn begin(&self) -> Result<Self::Unit, DatabaseError>;

    async fn list_lendings(&self, filter: &LendingFilter) -> Result<Vec<Lending>, DatabaseError>;

    async fn active_lending(
        &self,
        book_id: i64,
        borrower: &str,
    ) -> Result<Option<Lending>, DatabaseError>;

    async fn lendings_for_book(&self, book_id: i64) -> Result<Vec<Lending>, DatabaseError>;
}

impl UnitOfWork for WriteTx {
    async fn get_book(&self, id: i64) -> Result<Option<Book>, DatabaseError> {
        fetch_book(self, id).await
    }

    async fn update_book(&self, book: &Book) -> Result<(), DatabaseError> {
        store_book(self, book).await
    }

    async fn get_lending(&self, id: i64) -> Result<Option<Lending>, DatabaseError> {
        fetch_lending(self, id).await
    }

    async fn add_lending(&self, new: &NewLending) -> Result<Lending, DatabaseError> {
        insert_lending(self, new).await
    }

    async fn update_lending(&self, lending: &Lending) -> Result<(), DatabaseError> {
        store_lending(self, lending).await
    }

    async fn lendings_for_book(&self, book_id: i64) -> Result<Vec<Lending>, DatabaseError> {
        query_lendings(self, &LendingFilter::for_book(book_id)).await
    }

    async fn active_lending(
        &self,
        book_id: i64,
        borrower: &str,
    ) -> Result<Option<Lending>, DatabaseError> {
        fetch_active_lending(self, book_id, borrower).await
    }

    async fn commit(self) -> Result<(), DatabaseError> {
        Self::commit(self).await
    }

    async fn rollback(self) -> Result<(), DatabaseError> {
        Self::rollback(self).await
    }
}

impl LendingGateway for ShelfDb {
    type Unit = WriteTx;

    async fn begin(&self) -> Result<WriteTx, DatabaseError> {
        self.begin_write().await
    }

    async fn list_lendings(&self, filter: &LendingFilter) -> Result<Vec<Lending>, DatabaseError> {
        query_lendings(&*self.read().await, filter).await
    }

    async fn active_lending(
        &self,
        book_id: i64,
        borrower: &str,
    ) -> Result<Option<Lending>, DatabaseError> {
        fetch_active_lending(&*self.read().await, book_id, borrower).await
    }

    async fn lendings_for_book(&self, book_id: i64) -> Result<Vec<Lending>, DatabaseError> {
        query_lendings(&*self.read().await, &LendingFilter::for_book(book_id)).await
    }
}
