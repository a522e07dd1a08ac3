//! Borrow/return orchestration.

use chrono::Utc;
use shelf_core::entities::{Lending, NewLending};
use shelf_core::enums::LoanState;
use shelf_core::rating::{Rating, average_rating};
use shelf_core::responses::LendingReceipt;
use shelf_core::validation;
use shelf_db::gateway::{LendingGateway, UnitOfWork};
use shelf_db::repos::lending::LendingFilter;

use crate::error::LendingError;
use crate::locks::BookLocks;

/// Runs lending transitions against a gateway.
///
/// Borrow and Return hold the book's lock from the first read to the commit,
/// and every write of one operation goes through a single unit of work.
pub struct LendingEngine<G> {
    gateway: G,
    locks: BookLocks,
}

impl<G: LendingGateway> LendingEngine<G> {
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            locks: BookLocks::new(),
        }
    }

    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Lend one copy of a book to `borrower`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the book does not exist
    /// - `NoCopiesAvailable` if every copy is out
    /// - `AlreadyBorrowed` if `borrower` already holds an open lending of it
    /// - `Validation` for a blank or over-long name
    /// - `Storage` if the unit of work fails; nothing is committed then
    pub async fn borrow(
        &self,
        book_id: i64,
        borrower: &str,
    ) -> Result<LendingReceipt, LendingError> {
        let borrower = validation::borrower_name(borrower)?;

        let _guard = self.locks.lock(book_id).await;
        let unit = self.gateway.begin().await?;
        let outcome = borrow_in(&unit, book_id, borrower).await;
        let receipt = finish(unit, outcome).await?;

        tracing::info!(
            book_id,
            borrower,
            lending_id = receipt.lending.id,
            copies_left = receipt.book.copies,
            "book borrowed"
        );
        Ok(receipt)
    }

    /// Close `borrower`'s open lending of a book, optionally with a rating.
    ///
    /// The book's average rating is recomputed from every rated lending of
    /// the book. With no rated lendings it keeps its current value.
    ///
    /// # Errors
    ///
    /// - `NoActiveLending` if `borrower` holds no open lending of the book
    /// - `NotFound` if the book has disappeared
    /// - `Validation` for a blank name or a rating outside `1..=10`
    /// - `Storage` if the unit of work fails; nothing is committed then
    pub async fn return_book(
        &self,
        book_id: i64,
        borrower: &str,
        rating: Option<i64>,
    ) -> Result<LendingReceipt, LendingError> {
        let borrower = validation::borrower_name(borrower)?;
        let rating = rating.map(Rating::new).transpose()?;

        let _guard = self.locks.lock(book_id).await;
        let unit = self.gateway.begin().await?;
        let outcome = return_in(&unit, book_id, borrower, rating).await;
        let receipt = finish(unit, outcome).await?;

        tracing::info!(
            book_id,
            borrower,
            lending_id = receipt.lending.id,
            rating = receipt.lending.rating.map(Rating::get),
            average_rating = receipt.book.average_rating,
            "book returned"
        );
        Ok(receipt)
    }

    /// The open lending of a book held by `borrower`, if any.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank name or `Storage` if the lookup fails.
    pub async fn active_lending(
        &self,
        book_id: i64,
        borrower: &str,
    ) -> Result<Option<Lending>, LendingError> {
        let borrower = validation::borrower_name(borrower)?;
        let lending = self.gateway.active_lending(book_id, borrower).await?;
        tracing::debug!(book_id, borrower, found = lending.is_some(), "active lending lookup");
        Ok(lending)
    }

    /// Every lending of a book in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the query fails.
    pub async fn loans_for_book(&self, book_id: i64) -> Result<Vec<Lending>, LendingError> {
        Ok(self.gateway.lendings_for_book(book_id).await?)
    }

    /// The whole ledger in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Lending>, LendingError> {
        self.list(&LendingFilter::default()).await
    }

    /// The ledger narrowed by borrower, book, or open state.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the query fails.
    pub async fn list(&self, filter: &LendingFilter) -> Result<Vec<Lending>, LendingError> {
        Ok(self.gateway.list_lendings(filter).await?)
    }
}

async fn borrow_in<U: UnitOfWork>(
    unit: &U,
    book_id: i64,
    borrower: &str,
) -> Result<LendingReceipt, LendingError> {
    let mut book = unit
        .get_book(book_id)
        .await?
        .ok_or_else(|| LendingError::book_not_found(book_id))?;
    if !book.is_available() {
        return Err(LendingError::NoCopiesAvailable { book_id });
    }
    if unit.active_lending(book_id, borrower).await?.is_some() {
        return Err(LendingError::AlreadyBorrowed {
            book_id,
            borrower: borrower.to_string(),
        });
    }

    let lending = unit
        .add_lending(&NewLending {
            book_id,
            borrower_name: borrower.to_string(),
            borrowed_at: Utc::now(),
        })
        .await?;
    book.copies -= 1;
    unit.update_book(&book).await?;

    Ok(LendingReceipt { lending, book })
}

async fn return_in<U: UnitOfWork>(
    unit: &U,
    book_id: i64,
    borrower: &str,
    rating: Option<Rating>,
) -> Result<LendingReceipt, LendingError> {
    let no_active = || LendingError::NoActiveLending {
        book_id,
        borrower: borrower.to_string(),
    };
    let mut lending = unit
        .active_lending(book_id, borrower)
        .await?
        .ok_or_else(no_active)?;
    if !lending.state().can_transition_to(LoanState::Closed) {
        return Err(no_active());
    }
    let mut book = unit
        .get_book(book_id)
        .await?
        .ok_or_else(|| LendingError::book_not_found(book_id))?;

    lending.returned_at = Some(Utc::now());
    lending.rating = rating;
    unit.update_lending(&lending).await?;

    book.copies = book.copies.checked_add(1).ok_or_else(|| {
        LendingError::Validation(format!("book {book_id} cannot hold more copies"))
    })?;
    let ratings = unit
        .lendings_for_book(book_id)
        .await?
        .into_iter()
        .filter_map(|l| l.rating);
    if let Some(average) = average_rating(ratings) {
        book.average_rating = average;
    }
    unit.update_book(&book).await?;

    Ok(LendingReceipt { lending, book })
}

/// Commit on success, roll back on failure.
async fn finish<U: UnitOfWork>(
    unit: U,
    outcome: Result<LendingReceipt, LendingError>,
) -> Result<LendingReceipt, LendingError> {
    match outcome {
        Ok(receipt) => {
            unit.commit().await?;
            Ok(receipt)
        }
        Err(error) => {
            if let Err(rollback_error) = unit.rollback().await {
                tracing::warn!(%rollback_error, %error, "rollback failed");
            }
            if !matches!(error, LendingError::Storage(_)) {
                tracing::debug!(%error, "lending transition refused");
            }
            Err(error)
        }
    }
}
