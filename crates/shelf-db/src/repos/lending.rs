//! Loan ledger repository.
//!
//! Read access for front ends. Lendings are only ever inserted and closed by
//! the lending engine through [`crate::gateway::UnitOfWork`], which reuses the
//! connection-level functions below.

use shelf_core::entities::{Lending, NewLending};

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_optional_datetime, parse_optional_rating};
use crate::service::ShelfService;

const SELECT_COLS: &str = "id, book_id, borrower_name, borrowed_at, returned_at, rating";

/// Filter criteria for ledger queries. Results are always in insertion order.
#[derive(Debug, Clone, Default)]
pub struct LendingFilter {
    /// Borrower name, compared ignoring case.
    pub borrower: Option<String>,
    pub book_id: Option<i64>,
    /// Only lendings that have not been returned.
    pub active_only: bool,
    pub limit: Option<u32>,
}

impl LendingFilter {
    #[must_use]
    pub fn for_book(book_id: i64) -> Self {
        Self {
            book_id: Some(book_id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn for_borrower(borrower: impl Into<String>) -> Self {
        Self {
            borrower: Some(borrower.into()),
            ..Self::default()
        }
    }
}

fn row_to_lending(row: &libsql::Row) -> Result<Lending, DatabaseError> {
    let returned_at = row.get::<Option<String>>(4)?;
    Ok(Lending {
        id: row.get(0)?,
        book_id: row.get(1)?,
        borrower_name: row.get(2)?,
        borrowed_at: parse_datetime(&row.get::<String>(3)?)?,
        returned_at: parse_optional_datetime(returned_at.as_deref())?,
        rating: parse_optional_rating(row.get::<Option<i64>>(5)?)?,
    })
}

pub(crate) async fn query_lendings(
    conn: &libsql::Connection,
    filter: &LendingFilter,
) -> Result<Vec<Lending>, DatabaseError> {
    let mut conditions = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    if let Some(ref borrower) = filter.borrower {
        params.push(libsql::Value::Text(borrower.trim().to_string()));
        conditions.push(format!("lower(borrower_name) = lower(?{})", params.len()));
    }
    if let Some(book_id) = filter.book_id {
        params.push(libsql::Value::Integer(book_id));
        conditions.push(format!("book_id = ?{}", params.len()));
    }
    if filter.active_only {
        conditions.push("returned_at IS NULL".to_string());
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    let limit_clause = filter.limit.map_or_else(String::new, |limit| {
        params.push(libsql::Value::Integer(i64::from(limit)));
        format!("LIMIT ?{}", params.len())
    });

    let sql = format!("SELECT {SELECT_COLS} FROM lendings {where_clause} ORDER BY id {limit_clause}");
    let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;

    let mut lendings = Vec::new();
    while let Some(row) = rows.next().await? {
        lendings.push(row_to_lending(&row)?);
    }
    Ok(lendings)
}

pub(crate) async fn fetch_lending(
    conn: &libsql::Connection,
    id: i64,
) -> Result<Option<Lending>, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM lendings WHERE id = ?1"), [id])
        .await?;
    rows.next().await?.map(|row| row_to_lending(&row)).transpose()
}

/// The open lending for a (book, borrower) pair. The first match wins.
pub(crate) async fn fetch_active_lending(
    conn: &libsql::Connection,
    book_id: i64,
    borrower: &str,
) -> Result<Option<Lending>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {SELECT_COLS} FROM lendings
                 WHERE book_id = ?1 AND lower(borrower_name) = lower(?2) AND returned_at IS NULL
                 ORDER BY id LIMIT 1"
            ),
            libsql::params![book_id, borrower.trim()],
        )
        .await?;
    rows.next().await?.map(|row| row_to_lending(&row)).transpose()
}

pub(crate) async fn insert_lending(
    conn: &libsql::Connection,
    new: &NewLending,
) -> Result<Lending, DatabaseError> {
    conn.execute(
        "INSERT INTO lendings (book_id, borrower_name, borrowed_at) VALUES (?1, ?2, ?3)",
        libsql::params![
            new.book_id,
            new.borrower_name.as_str(),
            new.borrowed_at.to_rfc3339()
        ],
    )
    .await?;

    Ok(Lending {
        id: conn.last_insert_rowid(),
        book_id: new.book_id,
        borrower_name: new.borrower_name.clone(),
        borrowed_at: new.borrowed_at,
        returned_at: None,
        rating: None,
    })
}

/// Persist the return date and rating of a lending. Other columns are immutable.
pub(crate) async fn store_lending(
    conn: &libsql::Connection,
    lending: &Lending,
) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE lendings SET returned_at = ?1, rating = ?2 WHERE id = ?3",
            libsql::params![
                lending.returned_at.map(|at| at.to_rfc3339()),
                lending.rating.map(i64::from),
                lending.id
            ],
        )
        .await?;
    if changed == 0 {
        return Err(DatabaseError::NoResult);
    }
    Ok(())
}

impl ShelfService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no lending has this id.
    pub async fn get_lending(&self, id: i64) -> Result<Lending, DatabaseError> {
        fetch_lending(&*self.db().read().await, id)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// Query the ledger with optional filters.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_lendings(
        &self,
        filter: &LendingFilter,
    ) -> Result<Vec<Lending>, DatabaseError> {
        query_lendings(&*self.db().read().await, filter).await
    }

    /// Every lending of a book, open and closed, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn lendings_for_book(&self, book_id: i64) -> Result<Vec<Lending>, DatabaseError> {
        self.list_lendings(&LendingFilter::for_book(book_id)).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn lendings_for_borrower(
        &self,
        borrower: &str,
    ) -> Result<Vec<Lending>, DatabaseError> {
        self.list_lendings(&LendingFilter::for_borrower(borrower)).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn active_lending(
        &self,
        book_id: i64,
        borrower: &str,
    ) -> Result<Option<Lending>, DatabaseError> {
        fetch_active_lending(&*self.db().read().await, book_id, borrower).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_book, test_service};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use shelf_core::rating::Rating;

    async fn lend(svc: &ShelfService, book_id: i64, name: &str) -> Lending {
        let new = NewLending {
            book_id,
            borrower_name: name.to_string(),
            borrowed_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        };
        let tx = svc.db().begin_write().await.unwrap();
        let lending = insert_lending(&tx, &new).await.unwrap();
        tx.commit().await.unwrap();
        lending
    }

    async fn store(svc: &ShelfService, lending: &Lending) {
        let tx = svc.db().begin_write().await.unwrap();
        store_lending(&tx, lending).await.unwrap();
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn insert_and_fetch_roundtrip() {
        let svc = test_service().await;
        let book = seed_book(&svc, "Ledger", 2).await;

        let lending = lend(&svc, book.id, "Alice").await;
        assert!(lending.is_open());

        let fetched = svc.get_lending(lending.id).await.unwrap();
        assert_eq!(fetched, lending);
    }

    #[tokio::test]
    async fn active_lending_ignores_case_and_closed_loans() {
        let svc = test_service().await;
        let book = seed_book(&svc, "Ledger", 2).await;

        let mut first = lend(&svc, book.id, "Alice").await;
        first.returned_at = Some(Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap());
        first.rating = Some(Rating::new(7).unwrap());
        store(&svc, &first).await;

        assert!(svc.active_lending(book.id, "alice").await.unwrap().is_none());

        let second = lend(&svc, book.id, "Alice").await;
        let active = svc.active_lending(book.id, " ALICE ").await.unwrap();
        assert_eq!(active.map(|l| l.id), Some(second.id));
    }

    #[tokio::test]
    async fn filters_combine() {
        let svc = test_service().await;
        let one = seed_book(&svc, "One", 3).await;
        let two = seed_book(&svc, "Two", 3).await;

        let mut closed = lend(&svc, one.id, "Alice").await;
        closed.returned_at = Some(Utc::now());
        store(&svc, &closed).await;
        lend(&svc, one.id, "Bob").await;
        lend(&svc, two.id, "alice").await;

        assert_eq!(svc.lendings_for_book(one.id).await.unwrap().len(), 2);
        assert_eq!(svc.lendings_for_borrower("ALICE").await.unwrap().len(), 2);

        let filter = LendingFilter {
            borrower: Some("Alice".into()),
            active_only: true,
            ..LendingFilter::default()
        };
        let active = svc.list_lendings(&filter).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].book_id, two.id);

        let limited = LendingFilter {
            limit: Some(1),
            ..LendingFilter::default()
        };
        let first = svc.list_lendings(&limited).await.unwrap();
        assert_eq!(first.iter().map(|l| l.id).collect::<Vec<_>>(), vec![closed.id]);
    }

    #[tokio::test]
    async fn store_unknown_lending_is_no_result() {
        let svc = test_service().await;
        let ghost = Lending {
            id: 404,
            book_id: 1,
            borrower_name: "Nobody".into(),
            borrowed_at: Utc::now(),
            returned_at: Some(Utc::now()),
            rating: None,
        };
        let tx = svc.db().begin_write().await.unwrap();
        let result = store_lending(&tx, &ghost).await;
        tx.rollback().await.unwrap();
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }
}
