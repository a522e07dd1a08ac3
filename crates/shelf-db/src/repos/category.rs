//! Category repository.
//!
//! Categories are a lookup dictionary created on demand; names are unique
//! ignoring case (the column is `COLLATE NOCASE`).

use shelf_core::entities::{Book, Category};
use shelf_core::validation::{MAX_CATEGORY_LEN, required_text};

use crate::error::DatabaseError;
use crate::repos::book::fetch_book;
use crate::service::ShelfService;

fn row_to_category(row: &libsql::Row) -> Result<Category, DatabaseError> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub(crate) async fn find_category_by_name(
    conn: &libsql::Connection,
    name: &str,
) -> Result<Option<Category>, DatabaseError> {
    let mut rows = conn
        .query("SELECT id, name FROM categories WHERE name = ?1", [name.trim()])
        .await?;
    rows.next().await?.map(|row| row_to_category(&row)).transpose()
}

/// Return the category with this name, inserting it first if needed.
pub(crate) async fn ensure_category(
    conn: &libsql::Connection,
    name: &str,
) -> Result<Category, DatabaseError> {
    let name = required_text(name, "category name", MAX_CATEGORY_LEN)?;
    conn.execute(
        "INSERT INTO categories (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
        [name],
    )
    .await?;
    find_category_by_name(conn, name)
        .await?
        .ok_or(DatabaseError::NoResult)
}

pub(crate) async fn link_category(
    conn: &libsql::Connection,
    book_id: i64,
    category_id: i64,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO book_categories (book_id, category_id) VALUES (?1, ?2)
         ON CONFLICT(book_id, category_id) DO NOTHING",
        [book_id, category_id],
    )
    .await?;
    Ok(())
}

async fn tag(conn: &libsql::Connection, book_id: i64, name: &str) -> Result<(), DatabaseError> {
    if fetch_book(conn, book_id).await?.is_none() {
        return Err(DatabaseError::NoResult);
    }
    let category = ensure_category(conn, name).await?;
    link_category(conn, book_id, category.id).await
}

async fn untag(conn: &libsql::Connection, book_id: i64, name: &str) -> Result<(), DatabaseError> {
    if fetch_book(conn, book_id).await?.is_none() {
        return Err(DatabaseError::NoResult);
    }
    conn.execute(
        "DELETE FROM book_categories
         WHERE book_id = ?1
           AND category_id IN (SELECT id FROM categories WHERE name = ?2)",
        libsql::params![book_id, name.trim()],
    )
    .await?;
    Ok(())
}

impl ShelfService {
    /// All categories ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query("SELECT id, name FROM categories ORDER BY name, id", ())
            .await?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(row_to_category(&row)?);
        }
        Ok(categories)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no category has this id.
    pub async fn get_category(&self, id: i64) -> Result<Category, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query("SELECT id, name FROM categories WHERE id = ?1", [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_category(&row)
    }

    /// Case-insensitive lookup by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_category_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Category>, DatabaseError> {
        find_category_by_name(&*self.db().read().await, name).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank or over-long name.
    pub async fn get_or_create_category(&self, name: &str) -> Result<Category, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result = ensure_category(&tx, name).await;
        let category = tx.finish(result).await?;
        tracing::debug!(category_id = category.id, name = %category.name, "category ready");
        Ok(category)
    }

    /// Tag a book, creating the category on demand. Tagging twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` for an unknown book.
    pub async fn tag_book(&self, book_id: i64, name: &str) -> Result<Book, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result = tag(&tx, book_id, name).await;
        tx.finish(result).await?;
        tracing::info!(book_id, category = name.trim(), "book tagged");
        self.get_book(book_id).await
    }

    /// Remove a tag from a book. Removing a tag the book lacks is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` for an unknown book.
    pub async fn untag_book(&self, book_id: i64, name: &str) -> Result<Book, DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result = untag(&tx, book_id, name).await;
        tx.finish(result).await?;
        tracing::info!(book_id, category = name.trim(), "book untagged");
        self.get_book(book_id).await
    }

    /// Delete a category and its links to books.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no category has this id.
    pub async fn delete_category(&self, id: i64) -> Result<(), DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result = tx
            .execute("DELETE FROM categories WHERE id = ?1", [id])
            .await
            .map_err(DatabaseError::from)
            .and_then(|deleted| {
                if deleted == 0 {
                    Err(DatabaseError::NoResult)
                } else {
                    Ok(())
                }
            });
        tx.finish(result).await
    }
}
