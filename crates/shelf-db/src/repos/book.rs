//! Book repository: catalog CRUD, search, and restocking.
//!
//! Copy counts and average ratings change through the lending engine; the
//! writes here are catalog edits made by an operator.

use std::collections::HashMap;

use shelf_core::entities::{Book, Category};
use shelf_core::enums::BookSort;
use shelf_core::validation::{MAX_AUTHOR_LEN, MAX_TITLE_LEN, required_text};

use crate::error::DatabaseError;
use crate::helpers::{parse_copies, placeholders};
use crate::repos::category::{ensure_category, link_category};
use crate::service::ShelfService;
use crate::updates::book::BookUpdate;

const SELECT_COLS: &str = "b.id, b.title, b.author, b.copies, b.average_rating";

/// Search criteria for catalog queries. Every criterion that is set must match.
#[derive(Debug, Clone, Default)]
pub struct BookQuery {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Case-insensitive substring of the author.
    pub author: Option<String>,
    /// Matches books tagged with any of these category names.
    pub categories: Vec<String>,
    pub sort: BookSort,
    pub limit: Option<u32>,
}

fn row_to_book(row: &libsql::Row) -> Result<Book, DatabaseError> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        copies: parse_copies(row.get::<i64>(3)?)?,
        average_rating: row.get(4)?,
        categories: Vec::new(),
    })
}

async fn collect_books(mut rows: libsql::Rows) -> Result<Vec<Book>, DatabaseError> {
    let mut books = Vec::new();
    while let Some(row) = rows.next().await? {
        books.push(row_to_book(&row)?);
    }
    Ok(books)
}

/// Fill in `categories` for every book, sorted by name.
pub(crate) async fn attach_categories(
    conn: &libsql::Connection,
    books: &mut [Book],
) -> Result<(), DatabaseError> {
    if books.is_empty() {
        return Ok(());
    }

    let sql = format!(
        "SELECT bc.book_id, c.id, c.name
         FROM book_categories bc
         JOIN categories c ON c.id = bc.category_id
         WHERE bc.book_id IN ({})
         ORDER BY c.name, c.id",
        placeholders(1, books.len())
    );
    let params: Vec<libsql::Value> = books
        .iter()
        .map(|book| libsql::Value::Integer(book.id))
        .collect();
    let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;

    let mut by_book: HashMap<i64, Vec<Category>> = HashMap::new();
    while let Some(row) = rows.next().await? {
        by_book.entry(row.get(0)?).or_default().push(Category {
            id: row.get(1)?,
            name: row.get(2)?,
        });
    }
    for book in books.iter_mut() {
        book.categories = by_book.remove(&book.id).unwrap_or_default();
    }
    Ok(())
}

/// Load one book with its categories.
pub(crate) async fn fetch_book(
    conn: &libsql::Connection,
    id: i64,
) -> Result<Option<Book>, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM books b WHERE b.id = ?1"), [id])
        .await?;
    let Some(row) = rows.next().await? else {
        return Ok(None);
    };
    let mut book = [row_to_book(&row)?];
    attach_categories(conn, &mut book).await?;
    let [book] = book;
    Ok(Some(book))
}

/// Overwrite the scalar columns of a book. Category links are untouched.
pub(crate) async fn store_book(
    conn: &libsql::Connection,
    book: &Book,
) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE books SET title = ?1, author = ?2, copies = ?3, average_rating = ?4
             WHERE id = ?5",
            libsql::params![
                book.title.as_str(),
                book.author.as_str(),
                i64::from(book.copies),
                book.average_rating,
                book.id
            ],
        )
        .await?;
    if changed == 0 {
        return Err(DatabaseError::NoResult);
    }
    Ok(())
}

async fn insert_book(
    conn: &libsql::Connection,
    title: &str,
    author: &str,
    copies: u32,
    categories: &[String],
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO books (title, author, copies, average_rating) VALUES (?1, ?2, ?3, 0)",
        libsql::params![title, author, i64::from(copies)],
    )
    .await?;
    let id = conn.last_insert_rowid();

    for name in categories {
        let category = ensure_category(conn, name).await?;
        link_category(conn, id, category.id).await?;
    }
    Ok(id)
}

async fn apply_update(
    conn: &libsql::Connection,
    book_id: i64,
    update: &BookUpdate,
) -> Result<(), DatabaseError> {
    let mut sets = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    if let Some(ref title) = update.title {
        params.push(required_text(title, "title", MAX_TITLE_LEN)?.into());
        sets.push(format!("title = ?{}", params.len()));
    }
    if let Some(ref author) = update.author {
        params.push(required_text(author, "author", MAX_AUTHOR_LEN)?.into());
        sets.push(format!("author = ?{}", params.len()));
    }
    if let Some(copies) = update.copies {
        params.push(i64::from(copies).into());
        sets.push(format!("copies = ?{}", params.len()));
    }

    params.push(book_id.into());
    let sql = format!(
        "UPDATE books SET {} WHERE id = ?{}",
        sets.join(", "),
        params.len()
    );
    let changed = conn.execute(&sql, libsql::params_from_iter(params)).await?;
    if changed == 0 {
        return Err(DatabaseError::NoResult);
    }
    Ok(())
}

async fn remove_book(conn: &libsql::Connection, book_id: i64) -> Result<(), DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT COUNT(*) FROM lendings WHERE book_id = ?1 AND returned_at IS NULL",
            [book_id],
        )
        .await?;
    let open: i64 = rows.next().await?.ok_or(DatabaseError::NoResult)?.get(0)?;
    if open > 0 {
        return Err(DatabaseError::InvalidState(format!(
            "book {book_id} has {open} open lending(s)"
        )));
    }

    let deleted = conn
        .execute("DELETE FROM books WHERE id = ?1", [book_id])
        .await?;
    if deleted == 0 {
        return Err(DatabaseError::NoResult);
    }
    Ok(())
}

impl ShelfService {
    /// Add a book to the catalog, creating any categories that do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank or over-long title,
    /// author, or category name, or another `DatabaseError` if the insert fails.
    pub async fn create_book(
        &self,
        title: &str,
        author: &str,
        copies: u32,
        categories: &[String],
    ) -> Result<Book, DatabaseError> {
        let title = required_text(title, "title", MAX_TITLE_LEN)?;
        let author = required_text(author, "author", MAX_AUTHOR_LEN)?;

        let tx = self.db().begin_write().await?;
        let result = insert_book(&tx, title, author, copies, categories).await;
        let id = tx.finish(result).await?;

        tracing::info!(book_id = id, title, copies, "book added");
        self.get_book(id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no book has this id.
    pub async fn get_book(&self, id: i64) -> Result<Book, DatabaseError> {
        fetch_book(&*self.db().read().await, id)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// List books in the given order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_books(&self, sort: BookSort, limit: u32) -> Result<Vec<Book>, DatabaseError> {
        let conn = self.db().read().await;
        let rows = conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM books b ORDER BY {} LIMIT ?1",
                    sort.order_by()
                ),
                [i64::from(limit)],
            )
            .await?;
        let mut books = collect_books(rows).await?;
        attach_categories(&conn, &mut books).await?;
        Ok(books)
    }

    /// Search by title, author, and category membership.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn search_books(&self, query: &BookQuery) -> Result<Vec<Book>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref title) = query.title {
            params.push(libsql::Value::Text(title.trim().to_string()));
            conditions.push(format!("instr(lower(b.title), lower(?{})) > 0", params.len()));
        }
        if let Some(ref author) = query.author {
            params.push(libsql::Value::Text(author.trim().to_string()));
            conditions.push(format!("instr(lower(b.author), lower(?{})) > 0", params.len()));
        }
        if !query.categories.is_empty() {
            let start = params.len() + 1;
            params.extend(
                query
                    .categories
                    .iter()
                    .map(|name| libsql::Value::Text(name.trim().to_string())),
            );
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM book_categories bc
                         JOIN categories c ON c.id = bc.category_id
                         WHERE bc.book_id = b.id AND c.name IN ({}))",
                placeholders(start, query.categories.len())
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let limit_clause = query.limit.map_or_else(String::new, |limit| {
            params.push(i64::from(limit).into());
            format!("LIMIT ?{}", params.len())
        });

        let sql = format!(
            "SELECT {SELECT_COLS} FROM books b {where_clause} ORDER BY {} {limit_clause}",
            query.sort.order_by()
        );
        let conn = self.db().read().await;
        let rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
        let mut books = collect_books(rows).await?;
        attach_categories(&conn, &mut books).await?;
        tracing::debug!(matches = books.len(), "book search");
        Ok(books)
    }

    /// Edit title, author, or copy count. An empty update returns the book as is.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` for an unknown id and
    /// `DatabaseError::Validation` for a blank or over-long field.
    pub async fn update_book(&self, id: i64, update: BookUpdate) -> Result<Book, DatabaseError> {
        if update.is_empty() {
            return self.get_book(id).await;
        }

        let tx = self.db().begin_write().await?;
        let result = apply_update(&tx, id, &update).await;
        tx.finish(result).await?;

        tracing::info!(book_id = id, ?update, "book updated");
        self.get_book(id).await
    }

    /// Add copies to the shelf.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` when `additional` is zero and
    /// `DatabaseError::NoResult` for an unknown id.
    pub async fn restock_book(&self, id: i64, additional: u32) -> Result<Book, DatabaseError> {
        if additional == 0 {
            return Err(DatabaseError::Validation(
                "restock amount must be greater than zero".into(),
            ));
        }

        let tx = self.db().begin_write().await?;
        let result = tx
            .execute(
                "UPDATE books SET copies = copies + ?1 WHERE id = ?2",
                libsql::params![i64::from(additional), id],
            )
            .await
            .map_err(DatabaseError::from)
            .and_then(|changed| {
                if changed == 0 {
                    Err(DatabaseError::NoResult)
                } else {
                    Ok(())
                }
            });
        tx.finish(result).await?;

        tracing::info!(book_id = id, additional, "book restocked");
        self.get_book(id).await
    }

    /// Delete a book and its lending history.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` while the book has open lendings
    /// and `DatabaseError::NoResult` for an unknown id.
    pub async fn delete_book(&self, id: i64) -> Result<(), DatabaseError> {
        let tx = self.db().begin_write().await?;
        let result = remove_book(&tx, id).await;
        tx.finish(result).await?;
        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }
}
