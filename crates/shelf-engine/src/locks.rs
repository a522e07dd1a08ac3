//! Per-book mutual exclusion.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Table of async locks keyed by book id.
///
/// Entries nobody holds or waits on are dropped the next time any lock is
/// taken, so the table stays proportional to the books in use.
#[derive(Debug, Default)]
pub struct BookLocks {
    inner: Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>,
}

impl BookLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `book_id`. Access ends when the guard drops.
    pub async fn lock(&self, book_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut table = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            table.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(table.entry(book_id).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of books currently tracked.
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn same_book_is_exclusive() {
        let locks = BookLocks::new();
        let guard = locks.lock(1).await;

        let blocked = tokio::time::timeout(Duration::from_millis(50), locks.lock(1)).await;
        assert!(blocked.is_err());

        drop(guard);
        let _again = locks.lock(1).await;
    }

    #[tokio::test]
    async fn different_books_do_not_block() {
        let locks = BookLocks::new();
        let _one = locks.lock(1).await;
        let two = tokio::time::timeout(Duration::from_millis(50), locks.lock(2)).await;
        assert!(two.is_ok());
    }

    #[tokio::test]
    async fn released_entries_are_pruned() {
        let locks = BookLocks::new();
        for book_id in 0..10 {
            let _guard = locks.lock(book_id).await;
        }
        let _last = locks.lock(99).await;
        assert_eq!(locks.tracked(), 1);
    }
}
