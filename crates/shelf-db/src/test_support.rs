//! Shared test utilities for shelf-db unit tests.

pub(crate) mod helpers {
    use shelf_core::entities::Book;

    use crate::service::ShelfService;

    /// Create an in-memory `ShelfService`.
    pub async fn test_service() -> ShelfService {
        ShelfService::new_local(":memory:").await.unwrap()
    }

    /// Insert a book with the given copy count and no categories.
    pub async fn seed_book(svc: &ShelfService, title: &str, copies: u32) -> Book {
        svc.create_book(title, "Test Author", copies, &[])
            .await
            .unwrap()
    }
}
