//! Interleaved borrows of the same book must never oversubscribe it, and
//! readers must never observe a unit of work before it commits.

use std::time::Duration;

use chrono::Utc;
use shelf_core::entities::NewLending;
use shelf_db::ShelfDb;
use shelf_db::gateway::{LendingGateway, UnitOfWork};
use shelf_db::service::ShelfService;
use shelf_engine::{LendingEngine, LendingError};

async fn library(copies: u32) -> (ShelfDb, i64) {
    let db = ShelfDb::open_local(":memory:").await.unwrap();
    let id = ShelfService::from_db(db.clone())
        .create_book("Contested", "Author", copies, &[])
        .await
        .unwrap()
        .id;
    (db, id)
}

#[tokio::test]
async fn last_copy_goes_to_exactly_one_borrower() {
    let (db, book_id) = library(1).await;
    let engine = LendingEngine::new(db.clone());

    let (alice, bob) = tokio::join!(engine.borrow(book_id, "Alice"), engine.borrow(book_id, "Bob"));

    let winners = [alice.is_ok(), bob.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(winners, 1);
    let loser = alice.err().or(bob.err());
    assert!(matches!(loser, Some(LendingError::NoCopiesAvailable { .. })));

    let book = ShelfService::from_db(db).get_book(book_id).await.unwrap();
    assert_eq!(book.copies, 0);
}

#[tokio::test]
async fn separate_engines_on_one_store_are_serialized() {
    let (db, book_id) = library(2).await;
    let first = LendingEngine::new(db.clone());
    let second = LendingEngine::new(db.clone());

    let results = tokio::join!(
        first.borrow(book_id, "Alice"),
        second.borrow(book_id, "Bob"),
        first.borrow(book_id, "Carol"),
        second.borrow(book_id, "Dave"),
    );
    let outcomes = [results.0.is_ok(), results.1.is_ok(), results.2.is_ok(), results.3.is_ok()];
    assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 2);

    let svc = ShelfService::from_db(db);
    assert_eq!(svc.get_book(book_id).await.unwrap().copies, 0);
    assert_eq!(svc.lendings_for_book(book_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn same_borrower_racing_gets_one_loan() {
    let (db, book_id) = library(5).await;
    let engine = LendingEngine::new(db.clone());

    let (a, b) = tokio::join!(engine.borrow(book_id, "Alice"), engine.borrow(book_id, "alice"));
    assert!(a.is_ok() ^ b.is_ok());

    let svc = ShelfService::from_db(db);
    assert_eq!(svc.get_book(book_id).await.unwrap().copies, 4);
    assert_eq!(svc.lendings_for_borrower("ALICE").await.unwrap().len(), 1);
}

#[tokio::test]
async fn readers_wait_for_an_open_unit_of_work() {
    let (db, book_id) = library(1).await;
    let engine = LendingEngine::new(db.clone());
    let svc = ShelfService::from_db(db.clone());
    let patience = Duration::from_millis(50);

    let unit = db.begin().await.unwrap();
    unit.add_lending(&NewLending {
        book_id,
        borrower_name: "Alice".into(),
        borrowed_at: Utc::now(),
    })
    .await
    .unwrap();

    let lookup = tokio::time::timeout(patience, engine.active_lending(book_id, "Alice")).await;
    assert!(lookup.is_err(), "lookup must not see the uncommitted lending");
    let book = tokio::time::timeout(patience, svc.get_book(book_id)).await;
    assert!(book.is_err(), "catalog read must not run inside the open unit");

    UnitOfWork::rollback(unit).await.unwrap();

    assert!(engine.active_lending(book_id, "Alice").await.unwrap().is_none());
    assert!(engine.list_all().await.unwrap().is_empty());
    assert_eq!(svc.get_book(book_id).await.unwrap().copies, 1);
}
