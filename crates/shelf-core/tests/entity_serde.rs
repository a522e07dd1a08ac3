//! JSON shape tests for the entity types printed by `shelf`.

use chrono::Utc;
use pretty_assertions::assert_eq;
use shelf_core::entities::{Book, Category, Lending};
use shelf_core::rating::Rating;
use shelf_core::responses::LendingReceipt;

fn sample_book() -> Book {
    Book {
        id: 3,
        title: "Dune".into(),
        author: "Frank Herbert".into(),
        copies: 2,
        average_rating: 8.5,
        categories: vec![Category {
            id: 1,
            name: "Science Fiction".into(),
        }],
    }
}

#[test]
fn open_lending_serializes_nulls() {
    let lending = Lending {
        id: 1,
        book_id: 3,
        borrower_name: "Alice".into(),
        borrowed_at: Utc::now(),
        returned_at: None,
        rating: None,
    };

    let value = serde_json::to_value(&lending).unwrap();
    assert_eq!(value["returned_at"], serde_json::Value::Null);
    assert_eq!(value["rating"], serde_json::Value::Null);
    assert_eq!(value["borrower_name"], "Alice");
}

#[test]
fn rating_serializes_as_plain_number() {
    let lending = Lending {
        id: 2,
        book_id: 3,
        borrower_name: "Bob".into(),
        borrowed_at: Utc::now(),
        returned_at: Some(Utc::now()),
        rating: Some(Rating::new(9).unwrap()),
    };

    let value = serde_json::to_value(&lending).unwrap();
    assert_eq!(value["rating"], 9);

    let recovered: Lending = serde_json::from_value(value).unwrap();
    assert_eq!(recovered, lending);
}

#[test]
fn lending_with_invalid_rating_fails_to_deserialize() {
    let json = serde_json::json!({
        "id": 1,
        "book_id": 3,
        "borrower_name": "Alice",
        "borrowed_at": "2026-02-09T14:30:00Z",
        "returned_at": "2026-02-10T14:30:00Z",
        "rating": 42
    });
    assert!(serde_json::from_value::<Lending>(json).is_err());
}

#[test]
fn receipt_nests_book_and_lending() {
    let receipt = LendingReceipt {
        lending: Lending {
            id: 5,
            book_id: 3,
            borrower_name: "Carol".into(),
            borrowed_at: Utc::now(),
            returned_at: None,
            rating: None,
        },
        book: sample_book(),
    };

    let value = serde_json::to_value(&receipt).unwrap();
    assert_eq!(value["book"]["copies"], 2);
    assert_eq!(value["book"]["categories"][0]["name"], "Science Fiction");
    assert_eq!(value["lending"]["id"], 5);
}

#[test]
fn category_lookup_ignores_case() {
    let book = sample_book();
    assert!(book.has_category("science fiction"));
    assert!(!book.has_category("fantasy"));
    assert!(book.is_available());
}
