//! # shelf-core
//!
//! Core types, rating policy, and error types for Shelf.
//!
//! This crate provides the foundational types shared across all Shelf crates:
//! - Entity structs for the catalog and the loan ledger (books, categories, lendings)
//! - The loan state machine
//! - Rating validation and average-rating aggregation
//! - Field validation limits shared by the store and the CLI
//! - Cross-cutting error types
//! - Response types returned by the lending engine

pub mod entities;
pub mod enums;
pub mod errors;
pub mod rating;
pub mod responses;
pub mod validation;
