//! # shelf-engine
//!
//! The lending consistency engine.
//!
//! Borrow and Return move a copy between the shelf and a borrower. Each runs
//! as one unit of work on a [`shelf_db::gateway::LendingGateway`]: the lending
//! row, the book's copy count, and the book's average rating are committed
//! together or not at all. A per-book lock keeps concurrent callers in the
//! same process from interleaving on one book.

pub mod engine;
pub mod error;
pub mod locks;

pub use engine::LendingEngine;
pub use error::{FailureKind, LendingError};
