//! Repository modules for the catalog and the loan ledger.
//!
//! Each module adds methods to `ShelfService` via `impl ShelfService` blocks.
//! The connection-level functions they share are `pub(crate)` so the
//! gateway's unit of work can run them inside its transaction.

pub mod book;
pub mod category;
pub mod lending;
