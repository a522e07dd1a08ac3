//! Entity structs for the Shelf catalog and loan ledger.
//!
//! Each entity maps to a table in the libSQL database (see
//! `shelf-db/migrations/001_initial.sql`). All structs derive `Serialize` and
//! `Deserialize` for JSON output.

mod book;
mod category;
mod lending;

pub use book::Book;
pub use category::Category;
pub use lending::{Lending, NewLending};
