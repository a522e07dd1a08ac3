//! Response types returned by the lending engine and printed by `shelf`.

use serde::{Deserialize, Serialize};

use crate::entities::{Book, Lending};

/// Result of a committed borrow or return: the lending as stored and the book
/// as it stands after the transition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LendingReceipt {
    pub lending: Lending,
    pub book: Book,
}
