use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::LoanState;
use crate::rating::Rating;

/// One borrow event. Open while `returned_at` is unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lending {
    pub id: i64,
    pub book_id: i64,
    pub borrower_name: String,
    pub borrowed_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub rating: Option<Rating>,
}

impl Lending {
    #[must_use]
    pub const fn state(&self) -> LoanState {
        if self.returned_at.is_some() {
            LoanState::Closed
        } else {
            LoanState::Open
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }

    /// Whether this lending belongs to `borrower`, ignoring case.
    #[must_use]
    pub fn is_held_by(&self, borrower: &str) -> bool {
        self.borrower_name.to_lowercase() == borrower.trim().to_lowercase()
    }
}

/// Insert payload for a fresh, open lending.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewLending {
    pub book_id: i64,
    pub borrower_name: String,
    pub borrowed_at: DateTime<Utc>,
}
