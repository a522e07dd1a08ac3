//! Typed failures of the lending engine.

use shelf_core::enums::EntityType;
use shelf_core::errors::CoreError;
use shelf_db::error::DatabaseError;
use thiserror::Error;

/// Coarse classification of a [`LendingError`], for callers that only need
/// to decide how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    NotFound,
    PreconditionViolation,
    Validation,
    /// The store could not complete the unit of work. Nothing was committed;
    /// the whole operation may be retried.
    StorageFailure,
}

#[derive(Debug, Error)]
pub enum LendingError {
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityType, id: i64 },

    #[error("no copies of book {book_id} are available")]
    NoCopiesAvailable { book_id: i64 },

    #[error("{borrower} already has book {book_id} on loan")]
    AlreadyBorrowed { book_id: i64, borrower: String },

    #[error("{borrower} has no open lending for book {book_id}")]
    NoActiveLending { book_id: i64, borrower: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("storage failure: {0}")]
    Storage(#[from] DatabaseError),
}

impl LendingError {
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::NoCopiesAvailable { .. }
            | Self::AlreadyBorrowed { .. }
            | Self::NoActiveLending { .. } => FailureKind::PreconditionViolation,
            Self::Validation(_) => FailureKind::Validation,
            Self::Storage(_) => FailureKind::StorageFailure,
        }
    }

    pub(crate) const fn book_not_found(book_id: i64) -> Self {
        Self::NotFound {
            entity: EntityType::Book,
            id: book_id,
        }
    }
}

impl From<CoreError> for LendingError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => Self::Validation(msg),
            other => Self::Storage(DatabaseError::from(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preconditions_share_a_kind() {
        let errors = [
            LendingError::NoCopiesAvailable { book_id: 1 },
            LendingError::AlreadyBorrowed {
                book_id: 1,
                borrower: "Alice".into(),
            },
            LendingError::NoActiveLending {
                book_id: 1,
                borrower: "Alice".into(),
            },
        ];
        for error in errors {
            assert_eq!(error.kind(), FailureKind::PreconditionViolation);
        }
    }

    #[test]
    fn core_validation_stays_validation() {
        let err = LendingError::from(CoreError::Validation(
            "rating must be between 1 and 10, got 11".into(),
        ));
        assert_eq!(err.kind(), FailureKind::Validation);
        assert_eq!(
            err.to_string(),
            "Validation error: rating must be between 1 and 10, got 11"
        );
    }

    #[test]
    fn messages_name_the_book() {
        assert_eq!(LendingError::book_not_found(7).to_string(), "book 7 not found");
        assert_eq!(
            LendingError::NoActiveLending {
                book_id: 7,
                borrower: "Bob".into()
            }
            .to_string(),
            "Bob has no open lending for book 7"
        );
    }
}
