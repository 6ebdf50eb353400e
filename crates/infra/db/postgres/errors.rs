use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::errors::StoreError;

/// Unique-key violations become [`StoreError::Duplicate`] so usecases can
/// answer with a conflict; anything else is passed through.
pub fn map_unique_violation(error: DieselError, subject: &'static str) -> anyhow::Error {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            anyhow::Error::new(StoreError::Duplicate(subject))
        }
        other => anyhow::Error::new(other),
    }
}

/// A child write whose parent row is gone, either rejected by the foreign key
/// or found missing inside the transaction, becomes [`StoreError::Missing`].
pub fn map_missing_parent(error: DieselError, parent: &'static str) -> anyhow::Error {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
        | DieselError::NotFound => anyhow::Error::new(StoreError::Missing(parent)),
        other => anyhow::Error::new(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_errors_are_not_duplicates() {
        let error = map_unique_violation(DieselError::NotFound, "email");
        assert!(!StoreError::is_duplicate(&error));
    }

    #[test]
    fn vanished_parent_is_missing() {
        let error = map_missing_parent(DieselError::NotFound, "shipment");
        assert!(StoreError::is_missing(&error));
        assert!(!StoreError::is_duplicate(&error));
    }

    #[test]
    fn unrelated_failures_pass_through_as_is() {
        let error = map_missing_parent(DieselError::RollbackTransaction, "shipment");
        assert!(!StoreError::is_missing(&error));
    }
}
