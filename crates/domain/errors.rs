use thiserror::Error;

/// Store-level failures that callers branch on. Everything else travels as a
/// plain `anyhow::Error`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0} already exists")]
    Duplicate(&'static str),
    #[error("{0} does not exist")]
    Missing(&'static str),
}

impl StoreError {
    pub fn is_duplicate(error: &anyhow::Error) -> bool {
        matches!(
            error.downcast_ref::<StoreError>(),
            Some(StoreError::Duplicate(_))
        )
    }

    pub fn is_missing(error: &anyhow::Error) -> bool {
        matches!(
            error.downcast_ref::<StoreError>(),
            Some(StoreError::Missing(_))
        )
    }
}
