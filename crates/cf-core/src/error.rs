use cf_store::StoreError;

/// Failure taxonomy surfaced to callers.
///
/// `Validation` fires before any mutation is attempted (no partial writes on
/// bad input). `NotFound` aborts the surrounding operation. `Store` is an
/// opaque backend failure.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    #[error("store failure: {0}")]
    Store(#[from] anyhow::Error),
}

impl CoreError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, key } => CoreError::NotFound { entity, key },
            StoreError::Backend(e) => CoreError::Store(e),
        }
    }
}

/// Reject empty or whitespace-only required string fields.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Normalize an optional string: empty input means "absent".
pub(crate) fn non_empty_opt(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
