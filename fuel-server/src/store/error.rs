//! Store error types.

/// Errors that can occur when talking to the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No store connection was established at startup
    #[error("Database not available")]
    Unavailable,

    /// The database driver reported a failure
    #[error("{0}")]
    Driver(#[from] mongodb::error::Error),

    /// A record could not be encoded as a stored document
    #[error("failed to encode document: {0}")]
    Encode(#[from] bson::ser::Error),

    /// The store assigned an identifier that is not a record id
    #[error("unexpected identifier returned by store: {0}")]
    UnexpectedId(String),

    /// Any other backend failure
    #[error("{0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(StoreError::Unavailable.to_string(), "Database not available");
        assert_eq!(
            StoreError::Backend("connection reset".into()).to_string(),
            "connection reset"
        );
        assert_eq!(
            StoreError::UnexpectedId("42".into()).to_string(),
            "unexpected identifier returned by store: 42"
        );
    }
}
