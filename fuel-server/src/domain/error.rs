//! Domain error types.
//!
//! These errors represent payloads that fail the record constraints.
//! They are distinct from store and HTTP errors.

/// A record field that violates its constraint.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// String field has the wrong number of characters
    #[error("{field}: must be exactly {expected} characters, got {actual}")]
    WrongLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Numeric field must be strictly greater than a bound
    #[error("{field}: must be greater than {bound}, got {actual}")]
    NotGreaterThan {
        field: &'static str,
        bound: f64,
        actual: f64,
    },

    /// Numeric field is NaN or infinite
    #[error("{field}: must be a finite number")]
    NotFinite { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::WrongLength {
            field: "state",
            expected: 2,
            actual: 5,
        };
        assert_eq!(err.to_string(), "state: must be exactly 2 characters, got 5");

        let err = ValidationError::NotGreaterThan {
            field: "price",
            bound: 0.0,
            actual: -1.5,
        };
        assert_eq!(err.to_string(), "price: must be greater than 0, got -1.5");

        let err = ValidationError::NotFinite { field: "latitude" };
        assert_eq!(err.to_string(), "latitude: must be a finite number");
    }
}
