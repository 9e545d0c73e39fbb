use thiserror::Error;

/// Core-level errors.
///
/// The core crate itself is mostly infallible; this exists for states the
/// layers above treat as impossible, like a missing depot injection.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_violation_names_the_invariant() {
        let err = CoreError::InvariantViolation("HTTP client not found in depot");
        assert_eq!(
            err.to_string(),
            "Invariant violation: HTTP client not found in depot"
        );
    }
}
