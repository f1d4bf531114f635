//! Position Index Errors

use thiserror::Error;

/// Errors that can occur with the position index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionIndexError {
    /// Index invariants violated (programmer error, not caller misuse).
    ///
    /// Carries the aggregated human-readable descriptions produced by
    /// [`PositionIndex::validate`](crate::PositionIndex::validate).
    #[error("position index invariants violated: {}", violations.join("; "))]
    InvariantViolation {
        /// One description per violated invariant.
        violations: Vec<String>,
    },

    /// Attempted to combine positions for two different symbols.
    #[error("cannot combine positions for different symbols: {left} vs {right}")]
    SymbolMismatch {
        /// Symbol of the left-hand position.
        left: String,
        /// Symbol of the right-hand position.
        right: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PositionIndexError::InvariantViolation {
            violations: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(err.to_string(), "position index invariants violated: a; b");

        let err = PositionIndexError::SymbolMismatch {
            left: "XYZ".to_string(),
            right: "ABC".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot combine positions for different symbols: XYZ vs ABC"
        );
    }
}
