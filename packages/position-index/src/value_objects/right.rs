//! Option Right Value Object

use serde::{Deserialize, Serialize};

/// Option right (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionRight {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

impl OptionRight {
    /// Get the opposite right (call↔put).
    #[must_use]
    pub const fn invert(self) -> Self {
        match self {
            Self::Call => Self::Put,
            Self::Put => Self::Call,
        }
    }

    /// Check if this is a call.
    #[must_use]
    pub const fn is_call(self) -> bool {
        matches!(self, Self::Call)
    }

    /// Check if this is a put.
    #[must_use]
    pub const fn is_put(self) -> bool {
        matches!(self, Self::Put)
    }

    /// Single-letter OCC code ('C' or 'P').
    #[must_use]
    pub const fn occ_code(self) -> char {
        match self {
            Self::Call => 'C',
            Self::Put => 'P',
        }
    }
}

impl std::fmt::Display for OptionRight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_right_display() {
        assert_eq!(OptionRight::Call.to_string(), "CALL");
        assert_eq!(OptionRight::Put.to_string(), "PUT");
    }

    #[test]
    fn option_right_invert() {
        assert_eq!(OptionRight::Call.invert(), OptionRight::Put);
        assert_eq!(OptionRight::Put.invert(), OptionRight::Call);
        assert_eq!(OptionRight::Call.invert().invert(), OptionRight::Call);
    }

    #[test]
    fn option_right_predicates() {
        assert!(OptionRight::Call.is_call());
        assert!(!OptionRight::Call.is_put());
        assert!(OptionRight::Put.is_put());
        assert!(!OptionRight::Put.is_call());
    }

    #[test]
    fn option_right_occ_code() {
        assert_eq!(OptionRight::Call.occ_code(), 'C');
        assert_eq!(OptionRight::Put.occ_code(), 'P');
    }

    #[test]
    fn option_right_serde() {
        let json = serde_json::to_string(&OptionRight::Call).unwrap();
        assert_eq!(json, "\"CALL\"");

        let parsed: OptionRight = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, OptionRight::Call);
    }
}
