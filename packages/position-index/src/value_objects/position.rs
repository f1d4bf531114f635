//! Position Value Object

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::right::OptionRight;
use super::symbol::Symbol;
use crate::errors::PositionIndexError;

/// A signed quantity of contract-equivalent lots held in one instrument.
///
/// Plain value semantics: negation and combination are pure functions that
/// return new values. Two positions for the same symbol occupy the same
/// "slot" when merged into a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// The held instrument.
    symbol: Symbol,
    /// Signed contract lots (positive long, negative short).
    quantity: i64,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(symbol: Symbol, quantity: i64) -> Self {
        Self { symbol, quantity }
    }

    /// Create a zero-quantity position for a symbol.
    #[must_use]
    pub const fn zero(symbol: Symbol) -> Self {
        Self::new(symbol, 0)
    }

    /// Get the instrument's symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Get the signed quantity in contract lots.
    #[must_use]
    pub const fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Check if the position is actually held (nonzero quantity).
    #[must_use]
    pub const fn exists(&self) -> bool {
        self.quantity != 0
    }

    /// Check if this position is the underlying itself.
    #[must_use]
    pub const fn is_underlying(&self) -> bool {
        !self.symbol.has_underlying()
    }

    /// Check if this is a long position.
    #[must_use]
    pub const fn is_long(&self) -> bool {
        self.quantity > 0
    }

    /// Check if this is a short position.
    #[must_use]
    pub const fn is_short(&self) -> bool {
        self.quantity < 0
    }

    /// Get the strike price, or `None` for the underlying.
    #[must_use]
    pub fn strike(&self) -> Option<Decimal> {
        self.symbol.strike()
    }

    /// Get the expiration date, or `None` for the underlying.
    #[must_use]
    pub fn expiration(&self) -> Option<NaiveDate> {
        self.symbol.expiration()
    }

    /// Get the option right, or `None` for the underlying.
    #[must_use]
    pub fn right(&self) -> Option<OptionRight> {
        self.symbol.right()
    }

    /// Return this position with the quantity negated.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self::new(self.symbol.clone(), -self.quantity)
    }

    /// Sum this position with another for the same symbol.
    ///
    /// Combining positions for different symbols is a programmer error;
    /// debug builds assert on it. Use [`checked_combine`](Self::checked_combine)
    /// when the symbols come from untrusted input.
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        debug_assert_eq!(
            self.symbol, other.symbol,
            "combined positions must share a symbol"
        );
        Self::new(self.symbol.clone(), self.quantity + other.quantity)
    }

    /// Sum this position with another, failing on mismatched symbols.
    ///
    /// # Errors
    ///
    /// Returns [`PositionIndexError::SymbolMismatch`] when the two positions
    /// reference different instruments.
    pub fn checked_combine(&self, other: &Self) -> Result<Self, PositionIndexError> {
        if self.symbol != other.symbol {
            return Err(PositionIndexError::SymbolMismatch {
                left: self.symbol.to_string(),
                right: other.symbol.to_string(),
            });
        }
        Ok(self.combine(other))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:+}", self.symbol, self.quantity)
    }
}
