//! Security Holding Value Object

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::symbol::Symbol;

/// A brokerage holding: an instrument plus a raw signed quantity.
///
/// Quantities are in the instrument's native unit (shares for the
/// underlying, contracts for options) and are converted to whole contract
/// lots when folded into a
/// [`PositionIndex`](crate::PositionIndex) via
/// [`create`](crate::PositionIndex::create).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityHolding {
    /// The held instrument.
    symbol: Symbol,
    /// Signed quantity (positive long, negative short).
    quantity: Decimal,
}

impl SecurityHolding {
    /// Create a new holding.
    #[must_use]
    pub const fn new(symbol: Symbol, quantity: Decimal) -> Self {
        Self { symbol, quantity }
    }

    /// Get the held instrument's symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Get the signed quantity.
    #[must_use]
    pub const fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Check if anything is actually held.
    #[must_use]
    pub fn exists(&self) -> bool {
        !self.quantity.is_zero()
    }
}
