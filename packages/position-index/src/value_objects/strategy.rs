//! Strategy Match Value Objects

use serde::{Deserialize, Serialize};

use super::position::Position;

/// One leg of a matched multi-leg option combination.
///
/// Carries the position the matching engine wants deducted from the
/// collection, plus a descriptive role (e.g. "short put", "wing").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyLeg {
    /// The position to deduct.
    position: Position,
    /// Role of this leg within the matched strategy.
    role: String,
}

impl StrategyLeg {
    /// Create a new leg.
    #[must_use]
    pub fn new(position: Position, role: impl Into<String>) -> Self {
        Self {
            position,
            role: role.into(),
        }
    }

    /// Get the position to deduct.
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Get the leg's role within the strategy.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }
}

/// A matched option strategy: an ordered sequence of legs to deduct.
///
/// Each leg targets a distinct symbol additively, so the order in which
/// legs are applied never affects the resulting collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyMatch {
    /// Legs in match order.
    legs: Vec<StrategyLeg>,
}

impl StrategyMatch {
    /// Create a match from its legs.
    #[must_use]
    pub const fn new(legs: Vec<StrategyLeg>) -> Self {
        Self { legs }
    }

    /// Get the legs in match order.
    #[must_use]
    pub fn legs(&self) -> &[StrategyLeg] {
        &self.legs
    }

    /// Get the number of legs.
    #[must_use]
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Check if the match has no legs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}
