// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::items_after_statements
    )
)]

//! Position Index - Immutable Multi-Indexed Option Position Collection
//!
//! Models one underlying instrument plus its option contracts as a single
//! immutable collection with secondary indices by right, strike, and
//! expiration. Every mutation (`add`, `add_range`, `subtract`, the `slice_*`
//! family, `accept`) returns a brand-new [`PositionIndex`]; a returned
//! instance never changes, so snapshots can be shared freely.
//!
//! # Layout
//!
//! - `value_objects`: instrument identity ([`Symbol`]), holdings
//!   ([`SecurityHolding`]), signed positions ([`Position`]), and matched
//!   strategy legs ([`StrategyMatch`])
//! - `comparison`: relational range filtering over ordered indices
//!   ([`BinaryComparison`])
//! - `collection`: the core [`PositionIndex`]
//!
//! # Example
//!
//! ```
//! use position_index::{Position, PositionIndex, Symbol};
//! use rust_decimal::Decimal;
//! use chrono::NaiveDate;
//!
//! let expiration = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
//! let call = Symbol::call("XYZ", Decimal::from(100), expiration);
//!
//! let index = PositionIndex::empty().add(Position::new(call.clone(), 1));
//! assert_eq!(index.count(), 1);
//! assert_eq!(index.unique_calls(), 1);
//!
//! // The receiver is untouched by further updates.
//! let drained = index.subtract(Position::new(call.clone(), 1));
//! assert!(drained.is_empty());
//! assert!(index.has_position(&call));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Core collection - the multi-indexed position map.
pub mod collection;

/// Relational comparisons for range slicing.
pub mod comparison;

/// Error types.
pub mod errors;

/// Value objects - identities, holdings, positions, strategy legs.
pub mod value_objects;

pub use collection::PositionIndex;
pub use comparison::BinaryComparison;
pub use errors::PositionIndexError;
pub use value_objects::{
    OptionRight, Position, SecurityHolding, StrategyLeg, StrategyMatch, Symbol,
};
