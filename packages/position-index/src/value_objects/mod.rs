//! Value Objects
//!
//! Immutable domain values consumed and produced by the position index:
//! instrument identities, brokerage holdings, signed positions, and matched
//! strategy legs.

pub mod holding;
pub mod position;
pub mod right;
pub mod strategy;
pub mod symbol;

pub use holding::SecurityHolding;
pub use position::Position;
pub use right::OptionRight;
pub use strategy::{StrategyLeg, StrategyMatch};
pub use symbol::Symbol;
