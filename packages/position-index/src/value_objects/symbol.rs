//! Symbol value object for instrument identities.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::right::OptionRight;

/// Option contract terms embedded in a derivative symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
struct ContractSpec {
    /// Underlying ticker.
    underlying: String,
    /// Strike price.
    strike: Decimal,
    /// Expiration date.
    expiration: NaiveDate,
    /// Call or put.
    right: OptionRight,
}

/// An instrument identity: an underlying ticker, or an option contract
/// written on one.
///
/// The underlying itself carries no contract terms; a derivative carries its
/// underlying's ticker plus strike, expiration, and right. Symbols are cheap
/// to clone, hashable, and totally ordered so they can serve as map keys and
/// live in ordered index buckets.
///
/// Option symbols render in OCC convention, e.g. `XYZ240621C00100000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol {
    /// Canonical identifier (ticker, or OCC string for options).
    ticker: String,
    /// Contract terms; `None` for the underlying itself.
    contract: Option<ContractSpec>,
}

impl Symbol {
    /// Create an equity (underlying) symbol.
    ///
    /// The ticker is normalized to uppercase.
    #[must_use]
    pub fn equity(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into().to_uppercase(),
            contract: None,
        }
    }

    /// Create an option symbol on the given underlying.
    #[must_use]
    pub fn option(
        underlying: impl Into<String>,
        strike: Decimal,
        expiration: NaiveDate,
        right: OptionRight,
    ) -> Self {
        let underlying = underlying.into().to_uppercase();
        let ticker = Self::occ_ticker(&underlying, strike, expiration, right);
        Self {
            ticker,
            contract: Some(ContractSpec {
                underlying,
                strike,
                expiration,
                right,
            }),
        }
    }

    /// Create a call option symbol.
    #[must_use]
    pub fn call(underlying: impl Into<String>, strike: Decimal, expiration: NaiveDate) -> Self {
        Self::option(underlying, strike, expiration, OptionRight::Call)
    }

    /// Create a put option symbol.
    #[must_use]
    pub fn put(underlying: impl Into<String>, strike: Decimal, expiration: NaiveDate) -> Self {
        Self::option(underlying, strike, expiration, OptionRight::Put)
    }

    /// The empty sentinel symbol (no ticker, no contract).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            ticker: String::new(),
            contract: None,
        }
    }

    /// Check if this is the empty sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticker.is_empty()
    }

    /// Get the canonical identifier string.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Check if this symbol references an underlying (i.e., is a derivative).
    #[must_use]
    pub const fn has_underlying(&self) -> bool {
        self.contract.is_some()
    }

    /// Get the underlying's symbol, or `None` if this IS the underlying.
    #[must_use]
    pub fn underlying(&self) -> Option<Self> {
        self.contract.as_ref().map(|c| Self::equity(&c.underlying))
    }

    /// Get the strike price, or `None` for the underlying.
    #[must_use]
    pub fn strike(&self) -> Option<Decimal> {
        self.contract.as_ref().map(|c| c.strike)
    }

    /// Get the expiration date, or `None` for the underlying.
    #[must_use]
    pub fn expiration(&self) -> Option<NaiveDate> {
        self.contract.as_ref().map(|c| c.expiration)
    }

    /// Get the option right, or `None` for the underlying.
    #[must_use]
    pub fn right(&self) -> Option<OptionRight> {
        self.contract.as_ref().map(|c| c.right)
    }

    /// OCC-style identifier: `{ROOT}{YYMMDD}{C/P}{strike x 1000, 8 digits}`.
    fn occ_ticker(
        underlying: &str,
        strike: Decimal,
        expiration: NaiveDate,
        right: OptionRight,
    ) -> String {
        let thousandths = (strike * Decimal::from(1000))
            .trunc()
            .to_i64()
            .unwrap_or_default();
        format!(
            "{underlying}{}{}{thousandths:08}",
            expiration.format("%y%m%d"),
            right.occ_code()
        )
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ticker)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.ticker
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::equity(value)
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self::equity(value)
    }
}
