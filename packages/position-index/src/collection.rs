//! Position Index Collection
//!
//! The multi-indexed, immutable collection of option positions for one
//! underlying. The primary map from [`Symbol`] to [`Position`] is shadowed by
//! three secondary indices (right, strike, expiration) that every operation
//! keeps mutually consistent:
//!
//! - a stored position never has zero quantity;
//! - every stored derivative appears in exactly its own right, strike, and
//!   expiration buckets;
//! - the two right buckets always exist (structurally, as fields), while the
//!   strike and expiration indices never hold an empty bucket.
//!
//! All operations take `&self` and return a fresh [`PositionIndex`]; prior
//! snapshots are never touched and may be shared freely.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::{BTreeMap, BTreeSet, btree_map};

use crate::comparison::BinaryComparison;
use crate::errors::PositionIndexError;
use crate::value_objects::{OptionRight, Position, SecurityHolding, StrategyMatch, Symbol};

/// An immutable collection of option positions with right, strike, and
/// expiration indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionIndex {
    /// Primary map: instrument identity to held position.
    positions: BTreeMap<Symbol, Position>,
    /// Symbols of held calls.
    calls: BTreeSet<Symbol>,
    /// Symbols of held puts.
    puts: BTreeSet<Symbol>,
    /// Held derivative symbols bucketed by strike, ascending.
    by_strike: BTreeMap<Decimal, BTreeSet<Symbol>>,
    /// Held derivative symbols bucketed by expiration, ascending.
    by_expiration: BTreeMap<NaiveDate, BTreeSet<Symbol>>,
    /// The at-most-one position whose symbol is the underlying itself.
    underlying: Option<Position>,
}

impl PositionIndex {
    /// The canonical zero-position collection.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Internal checked constructor: derives the underlying and, in debug
    /// builds, asserts the index invariants.
    fn from_parts(
        positions: BTreeMap<Symbol, Position>,
        calls: BTreeSet<Symbol>,
        puts: BTreeSet<Symbol>,
        by_strike: BTreeMap<Decimal, BTreeSet<Symbol>>,
        by_expiration: BTreeMap<NaiveDate, BTreeSet<Symbol>>,
    ) -> Self {
        let underlying = positions
            .values()
            .find(|position| position.is_underlying())
            .cloned();
        let index = Self {
            positions,
            calls,
            puts,
            by_strike,
            by_expiration,
            underlying,
        };
        #[cfg(debug_assertions)]
        {
            let violations: Vec<String> = index.validate().collect();
            debug_assert!(
                violations.is_empty(),
                "position index invariants violated: {}",
                violations.join("; ")
            );
        }
        index
    }

    /// Build a collection from brokerage holdings.
    ///
    /// Holdings outside the requested underlying's family are skipped. The
    /// underlying's raw share quantity converts to whole contract-equivalent
    /// lots by truncating division by `contract_multiplier`; derivative
    /// quantities truncate to whole contracts.
    #[must_use]
    pub fn create(
        underlying: &Symbol,
        contract_multiplier: Decimal,
        holdings: impl IntoIterator<Item = SecurityHolding>,
    ) -> Self {
        let mut positions = Vec::new();
        for holding in holdings {
            let symbol = holding.symbol();
            if symbol.has_underlying() {
                if symbol.underlying().is_some_and(|root| &root == underlying) {
                    let lots = holding.quantity().trunc().to_i64().unwrap_or_default();
                    positions.push(Position::new(symbol.clone(), lots));
                }
            } else if symbol == underlying {
                let lots = holding
                    .quantity()
                    .checked_div(contract_multiplier)
                    .unwrap_or_default()
                    .trunc()
                    .to_i64()
                    .unwrap_or_default();
                positions.push(Position::new(symbol.clone(), lots));
            }
        }
        let index = Self::empty().add_range(positions);
        tracing::debug!(
            underlying = %underlying,
            count = index.count(),
            "created position index from holdings"
        );
        index
    }

    // ------------------------------------------------------------------
    // Incremental update
    // ------------------------------------------------------------------

    /// Merge one position into the collection, returning the new collection.
    ///
    /// An incoming position for an already-held symbol (or for the
    /// underlying) sums quantities; a sum of zero removes the symbol from
    /// the primary map and from its strike and expiration buckets. A new
    /// derivative symbol is inserted into the primary map and all three
    /// indices.
    #[must_use]
    pub fn add(&self, position: Position) -> Self {
        self.add_range(std::iter::once(position))
    }

    /// Fold a sequence of positions into the collection.
    ///
    /// Batches the map and bucket updates before constructing the single
    /// result; the final state is identical to applying [`add`](Self::add)
    /// sequentially.
    #[must_use]
    pub fn add_range(&self, positions: impl IntoIterator<Item = Position>) -> Self {
        let mut primary = self.positions.clone();
        let mut calls = self.calls.clone();
        let mut puts = self.puts.clone();
        let mut by_strike = self.by_strike.clone();
        let mut by_expiration = self.by_expiration.clone();

        for position in positions {
            let symbol = position.symbol().clone();
            let existing_quantity = primary.get(&symbol).map(Position::quantity);
            if existing_quantity.is_some() || position.is_underlying() {
                let merged = existing_quantity.unwrap_or(0) + position.quantity();
                if merged == 0 {
                    primary.remove(&symbol);
                    if !position.is_underlying() {
                        if let Some(strike) = symbol.strike() {
                            Self::remove_bucket_member(&mut by_strike, &strike, &symbol);
                        }
                        if let Some(expiration) = symbol.expiration() {
                            Self::remove_bucket_member(&mut by_expiration, &expiration, &symbol);
                        }
                        // The right buckets persist; only the member leaves.
                        match symbol.right() {
                            Some(OptionRight::Call) => {
                                calls.remove(&symbol);
                            }
                            Some(OptionRight::Put) => {
                                puts.remove(&symbol);
                            }
                            None => {}
                        }
                    }
                } else {
                    primary.insert(symbol.clone(), Position::new(symbol, merged));
                }
            } else if position.exists() {
                match symbol.right() {
                    Some(OptionRight::Call) => {
                        calls.insert(symbol.clone());
                    }
                    Some(OptionRight::Put) => {
                        puts.insert(symbol.clone());
                    }
                    None => {}
                }
                if let Some(strike) = symbol.strike() {
                    by_strike.entry(strike).or_default().insert(symbol.clone());
                }
                if let Some(expiration) = symbol.expiration() {
                    by_expiration
                        .entry(expiration)
                        .or_default()
                        .insert(symbol.clone());
                }
                primary.insert(symbol, position);
            }
        }

        Self::from_parts(primary, calls, puts, by_strike, by_expiration)
    }

    /// Deduct one position: [`add`](Self::add) of its negation.
    ///
    /// The underlying is deducted the same way as any derivative.
    #[must_use]
    pub fn subtract(&self, position: Position) -> Self {
        self.add(position.negate())
    }

    /// Deduct every leg of a matched strategy in sequence.
    ///
    /// Each leg targets a distinct symbol additively, so leg order never
    /// affects the result.
    #[must_use]
    pub fn accept(&self, matched: &StrategyMatch) -> Self {
        tracing::trace!(legs = matched.leg_count(), "deducting matched strategy");
        self.add_range(matched.legs().iter().map(|leg| leg.position().negate()))
    }

    fn remove_bucket_member<K: Ord>(
        index: &mut BTreeMap<K, BTreeSet<Symbol>>,
        key: &K,
        symbol: &Symbol,
    ) {
        if let Some(bucket) = index.get_mut(key) {
            bucket.remove(symbol);
            if bucket.is_empty() {
                index.remove(key);
            }
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Number of held positions, the underlying included.
    #[must_use]
    pub fn count(&self) -> usize {
        self.positions.len()
    }

    /// Check if nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check if the underlying itself is held.
    #[must_use]
    pub const fn has_underlying(&self) -> bool {
        self.underlying.is_some()
    }

    /// The held underlying position, if any.
    #[must_use]
    pub const fn underlying(&self) -> Option<&Position> {
        self.underlying.as_ref()
    }

    /// The underlying position, tolerant of absence.
    ///
    /// When the underlying is not held, returns a zero-quantity position for
    /// the underlying symbol implied by the held derivatives, or for
    /// [`Symbol::empty`] when the collection is entirely empty.
    #[must_use]
    pub fn underlying_position(&self) -> Position {
        if let Some(position) = &self.underlying {
            return position.clone();
        }
        let symbol = self
            .positions
            .keys()
            .next()
            .and_then(Symbol::underlying)
            .unwrap_or_else(Symbol::empty);
        Position::zero(symbol)
    }

    /// Check if a nonzero position exists for `symbol`.
    #[must_use]
    pub fn has_position(&self, symbol: &Symbol) -> bool {
        self.positions.contains_key(symbol)
    }

    /// Look up the position for `symbol`.
    #[must_use]
    pub fn try_get_position(&self, symbol: &Symbol) -> Option<&Position> {
        self.positions.get(symbol)
    }

    /// Number of distinct call contracts held.
    #[must_use]
    pub fn unique_calls(&self) -> usize {
        self.calls.len()
    }

    /// Number of distinct put contracts held.
    #[must_use]
    pub fn unique_puts(&self) -> usize {
        self.puts.len()
    }

    /// Number of distinct expirations across held derivatives.
    #[must_use]
    pub fn unique_expirations(&self) -> usize {
        self.by_expiration.len()
    }

    /// Distinct strikes across held derivatives, ascending.
    pub fn strikes(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.by_strike.keys().copied()
    }

    /// Distinct expirations across held derivatives, ascending.
    pub fn expirations(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_expiration.keys().copied()
    }

    /// Positions found for the given identities, in input order.
    ///
    /// Identities with no entry are silently skipped.
    pub fn for_symbols<'a, I>(&'a self, symbols: I) -> impl Iterator<Item = &'a Position>
    where
        I: IntoIterator<Item = Symbol>,
        I::IntoIter: 'a,
    {
        symbols
            .into_iter()
            .filter_map(move |symbol| self.positions.get(&symbol))
    }

    /// Positions held at the given strike; empty if the strike is absent.
    pub fn for_strike(&self, strike: Decimal) -> impl Iterator<Item = &Position> {
        self.by_strike
            .get(&strike)
            .into_iter()
            .flatten()
            .filter_map(move |symbol| self.positions.get(symbol))
    }

    /// Positions expiring on the given date; empty if the date is absent.
    pub fn for_expiration(&self, expiration: NaiveDate) -> impl Iterator<Item = &Position> {
        self.by_expiration
            .get(&expiration)
            .into_iter()
            .flatten()
            .filter_map(move |symbol| self.positions.get(symbol))
    }

    /// Iterate over all held positions.
    pub fn iter(&self) -> btree_map::Values<'_, Symbol, Position> {
        self.positions.values()
    }

    // ------------------------------------------------------------------
    // Slicing
    // ------------------------------------------------------------------

    /// Retain only positions of the requested right, dropping the opposite
    /// right's bucket, optionally keeping the underlying.
    #[must_use]
    pub fn slice_right(&self, right: OptionRight, include_underlying: bool) -> Self {
        let kept = match right {
            OptionRight::Call => &self.calls,
            OptionRight::Put => &self.puts,
        };

        let mut positions = BTreeMap::new();
        if include_underlying {
            if let Some(position) = &self.underlying {
                positions.insert(position.symbol().clone(), position.clone());
            }
        }
        let mut by_strike: BTreeMap<Decimal, BTreeSet<Symbol>> = BTreeMap::new();
        let mut by_expiration: BTreeMap<NaiveDate, BTreeSet<Symbol>> = BTreeMap::new();
        for symbol in kept {
            if let Some(position) = self.positions.get(symbol) {
                positions.insert(symbol.clone(), position.clone());
            }
            if let Some(strike) = symbol.strike() {
                by_strike.entry(strike).or_default().insert(symbol.clone());
            }
            if let Some(expiration) = symbol.expiration() {
                by_expiration
                    .entry(expiration)
                    .or_default()
                    .insert(symbol.clone());
            }
        }

        let (calls, puts) = match right {
            OptionRight::Call => (kept.clone(), BTreeSet::new()),
            OptionRight::Put => (BTreeSet::new(), kept.clone()),
        };
        Self::from_parts(positions, calls, puts, by_strike, by_expiration)
    }

    /// Retain only positions whose strike satisfies `comparison` against the
    /// pivot, optionally keeping the underlying.
    ///
    /// An empty surviving range degrades to [`empty`](Self::empty) (plus the
    /// underlying when requested).
    #[must_use]
    pub fn slice_strike(
        &self,
        comparison: BinaryComparison,
        strike: Decimal,
        include_underlying: bool,
    ) -> Self {
        let filtered = comparison.filter(&self.by_strike, &strike);
        if filtered.is_empty() {
            return self.sliced_empty(include_underlying);
        }

        let mut positions = BTreeMap::new();
        if include_underlying {
            if let Some(position) = &self.underlying {
                positions.insert(position.symbol().clone(), position.clone());
            }
        }
        let mut calls = BTreeSet::new();
        let mut puts = BTreeSet::new();
        let mut by_expiration: BTreeMap<NaiveDate, BTreeSet<Symbol>> = BTreeMap::new();
        for symbol in filtered.values().flatten() {
            if let Some(position) = self.positions.get(symbol) {
                positions.insert(symbol.clone(), position.clone());
            }
            match symbol.right() {
                Some(OptionRight::Call) => {
                    calls.insert(symbol.clone());
                }
                Some(OptionRight::Put) => {
                    puts.insert(symbol.clone());
                }
                None => {}
            }
            if let Some(expiration) = symbol.expiration() {
                by_expiration
                    .entry(expiration)
                    .or_default()
                    .insert(symbol.clone());
            }
        }

        Self::from_parts(positions, calls, puts, filtered, by_expiration)
    }

    /// Retain only positions whose expiration satisfies `comparison` against
    /// the pivot, optionally keeping the underlying.
    #[must_use]
    pub fn slice_expiration(
        &self,
        comparison: BinaryComparison,
        expiration: NaiveDate,
        include_underlying: bool,
    ) -> Self {
        let filtered = comparison.filter(&self.by_expiration, &expiration);
        if filtered.is_empty() {
            return self.sliced_empty(include_underlying);
        }

        let mut positions = BTreeMap::new();
        if include_underlying {
            if let Some(position) = &self.underlying {
                positions.insert(position.symbol().clone(), position.clone());
            }
        }
        let mut calls = BTreeSet::new();
        let mut puts = BTreeSet::new();
        let mut by_strike: BTreeMap<Decimal, BTreeSet<Symbol>> = BTreeMap::new();
        for symbol in filtered.values().flatten() {
            if let Some(position) = self.positions.get(symbol) {
                positions.insert(symbol.clone(), position.clone());
            }
            match symbol.right() {
                Some(OptionRight::Call) => {
                    calls.insert(symbol.clone());
                }
                Some(OptionRight::Put) => {
                    puts.insert(symbol.clone());
                }
                None => {}
            }
            if let Some(strike) = symbol.strike() {
                by_strike.entry(strike).or_default().insert(symbol.clone());
            }
        }

        Self::from_parts(positions, calls, puts, by_strike, filtered)
    }

    /// Empty slice result, with the underlying carried over when requested.
    fn sliced_empty(&self, include_underlying: bool) -> Self {
        match (&self.underlying, include_underlying) {
            (Some(position), true) => Self::empty().add(position.clone()),
            _ => Self::empty(),
        }
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Lazily describe every violated index invariant.
    ///
    /// An empty sequence means all invariants hold. Exposed for tests and
    /// used by the debug-build constructor assertion; normal control flow
    /// never consults it.
    pub fn validate(&self) -> impl Iterator<Item = String> + '_ {
        let zero_quantity = self
            .positions
            .values()
            .filter(|position| !position.exists())
            .map(|position| format!("{}: stored position has zero quantity", position.symbol()));

        let missing_strike = self
            .positions
            .values()
            .filter(|position| !position.is_underlying())
            .filter_map(move |position| {
                let strike = position.strike()?;
                let indexed = self
                    .by_strike
                    .get(&strike)
                    .is_some_and(|bucket| bucket.contains(position.symbol()));
                (!indexed)
                    .then(|| format!("{}: missing from strike bucket {strike}", position.symbol()))
            });

        let missing_expiration = self
            .positions
            .values()
            .filter(|position| !position.is_underlying())
            .filter_map(move |position| {
                let expiration = position.expiration()?;
                let indexed = self
                    .by_expiration
                    .get(&expiration)
                    .is_some_and(|bucket| bucket.contains(position.symbol()));
                (!indexed).then(|| {
                    format!(
                        "{}: missing from expiration bucket {expiration}",
                        position.symbol()
                    )
                })
            });

        zero_quantity.chain(missing_strike).chain(missing_expiration)
    }

    /// Aggregate [`validate`](Self::validate) into a `Result` for tests.
    ///
    /// # Errors
    ///
    /// Returns [`PositionIndexError::InvariantViolation`] carrying every
    /// violation description when any invariant is broken.
    pub fn check(&self) -> Result<(), PositionIndexError> {
        let violations: Vec<String> = self.validate().collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(PositionIndexError::InvariantViolation { violations })
        }
    }
}

impl<'a> IntoIterator for &'a PositionIndex {
    type Item = &'a Position;
    type IntoIter = btree_map::Values<'a, Symbol, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn june_expiration() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()
    }

    fn call(strike: i64) -> Symbol {
        Symbol::call("XYZ", Decimal::from(strike), june_expiration())
    }

    fn put(strike: i64) -> Symbol {
        Symbol::put("XYZ", Decimal::from(strike), june_expiration())
    }

    #[test]
    fn empty_has_nothing() {
        let index = PositionIndex::empty();
        assert!(index.is_empty());
        assert_eq!(index.count(), 0);
        assert!(!index.has_underlying());
        assert_eq!(index.unique_calls(), 0);
        assert_eq!(index.unique_puts(), 0);
        assert_eq!(index.unique_expirations(), 0);
        assert!(index.check().is_ok());
    }

    #[test]
    fn add_new_derivative_updates_all_indices() {
        let index = PositionIndex::empty().add(Position::new(call(100), 1));

        assert_eq!(index.count(), 1);
        assert_eq!(index.unique_calls(), 1);
        assert_eq!(index.unique_puts(), 0);
        assert_eq!(index.unique_expirations(), 1);
        assert_eq!(index.strikes().collect::<Vec<_>>(), vec![dec!(100)]);
        assert!(index.has_position(&call(100)));
        assert!(index.check().is_ok());
    }

    #[test]
    fn add_merges_quantities_for_same_symbol() {
        let index = PositionIndex::empty()
            .add(Position::new(call(100), 1))
            .add(Position::new(call(100), 2));

        assert_eq!(index.count(), 1);
        assert_eq!(index.try_get_position(&call(100)).unwrap().quantity(), 3);
        assert_eq!(index.unique_calls(), 1);
    }

    #[test]
    fn merge_to_zero_removes_symbol_and_range_buckets() {
        let index = PositionIndex::empty()
            .add(Position::new(call(100), 1))
            .add(Position::new(put(95), -1));

        let drained = index.add(Position::new(call(100), -1));
        assert_eq!(drained.count(), 1);
        assert!(!drained.has_position(&call(100)));
        assert_eq!(drained.unique_calls(), 0);
        assert_eq!(drained.unique_puts(), 1);
        // The call's strike bucket is gone; the put's survives.
        assert_eq!(drained.strikes().collect::<Vec<_>>(), vec![dec!(95)]);
        assert_eq!(drained.unique_expirations(), 1);
        assert!(drained.check().is_ok());
    }

    #[test]
    fn add_underlying_is_never_bucketed() {
        let index = PositionIndex::empty().add(Position::new(Symbol::equity("XYZ"), 5));

        assert_eq!(index.count(), 1);
        assert!(index.has_underlying());
        assert_eq!(index.unique_calls(), 0);
        assert_eq!(index.strikes().count(), 0);
        assert_eq!(index.expirations().count(), 0);
    }

    #[test]
    fn add_zero_quantity_new_symbol_is_a_no_op() {
        let index = PositionIndex::empty().add(Position::new(call(100), 0));
        assert!(index.is_empty());

        let index = PositionIndex::empty().add(Position::zero(Symbol::equity("XYZ")));
        assert!(index.is_empty());
    }

    #[test]
    fn subtract_underlying_like_any_position() {
        let index = PositionIndex::empty()
            .add(Position::new(Symbol::equity("XYZ"), 5))
            .subtract(Position::new(Symbol::equity("XYZ"), 5));
        assert!(index.is_empty());
        assert!(!index.has_underlying());
    }

    #[test]
    fn add_range_matches_sequential_adds() {
        let positions = vec![
            Position::new(Symbol::equity("XYZ"), 1),
            Position::new(call(100), 2),
            Position::new(put(95), -1),
            Position::new(call(100), -2),
        ];

        let batched = PositionIndex::empty().add_range(positions.clone());
        let sequential = positions
            .into_iter()
            .fold(PositionIndex::empty(), |acc, position| acc.add(position));

        assert_eq!(batched, sequential);
        assert_eq!(batched.count(), 2);
        assert!(!batched.has_position(&call(100)));
    }

    #[test]
    fn create_filters_to_the_requested_family() {
        let underlying = Symbol::equity("XYZ");
        let holdings = vec![
            SecurityHolding::new(underlying.clone(), dec!(100)),
            SecurityHolding::new(call(100), dec!(1)),
            SecurityHolding::new(Symbol::equity("ABC"), dec!(500)),
            SecurityHolding::new(
                Symbol::call("ABC", dec!(50), june_expiration()),
                dec!(2),
            ),
        ];

        let index = PositionIndex::create(&underlying, dec!(100), holdings);
        assert_eq!(index.count(), 2);
        assert_eq!(index.underlying_position().quantity(), 1);
        assert!(index.has_position(&call(100)));
        assert!(!index.has_position(&Symbol::equity("ABC")));
    }

    #[test]
    fn create_truncates_partial_lots() {
        let underlying = Symbol::equity("XYZ");
        let holdings = vec![SecurityHolding::new(underlying.clone(), dec!(150))];
        let index = PositionIndex::create(&underlying, dec!(100), holdings);
        assert_eq!(index.underlying_position().quantity(), 1);

        // Under one full lot truncates to zero and is not stored.
        let holdings = vec![SecurityHolding::new(underlying.clone(), dec!(50))];
        let index = PositionIndex::create(&underlying, dec!(100), holdings);
        assert!(index.is_empty());
    }

    #[test]
    fn underlying_position_is_total() {
        // Entirely empty: empty sentinel symbol.
        let empty = PositionIndex::empty();
        let position = empty.underlying_position();
        assert!(position.symbol().is_empty());
        assert!(!position.exists());

        // Derivatives only: zero quantity for the implied underlying.
        let index = PositionIndex::empty().add(Position::new(call(100), 1));
        let position = index.underlying_position();
        assert_eq!(position.symbol(), &Symbol::equity("XYZ"));
        assert!(!position.exists());
    }

    #[test]
    fn for_symbols_skips_absent_entries() {
        let index = PositionIndex::empty()
            .add(Position::new(call(100), 1))
            .add(Position::new(put(95), -1));

        let found: Vec<_> = index
            .for_symbols(vec![put(95), call(105), call(100)])
            .collect();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].symbol(), &put(95));
        assert_eq!(found[1].symbol(), &call(100));
    }

    #[test]
    fn for_strike_and_for_expiration() {
        let index = PositionIndex::empty()
            .add(Position::new(call(100), 1))
            .add(Position::new(put(100), -1))
            .add(Position::new(put(95), -1));

        assert_eq!(index.for_strike(dec!(100)).count(), 2);
        assert_eq!(index.for_strike(dec!(90)).count(), 0);
        assert_eq!(index.for_expiration(june_expiration()).count(), 3);
        assert_eq!(
            index
                .for_expiration(NaiveDate::from_ymd_opt(2024, 7, 19).unwrap())
                .count(),
            0
        );
    }

    #[test]
    fn iteration_yields_primary_map_positions() {
        let index = PositionIndex::empty()
            .add(Position::new(Symbol::equity("XYZ"), 1))
            .add(Position::new(call(100), 1));

        let symbols: Vec<_> = (&index).into_iter().map(Position::symbol).collect();
        assert_eq!(symbols.len(), 2);
        assert_eq!(index.iter().count(), 2);
    }

    #[test]
    fn validate_reports_broken_indices() {
        // Assemble a deliberately inconsistent index directly.
        let symbol = call(100);
        let index = PositionIndex {
            positions: BTreeMap::from([
                (symbol.clone(), Position::new(symbol.clone(), 1)),
                (put(95), Position::zero(put(95))),
            ]),
            calls: BTreeSet::from([symbol]),
            puts: BTreeSet::new(),
            by_strike: BTreeMap::new(),
            by_expiration: BTreeMap::new(),
            underlying: None,
        };

        let violations: Vec<String> = index.validate().collect();
        assert_eq!(violations.len(), 5);
        assert!(violations.iter().any(|v| v.contains("zero quantity")));
        assert!(violations.iter().any(|v| v.contains("strike bucket")));
        assert!(violations.iter().any(|v| v.contains("expiration bucket")));

        let err = index.check().unwrap_err();
        assert!(matches!(
            err,
            PositionIndexError::InvariantViolation { .. }
        ));
    }
}
