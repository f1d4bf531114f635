//! Binary Comparison Range Filtering
//!
//! Relational predicates applied to ordered index maps: given a pivot key,
//! [`BinaryComparison::filter`] returns the sub-map whose keys satisfy the
//! relation. Used by the strike and expiration slicing operations.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Bound;

/// A relational test between an ordered key and a pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryComparison {
    /// Key equals the pivot.
    Equal,
    /// Key differs from the pivot.
    NotEqual,
    /// Key is strictly below the pivot.
    LessThan,
    /// Key is at or below the pivot.
    LessThanOrEqual,
    /// Key is strictly above the pivot.
    GreaterThan,
    /// Key is at or above the pivot.
    GreaterThanOrEqual,
}

impl BinaryComparison {
    /// Evaluate the relation given `key.cmp(pivot)`.
    #[must_use]
    pub const fn evaluate(self, ordering: Ordering) -> bool {
        match self {
            Self::Equal => matches!(ordering, Ordering::Equal),
            Self::NotEqual => !matches!(ordering, Ordering::Equal),
            Self::LessThan => matches!(ordering, Ordering::Less),
            Self::LessThanOrEqual => !matches!(ordering, Ordering::Greater),
            Self::GreaterThan => matches!(ordering, Ordering::Greater),
            Self::GreaterThanOrEqual => !matches!(ordering, Ordering::Less),
        }
    }

    /// Return the sub-map whose keys satisfy the relation against `pivot`.
    ///
    /// Total over all pivots: a pivot outside the map's key range simply
    /// yields an empty (or full, for `NotEqual`) result.
    #[must_use]
    pub fn filter<K, V>(self, map: &BTreeMap<K, V>, pivot: &K) -> BTreeMap<K, V>
    where
        K: Ord + Clone,
        V: Clone,
    {
        match self {
            Self::Equal => map
                .get(pivot)
                .map(|value| BTreeMap::from([(pivot.clone(), value.clone())]))
                .unwrap_or_default(),
            Self::NotEqual => {
                let mut filtered = map.clone();
                filtered.remove(pivot);
                filtered
            }
            Self::LessThan => Self::collect(map, (Bound::Unbounded, Bound::Excluded(pivot))),
            Self::LessThanOrEqual => Self::collect(map, (Bound::Unbounded, Bound::Included(pivot))),
            Self::GreaterThan => Self::collect(map, (Bound::Excluded(pivot), Bound::Unbounded)),
            Self::GreaterThanOrEqual => {
                Self::collect(map, (Bound::Included(pivot), Bound::Unbounded))
            }
        }
    }

    fn collect<K, V>(map: &BTreeMap<K, V>, bounds: (Bound<&K>, Bound<&K>)) -> BTreeMap<K, V>
    where
        K: Ord + Clone,
        V: Clone,
    {
        map.range(bounds)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl std::fmt::Display for BinaryComparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        };
        write!(f, "{symbol}")
    }
}
