//! # Frequency Table

use crate::{
    symbols::SymbolSpan,
    types::{CountType, PCHashMap, hash_map_with_capacity},
};

/// A map from [`SymbolSpan`] to its occurrence count.
///
/// Adding a span that is already present adds to its count;
/// counts are never overwritten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable<C: CountType = u64> {
    counts: PCHashMap<SymbolSpan, C>,
}

impl<C: CountType> FrequencyTable<C> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty table with room for `capacity` spans.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: hash_map_with_capacity(capacity),
        }
    }

    /// Add `count` occurrences of `span`.
    pub fn add(
        &mut self,
        span: SymbolSpan,
        count: C,
    ) {
        *self.counts.entry(span).or_default() += count;
    }

    /// The count of `span`; zero if absent.
    pub fn get(
        &self,
        span: &SymbolSpan,
    ) -> C {
        self.counts.get(span).copied().unwrap_or_default()
    }

    /// The number of distinct spans.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over ``(span, count)`` entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&SymbolSpan, C)> + '_ {
        self.counts.iter().map(|(span, &count)| (span, count))
    }

    /// The total token mass: the sum of all counts.
    pub fn total_count(&self) -> C {
        self.counts
            .values()
            .fold(C::zero(), |acc, &count| acc + count)
    }

    /// The length of the longest span; zero for an empty table.
    pub fn max_span_len(&self) -> usize {
        self.counts.keys().map(SymbolSpan::len).max().unwrap_or(0)
    }

    /// Fold another table into this one, summing counts of equal spans.
    pub fn absorb(
        &mut self,
        other: FrequencyTable<C>,
    ) {
        if self.counts.is_empty() {
            self.counts = other.counts;
            return;
        }
        self.counts.reserve(other.counts.len());
        for (span, count) in other.counts {
            self.add(span, count);
        }
    }

    /// All entries, sorted by count (descending), then span (ascending).
    pub fn to_sorted_vec(&self) -> Vec<(SymbolSpan, C)> {
        let mut entries: Vec<(SymbolSpan, C)> = self
            .counts
            .iter()
            .map(|(span, &count)| (span.clone(), count))
            .collect();
        entries.sort_by(|(sa, ca), (sb, cb)| cb.cmp(ca).then_with(|| sa.cmp(sb)));
        entries
    }
}

impl<C: CountType> FromIterator<(SymbolSpan, C)> for FrequencyTable<C> {
    fn from_iter<I: IntoIterator<Item = (SymbolSpan, C)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<C: CountType> Extend<(SymbolSpan, C)> for FrequencyTable<C> {
    fn extend<I: IntoIterator<Item = (SymbolSpan, C)>>(
        &mut self,
        iter: I,
    ) {
        for (span, count) in iter {
            self.add(span, count);
        }
    }
}

impl<C: CountType> IntoIterator for FrequencyTable<C> {
    type Item = (SymbolSpan, C);
    type IntoIter = <PCHashMap<SymbolSpan, C> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}
