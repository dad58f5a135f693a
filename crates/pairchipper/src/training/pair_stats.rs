//! # Pair Statistics

use core::cmp::Ordering;

use crate::{
    errors::{PCResult, PairchipperError},
    symbols::{FrequencyTable, SymbolPair},
    types::{CountType, PCHashMap},
};

/// A map from [`SymbolPair`] to its aggregate, count-weighted frequency.
pub type PairStats<C> = PCHashMap<SymbolPair, C>;

/// Rank two ``(pair, count)`` entries; the greater entry is the better merge.
///
/// Entries rank by count; equal counts rank by the pair itself, so ties go
/// to the lexicographically greater pair (left symbol first, then right).
pub fn pair_rank<C: CountType>(
    a: (&SymbolPair, C),
    b: (&SymbolPair, C),
) -> Ordering {
    a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0))
}

/// Count every adjacent pair over `table`, weighted by span count.
///
/// Spans shorter than 2 symbols, and spans with a zero count, contribute
/// nothing.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(table)))]
pub fn compute_pair_stats<C: CountType>(table: &FrequencyTable<C>) -> PairStats<C> {
    let mut stats = PairStats::<C>::default();
    let zero = C::zero();

    for (span, count) in table.iter() {
        if count == zero || span.len() < 2 {
            continue;
        }
        for pair in span.pairs() {
            *stats.entry(pair).or_default() += count;
        }
    }

    stats
}

/// The best ``(pair, count)`` entry of `stats`, per [`pair_rank`].
pub fn best_pair_entry<C: CountType>(stats: &PairStats<C>) -> Option<(&SymbolPair, C)> {
    stats
        .iter()
        .map(|(pair, &count)| (pair, count))
        .max_by(|&a, &b| pair_rank(a, b))
}

/// Select the best pair to merge next.
///
/// This is a single linear scan; see [`pair_rank`] for the ordering.
///
/// ## Errors
/// [`PairchipperError::EmptyVocabulary`] if `stats` is empty.
pub fn select_best_pair<C: CountType>(stats: &PairStats<C>) -> PCResult<SymbolPair> {
    best_pair_entry(stats)
        .map(|(pair, _)| pair.clone())
        .ok_or(PairchipperError::EmptyVocabulary)
}

/// All entries of `stats`, best first.
pub fn ranked_pairs<C: CountType>(stats: &PairStats<C>) -> Vec<(SymbolPair, C)> {
    let mut entries: Vec<(SymbolPair, C)> = stats
        .iter()
        .map(|(pair, &count)| (pair.clone(), count))
        .collect();
    entries.sort_unstable_by(|a, b| pair_rank((&b.0, b.1), (&a.0, a.1)));
    entries
}
