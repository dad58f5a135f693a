//! # `PairSpanIndex` Builder

use crate::{
    symbols::{Symbol, SymbolPair, SymbolSpan},
    types::{CountType, PCHashMap, PCHashSet, hash_map_with_capacity},
};

/// A map from [`SymbolPair`] to its occurrence count.
pub type PairCountMap<C> = PCHashMap<SymbolPair, C>;

/// A map from [`SymbolPair`] to indices over ``spans``.
pub type PairIndexMap = PCHashMap<SymbolPair, PCHashSet<usize>>;

/// An index of [`SymbolPair`] information relative to a ``&[SymbolSpan]``.
#[derive(Debug, Clone)]
pub struct PairSpanIndex<C: CountType> {
    /// A map from [`SymbolPair`] to its occurrence count.
    ///
    /// ``sum(spans[i].count(pair) * counts[i]) for all i``
    pub pair_counts: PairCountMap<C>,

    /// A map from [`SymbolPair`] to the indices of spans which may contain it.
    ///
    /// Entries are a superset; merged-away occurrences are not removed.
    pub pair_index: PairIndexMap,
}

impl<C: CountType> PairSpanIndex<C> {
    /// Build a [`PairSpanIndex`] from a slice of [`SymbolSpan`]s, using a count table.
    ///
    /// Zero-count spans are indexed, but add nothing to the pair counts.
    ///
    /// # Arguments
    /// * `spans` - a sequence of symbol spans.
    /// * `counts` - `counts[i]` is the count of `spans[i]`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(spans, counts)))]
    pub fn from_span_count_table(
        spans: &[SymbolSpan],
        counts: &[C],
    ) -> Self {
        let size_hint = spans.len() / 8;

        let mut index = PairSpanIndex {
            pair_counts: hash_map_with_capacity(size_hint),
            pair_index: hash_map_with_capacity(size_hint),
        };

        for (i, (span, &count)) in spans.iter().zip(counts).enumerate() {
            for p in span.pairs() {
                *index.pair_counts.entry(p.clone()).or_default() += count;
                index.pair_index.entry(p).or_default().insert(i);
            }
        }

        index
    }

    /// The current count of `pair`; zero if absent.
    pub fn count(
        &self,
        pair: &SymbolPair,
    ) -> C {
        self.pair_counts.get(pair).copied().unwrap_or_default()
    }

    /// Merge `pair -> replacement` in every indexed span which contains it.
    ///
    /// Pair counts are updated by the weighted deltas of each rewrite.
    ///
    /// ## Returns
    /// The pairs whose counts increased.
    pub fn merge_pair(
        &mut self,
        spans: &mut [SymbolSpan],
        counts: &[C],
        pair: &SymbolPair,
        replacement: &Symbol,
    ) -> PCHashSet<SymbolPair> {
        let mut increased: PCHashSet<SymbolPair> = Default::default();

        let Some(span_indices) = self.pair_index.remove(pair) else {
            return increased;
        };

        let pair_counts = &mut self.pair_counts;
        let pair_index = &mut self.pair_index;

        for i in span_indices {
            let count = counts[i];
            spans[i].merge_pair_cb(pair, replacement, &mut |p, delta| {
                if delta < 0 {
                    *pair_counts.entry(p).or_default() -= count;
                } else {
                    *pair_counts.entry(p.clone()).or_default() += count;
                    pair_index.entry(p.clone()).or_default().insert(i);
                    increased.insert(p);
                }
            });
        }

        increased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(
        a: &str,
        b: &str,
    ) -> SymbolPair {
        (Symbol::from(a), Symbol::from(b))
    }

    #[test]
    fn test_pair_index_u32() {
        test_pair_index::<u32>();
    }

    #[test]
    fn test_pair_index_usize() {
        test_pair_index::<usize>();
    }

    fn test_pair_index<C: CountType>() {
        let spans: Vec<SymbolSpan> = ["hello", "world", "help", "a"]
            .into_iter()
            .map(SymbolSpan::from_chars)
            .collect();

        let counts: Vec<C> = [1, 2, 3, 4]
            .into_iter()
            .map(|c| C::from_u32(c).unwrap())
            .collect();

        let PairSpanIndex {
            pair_counts,
            pair_index,
        } = PairSpanIndex::<C>::from_span_count_table(&spans, &counts);

        assert_eq!(
            pair_counts,
            [
                (("e", "l"), 4), // 1 h[el]lo, 3 h[el]p
                (("h", "e"), 4), // 1 [he]llo, 3 [he]lp
                (("l", "p"), 3), // 3 hel[lp]
                (("l", "d"), 2), // 2 wor[ld]
                (("o", "r"), 2), // 2 w[or]ld
                (("r", "l"), 2), // 2 wo[rl]d
                (("w", "o"), 2), // 2 [wo]rld
                (("l", "l"), 1), // 1 he[ll]o
                (("l", "o"), 1), // 1 hel[lo]
            ]
            .into_iter()
            .map(|((a, b), c)| (pair(a, b), C::from_u32(c).unwrap()))
            .collect::<PairCountMap<C>>()
        );

        assert_eq!(
            pair_index,
            [
                (("e", "l"), vec![0, 2]),
                (("h", "e"), vec![0, 2]),
                (("l", "d"), vec![1]),
                (("l", "l"), vec![0]),
                (("l", "o"), vec![0]),
                (("l", "p"), vec![2]),
                (("o", "r"), vec![1]),
                (("r", "l"), vec![1]),
                (("w", "o"), vec![1]),
            ]
            .into_iter()
            .map(|((a, b), s)| (pair(a, b), PCHashSet::from_iter(s)))
            .collect::<PairIndexMap>()
        );
    }

    #[test]
    fn test_merge_pair_updates_weighted_counts() {
        let mut spans: Vec<SymbolSpan> = ["low", "lower", "slow"]
            .into_iter()
            .map(SymbolSpan::from_chars)
            .collect();
        let counts: Vec<u64> = vec![5, 2, 3];

        let mut index = PairSpanIndex::from_span_count_table(&spans, &counts);
        assert_eq!(index.count(&pair("o", "w")), 10);
        assert_eq!(index.count(&pair("l", "o")), 10);

        let increased =
            index.merge_pair(&mut spans, &counts, &pair("o", "w"), &Symbol::from("ow"));

        assert_eq!(
            spans,
            vec![
                SymbolSpan::from_iter(["l", "ow"]),
                SymbolSpan::from_iter(["l", "ow", "e", "r"]),
                SymbolSpan::from_iter(["s", "l", "ow"]),
            ]
        );

        assert_eq!(index.count(&pair("o", "w")), 0);
        assert_eq!(index.count(&pair("l", "o")), 0);
        assert_eq!(index.count(&pair("w", "e")), 0);
        assert_eq!(index.count(&pair("l", "ow")), 10);
        assert_eq!(index.count(&pair("ow", "e")), 2);
        assert_eq!(index.count(&pair("s", "l")), 3);

        let mut increased: Vec<_> = increased.into_iter().collect();
        increased.sort();
        assert_eq!(increased, vec![pair("l", "ow"), pair("ow", "e")]);

        assert_eq!(
            index.pair_index.get(&pair("l", "ow")),
            Some(&PCHashSet::from_iter([0, 1, 2]))
        );
        assert!(!index.pair_index.contains_key(&pair("o", "w")));
    }

    #[test]
    fn test_merge_absent_pair() {
        let mut spans = vec![SymbolSpan::from_chars("ab")];
        let counts: Vec<u32> = vec![1];

        let mut index = PairSpanIndex::from_span_count_table(&spans, &counts);
        let increased =
            index.merge_pair(&mut spans, &counts, &pair("x", "y"), &Symbol::from("xy"));

        assert!(increased.is_empty());
        assert_eq!(spans, vec![SymbolSpan::from_chars("ab")]);
        assert_eq!(index.count(&pair("a", "b")), 1);
    }
}
