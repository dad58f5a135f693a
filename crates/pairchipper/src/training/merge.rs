//! # Merge Applier

use crate::{
    symbols::{FrequencyTable, SymbolPair},
    types::CountType,
};

/// Merge every non-overlapping occurrence of `pair` in `table`.
///
/// Each span is rewritten with [`crate::symbols::SymbolSpan::merged`];
/// spans which collapse to the same symbols have their counts summed.
/// The input table is not modified.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(table)))]
pub fn apply_merge<C: CountType>(
    table: &FrequencyTable<C>,
    pair: &SymbolPair,
) -> FrequencyTable<C> {
    let replacement = pair.0.concat(&pair.1);

    let mut merged = FrequencyTable::with_capacity(table.len());
    for (span, count) in table.iter() {
        merged.add(span.merged(pair, &replacement), count);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{Symbol, SymbolSpan};

    fn span(symbols: &[&str]) -> SymbolSpan {
        symbols.iter().copied().collect()
    }

    fn pair(
        a: &str,
        b: &str,
    ) -> SymbolPair {
        (Symbol::from(a), Symbol::from(b))
    }

    #[test]
    fn test_apply_merge() {
        let table: FrequencyTable<u64> = [
            (span(&["l", "o", "w"]), 5),
            (span(&["l", "o", "w", "e", "r"]), 2),
            (span(&["n", "e", "w"]), 6),
        ]
        .into_iter()
        .collect();

        let merged = apply_merge(&table, &pair("o", "w"));

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get(&span(&["l", "ow"])), 5);
        assert_eq!(merged.get(&span(&["l", "ow", "e", "r"])), 2);
        assert_eq!(merged.get(&span(&["n", "e", "w"])), 6);

        // The input is untouched.
        assert_eq!(table.get(&span(&["l", "o", "w"])), 5);
    }

    #[test]
    fn test_greedy_non_overlapping() {
        let table: FrequencyTable<u64> = [(span(&["a", "a", "a"]), 1)].into_iter().collect();

        let merged = apply_merge(&table, &pair("a", "a"));
        assert_eq!(merged.get(&span(&["aa", "a"])), 1);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_collapsing_spans_sum_counts() {
        let table: FrequencyTable<u64> = [
            (span(&["a", "b", "c"]), 3),
            (span(&["ab", "c"]), 4),
        ]
        .into_iter()
        .collect();

        let merged = apply_merge(&table, &pair("a", "b"));
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get(&span(&["ab", "c"])), 7);
        assert_eq!(merged.total_count(), table.total_count());
    }

    #[test]
    fn test_absent_pair_is_identity() {
        let table: FrequencyTable<u64> = [
            (span(&["x", "y"]), 3),
            (span(&["q"]), 4),
        ]
        .into_iter()
        .collect();

        assert_eq!(apply_merge(&table, &pair("y", "x")), table);
    }
}
