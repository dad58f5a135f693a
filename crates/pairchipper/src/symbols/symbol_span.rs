//! # Symbol Span

use crate::symbols::{Symbol, SymbolAlphabet, SymbolPair};

/// A sequence of symbols (one pre-token, or "word").
///
/// Produced by the pretokenizer; merges produce new spans.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolSpan {
    symbols: Vec<Symbol>,
}

impl<S: Into<Symbol>> FromIterator<S> for SymbolSpan {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_symbols(iter.into_iter().map(Into::into).collect())
    }
}

impl SymbolSpan {
    const DEC: i32 = -1;
    const INC: i32 = 1;

    /// Create a new span from symbols.
    pub fn from_symbols(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// Split text into one symbol per character.
    pub fn from_chars<S: AsRef<str>>(text: S) -> Self {
        text.as_ref().chars().map(Symbol::from_char).collect()
    }

    /// Split bytes into one symbol per byte.
    pub fn from_bytes<B: AsRef<[u8]>>(bytes: B) -> Self {
        bytes.as_ref().iter().map(|&b| Symbol::from_byte(b)).collect()
    }

    /// Split a pre-token into its initial symbols under `alphabet`.
    pub fn from_word(
        word: &str,
        alphabet: SymbolAlphabet,
    ) -> Self {
        match alphabet {
            SymbolAlphabet::Char => Self::from_chars(word),
            SymbolAlphabet::Byte => Self::from_bytes(word),
        }
    }

    /// View the symbols as a slice.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Get the length of the span, in symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Is this span empty?
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Get an iterator over the adjacent [`SymbolPair`] windows of this span.
    pub fn pairs(&self) -> impl Iterator<Item = SymbolPair> + '_ {
        self.symbols
            .windows(2)
            .map(|w| (w[0].clone(), w[1].clone()))
    }

    /// The concatenated content of all symbols.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.symbols
            .iter()
            .flat_map(|s| s.as_bytes().iter().copied())
            .collect()
    }

    /// Does `pair` occur at any adjacent position?
    pub fn contains_pair(
        &self,
        pair: &SymbolPair,
    ) -> bool {
        self.symbols
            .windows(2)
            .any(|w| w[0] == pair.0 && w[1] == pair.1)
    }

    /// Return a new span with all non-overlapping occurrences of
    /// `pair` replaced by `replacement`.
    ///
    /// This is a single greedy left-to-right pass:
    /// ``[A, A, A]`` merged on ``(A, A)`` is ``[AA, A]``.
    pub fn merged(
        &self,
        pair: &SymbolPair,
        replacement: &Symbol,
    ) -> SymbolSpan {
        let n = self.symbols.len();
        let mut symbols: Vec<Symbol> = Vec::with_capacity(n);

        let mut i = 0;
        while i < n {
            let current = &self.symbols[i];
            if i + 1 < n && *current == pair.0 && self.symbols[i + 1] == pair.1 {
                symbols.push(replacement.clone());
                i += 2;
            } else {
                symbols.push(current.clone());
                i += 1;
            }
        }

        SymbolSpan { symbols }
    }

    /// Merge all non-overlapping occurrences of `pair -> replacement` in place.
    ///
    /// Produces the same symbols as [`Self::merged`].
    ///
    /// # Arguments
    /// * `pair` - the pair to merge.
    /// * `replacement` - the symbol to replace `pair` with.
    /// * `on_merge` - a callback invoked for each incremental pair delta:
    ///   `+1` for an added adjacent pair, `-1` for a removed one.
    pub fn merge_pair_cb<F>(
        &mut self,
        pair: &SymbolPair,
        replacement: &Symbol,
        on_merge: &mut F,
    ) where
        F: FnMut(SymbolPair, i32),
    {
        let (a, b) = pair;
        let n = self.symbols.len();

        if n < 2 {
            return;
        }

        let mut new_symbols: Vec<Symbol> = Vec::with_capacity(n);

        let mut i = 0;
        while i < n {
            let current = &self.symbols[i];

            if i + 1 < n && current == a && &self.symbols[i + 1] == b {
                // Previous pair.
                if let Some(x) = new_symbols.last() {
                    on_merge((x.clone(), a.clone()), Self::DEC);
                    on_merge((x.clone(), replacement.clone()), Self::INC);
                }

                on_merge(pair.clone(), Self::DEC);

                // Next pair.
                if i + 2 < n {
                    let y = &self.symbols[i + 2];
                    on_merge((b.clone(), y.clone()), Self::DEC);
                    on_merge((replacement.clone(), y.clone()), Self::INC);
                }

                new_symbols.push(replacement.clone());
                i += 2;
            } else {
                new_symbols.push(current.clone());
                i += 1;
            }
        }

        self.symbols = new_symbols;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(symbols: &[&str]) -> SymbolSpan {
        symbols.iter().copied().collect()
    }

    fn pair(
        a: &str,
        b: &str,
    ) -> SymbolPair {
        (a.into(), b.into())
    }

    #[test]
    fn test_from_word() {
        assert_eq!(
            SymbolSpan::from_word("low", SymbolAlphabet::Char),
            span(&["l", "o", "w"])
        );

        let snowman = SymbolSpan::from_word("☃!", SymbolAlphabet::Char);
        assert_eq!(snowman.len(), 2);
        assert_eq!(snowman.symbols()[0], Symbol::from("☃"));

        let bytes = SymbolSpan::from_word("☃!", SymbolAlphabet::Byte);
        assert_eq!(bytes.len(), 4);
        assert_eq!(bytes.symbols()[0], Symbol::from_byte(0xE2));
        assert_eq!(bytes.to_bytes(), "☃!".as_bytes());
    }

    #[test]
    fn test_span_pairs() {
        let s = span(&["a", "b", "c"]);
        assert_eq!(s.pairs().collect::<Vec<_>>(), vec![pair("a", "b"), pair("b", "c")]);
        assert!(s.contains_pair(&pair("b", "c")));
        assert!(!s.contains_pair(&pair("c", "b")));

        assert_eq!(span(&["a"]).pairs().count(), 0);
        assert!(SymbolSpan::from_symbols(vec![]).is_empty());
    }

    #[test]
    fn test_merged_is_greedy_and_non_overlapping() {
        let aa = Symbol::from("aa");
        assert_eq!(
            span(&["a", "a", "a"]).merged(&pair("a", "a"), &aa),
            span(&["aa", "a"])
        );
        assert_eq!(
            span(&["a", "a", "a", "a"]).merged(&pair("a", "a"), &aa),
            span(&["aa", "aa"])
        );

        let s = span(&["l", "o", "w", "l", "o"]);
        let merged = s.merged(&pair("l", "o"), &"lo".into());
        assert_eq!(merged, span(&["lo", "w", "lo"]));
        assert_eq!(merged.to_bytes(), s.to_bytes());

        // The source span is untouched.
        assert_eq!(s.len(), 5);
    }

    #[test]
    fn test_merge_pair_cb() {
        let mut s = span(&["a", "b", "c", "a", "b", "b", "a"]);
        let mut deltas = vec![];

        s.merge_pair_cb(&pair("a", "b"), &"ab".into(), &mut |p, d| {
            deltas.push((p, d));
        });
        assert_eq!(s, span(&["ab", "c", "ab", "b", "a"]));

        assert_eq!(
            deltas,
            vec![
                // first match
                (pair("a", "b"), -1),
                (pair("b", "c"), -1),
                (pair("ab", "c"), 1),
                // second match
                (pair("c", "a"), -1),
                (pair("c", "ab"), 1),
                (pair("a", "b"), -1),
                (pair("b", "b"), -1),
                (pair("ab", "b"), 1),
            ]
        );
    }

    #[test]
    fn test_merge_pair_cb_agrees_with_merged() {
        let s = span(&["a", "a", "a", "a", "a"]);
        let p = pair("a", "a");
        let aa = Symbol::from("aa");

        let mut inplace = s.clone();
        let mut net = 0;
        inplace.merge_pair_cb(&p, &aa, &mut |q, d| {
            if q == p {
                net += d;
            }
        });

        assert_eq!(inplace, s.merged(&p, &aa));
        assert_eq!(inplace, span(&["aa", "aa", "a"]));
        // All four (a, a) positions are gone.
        assert_eq!(net, -4);
    }
}
