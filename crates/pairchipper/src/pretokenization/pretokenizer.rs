//! # Pretokenizer

use std::borrow::Cow;

use compact_str::CompactString;

use crate::{
    errors::PCResult,
    regex::{GPT2_PRETOKENIZE_PATTERN, RegexWrapper, RegexWrapperPattern},
    symbols::{FrequencyTable, SymbolAlphabet, SymbolSpan},
    types::{CountType, PCHashMap, StringChunkType, hash_map_with_capacity},
};

/// Options for [`Pretokenizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct PretokenizerOptions {
    /// The lexical pattern used to split text into pre-tokens.
    pub pattern: RegexWrapperPattern,

    /// How pre-tokens are split into initial symbols.
    pub alphabet: SymbolAlphabet,
}

impl Default for PretokenizerOptions {
    fn default() -> Self {
        Self {
            pattern: GPT2_PRETOKENIZE_PATTERN.to_pattern(),
            alphabet: SymbolAlphabet::default(),
        }
    }
}

impl PretokenizerOptions {
    /// Sets the lexical pattern.
    pub fn with_pattern<P: Into<RegexWrapperPattern>>(
        self,
        pattern: P,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            ..self
        }
    }

    /// Sets the symbol alphabet.
    pub fn with_alphabet(
        self,
        alphabet: SymbolAlphabet,
    ) -> Self {
        Self { alphabet, ..self }
    }

    /// Compile the pattern and build a [`Pretokenizer`].
    pub fn init<K, C>(self) -> PCResult<Pretokenizer<K, C>>
    where
        K: StringChunkType,
        C: CountType,
    {
        Pretokenizer::new(self)
    }
}

/// Normalize a raw pattern match into a pre-token.
///
/// Lone ``"\r"`` and ``"\n"`` matches are dropped; all whitespace is
/// removed from the rest, and matches which become empty are dropped.
fn normalize_piece(piece: &str) -> Option<Cow<'_, str>> {
    if piece == "\r" || piece == "\n" {
        return None;
    }
    let word = if piece.contains(char::is_whitespace) {
        Cow::Owned(piece.chars().filter(|c| !c.is_whitespace()).collect())
    } else {
        Cow::Borrowed(piece)
    };
    if word.is_empty() { None } else { Some(word) }
}

/// Visit each pre-token of `text`, in order.
fn for_each_word<'t, F>(
    regex: &RegexWrapper,
    text: &'t str,
    mut f: F,
) -> PCResult<()>
where
    F: FnMut(Cow<'t, str>),
{
    for piece in regex.find_iter(text) {
        if let Some(word) = normalize_piece(piece?) {
            f(word);
        }
    }
    Ok(())
}

/// Splits text into pre-tokens, and counts them.
///
/// A `Pretokenizer` can be used two ways:
/// * [`Pretokenizer::pretokenize`] - one-shot, returns a fresh table.
/// * [`Pretokenizer::update_from_text`] / [`Pretokenizer::update_from_samples`] -
///   accumulate word counts in place, then [`Pretokenizer::to_frequency_table`].
#[derive(Debug, Clone)]
pub struct Pretokenizer<K = CompactString, C = u64>
where
    K: StringChunkType,
    C: CountType,
{
    options: PretokenizerOptions,
    regex: RegexWrapper,
    word_counts: PCHashMap<K, C>,
}

impl<K, C> Pretokenizer<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    /// Create a new pretokenizer.
    ///
    /// ## Errors
    /// [`crate::PairchipperError::Regex`] if the pattern does not compile.
    pub fn new(options: PretokenizerOptions) -> PCResult<Self> {
        let regex = options.pattern.compile()?;
        Ok(Self {
            options,
            regex,
            word_counts: Default::default(),
        })
    }

    /// The options.
    pub fn options(&self) -> &PretokenizerOptions {
        &self.options
    }

    /// The compiled pattern.
    pub fn regex(&self) -> &RegexWrapper {
        &self.regex
    }

    /// Pretokenize `text` into a fresh [`FrequencyTable`].
    ///
    /// The accumulated word counts are not touched.
    ///
    /// ## Errors
    /// [`crate::PairchipperError::Regex`] on match-time regex failures.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    pub fn pretokenize(
        &self,
        text: &str,
    ) -> PCResult<FrequencyTable<C>> {
        let mut counts: PCHashMap<Cow<'_, str>, C> = hash_map_with_capacity(text.len() / 8);
        for_each_word(&self.regex, text, |word| {
            *counts.entry(word).or_default() += C::one();
        })?;

        let alphabet = self.options.alphabet;
        Ok(counts
            .into_iter()
            .map(|(word, count)| (SymbolSpan::from_word(&word, alphabet), count))
            .collect())
    }

    /// Update word counts in place from text.
    ///
    /// ## Errors
    /// [`crate::PairchipperError::Regex`] on match-time regex failures.
    pub fn update_from_text<S: AsRef<str>>(
        &mut self,
        text: S,
    ) -> PCResult<()> {
        let word_counts = &mut self.word_counts;
        for_each_word(&self.regex, text.as_ref(), |word| {
            *word_counts.entry(K::from(word.as_ref())).or_default() += C::one();
        })
    }

    /// Update word counts in place from a sample iterator.
    ///
    /// ## Errors
    /// [`crate::PairchipperError::Regex`] on match-time regex failures.
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) -> PCResult<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for sample in samples {
            self.update_from_text(sample)?;
        }
        Ok(())
    }

    /// The accumulated word counts.
    pub fn word_counts(&self) -> &PCHashMap<K, C> {
        &self.word_counts
    }

    /// Release the accumulated word counts and return them.
    pub fn release(self) -> PCHashMap<K, C> {
        self.word_counts
    }

    /// Split the accumulated word counts into a [`FrequencyTable`].
    pub fn to_frequency_table(&self) -> FrequencyTable<C> {
        let alphabet = self.options.alphabet;
        self.word_counts
            .iter()
            .map(|(word, &count)| (SymbolSpan::from_word(word.as_ref(), alphabet), count))
            .collect()
    }
}

/// Pretokenize `text` with the default pattern and character alphabet.
///
/// ## Errors
/// [`crate::PairchipperError::Regex`] on regex failures.
pub fn pretokenize(text: &str) -> PCResult<FrequencyTable<u64>> {
    Pretokenizer::<CompactString, u64>::new(PretokenizerOptions::default())?.pretokenize(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PairchipperError;

    fn span(word: &str) -> SymbolSpan {
        SymbolSpan::from_chars(word)
    }

    #[test]
    fn test_normalize_piece() {
        assert_eq!(normalize_piece("\n"), None);
        assert_eq!(normalize_piece("\r"), None);
        assert_eq!(normalize_piece("  "), None);
        assert_eq!(normalize_piece("\n\n"), None);
        assert_eq!(normalize_piece(" lower").as_deref(), Some("lower"));
        assert_eq!(normalize_piece("abc").as_deref(), Some("abc"));
        assert!(matches!(normalize_piece("abc"), Some(Cow::Borrowed(_))));
    }

    #[test]
    fn test_pretokenize_low_lower_lowest() {
        let table = pretokenize("low lower lowest").unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(&span("low")), 1);
        assert_eq!(table.get(&span("lower")), 1);
        assert_eq!(table.get(&span("lowest")), 1);
        assert_eq!(table.get(&span(" lower")), 0);
    }

    #[test]
    fn test_pretokenize_counts_and_filters() {
        let table = pretokenize("the cat\nthe  dog's\r\n42 42!!").unwrap();

        assert_eq!(
            table.to_sorted_vec(),
            vec![
                (span("42"), 2),
                (span("the"), 2),
                (span("!!"), 1),
                (span("'s"), 1),
                (span("cat"), 1),
                (span("dog"), 1),
            ]
        );
    }

    #[test]
    fn test_pretokenize_is_deterministic() {
        let text = "It's a test; it's only a test, 1 2 3.";
        let a = pretokenize(text).unwrap();
        let b = pretokenize(text).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_sorted_vec(), b.to_sorted_vec());
    }

    #[test]
    fn test_byte_alphabet() {
        let pretokenizer: Pretokenizer = PretokenizerOptions::default()
            .with_alphabet(SymbolAlphabet::Byte)
            .init()
            .unwrap();

        let table = pretokenizer.pretokenize("héllo").unwrap();
        assert_eq!(table.len(), 1);

        let (word, count) = table.iter().next().unwrap();
        assert_eq!(count, 1);
        assert_eq!(word.len(), 6);
        assert_eq!(word.to_bytes(), "héllo".as_bytes());
    }

    #[test]
    fn test_custom_pattern() {
        let pretokenizer: Pretokenizer<String, u32> = PretokenizerOptions::default()
            .with_pattern(r"\w+")
            .init()
            .unwrap();
        assert!(!pretokenizer.regex().is_fancy());

        let table = pretokenizer.pretokenize("a b a").unwrap();
        assert_eq!(table.get(&span("a")), 2);
        assert_eq!(table.get(&span("b")), 1);
    }

    #[test]
    fn test_bad_pattern() {
        let result = PretokenizerOptions::default()
            .with_pattern(RegexWrapperPattern::Basic("(unclosed".to_string()))
            .init::<String, u64>();
        assert!(matches!(result, Err(PairchipperError::Regex(_))));
    }

    #[test]
    fn test_update_from_samples() {
        let mut pretokenizer: Pretokenizer<String, u64> =
            Pretokenizer::new(PretokenizerOptions::default()).unwrap();

        pretokenizer
            .update_from_samples(["Hello world", "Foo world bar world"])
            .unwrap();

        let mut counts: Vec<(String, u64)> = pretokenizer
            .word_counts()
            .iter()
            .map(|(k, &v)| (k.clone(), v))
            .collect();
        counts.sort();
        assert_eq!(
            counts,
            vec![
                ("Foo".to_string(), 1),
                ("Hello".to_string(), 1),
                ("bar".to_string(), 1),
                ("world".to_string(), 3),
            ]
        );

        let table = pretokenizer.to_frequency_table();
        assert_eq!(table.get(&span("world")), 3);
        assert_eq!(table.total_count(), 6);

        assert_eq!(
            table,
            pretokenize("Hello world Foo world bar world").unwrap()
        );

        let released = pretokenizer.release();
        assert_eq!(released.len(), 4);
    }
}
