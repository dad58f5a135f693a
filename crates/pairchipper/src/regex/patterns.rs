//! # Pattern Tools and Pretokenization Patterns

use crate::regex::ConstRegexWrapperPattern;

/// A macro to concatenate multiple string literals with a specified separator.
///
/// # Examples
///
/// ```rust
/// use pairchipper::join_strs;
///
/// let result = join_strs!(",", ("Hello", "World", "Rust"));
/// assert_eq!(result, "Hello,World,Rust");
///
/// let result = join_strs!(";", ("OnlyOne"));
/// assert_eq!(result, "OnlyOne");
/// ```
#[macro_export]
macro_rules! join_strs {
    ($sep:literal, ($first:literal $(, $rest:literal)* $(,)?)) => {
        concat!($first $(, $sep, $rest)*)
    };
}

/// An extension of [`join_strs!()`] which uses the "|" as the separator.
#[macro_export]
macro_rules! join_patterns {
    ($($e:literal),* $(,)?) => { $crate::join_strs!("|", ($($e),*)) };
}

/// The GPT-2 pre-token pattern.
///
/// Alternatives, in priority order:
/// contraction suffixes, letter runs, digit runs, symbol runs
/// (each with an optional leading space), whitespace not followed
/// by a non-space, and any remaining whitespace.
///
/// The ``\s+(?!\S)`` look-ahead requires [`fancy_regex`].
pub const GPT2_PRETOKENIZE_PATTERN: ConstRegexWrapperPattern =
    ConstRegexWrapperPattern::Fancy(join_patterns!(
        r"'(?:[sdmt]|ll|ve|re)",
        r" ?\p{L}+",
        r" ?\p{N}+",
        r" ?[^\s\p{L}\p{N}]+",
        r"\s+(?!\S)",
        r"\s+",
    ));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_patterns() {
        assert_eq!(join_patterns!("a", "b", "c"), "a|b|c");
        assert_eq!(join_strs!("+", ("a", "b", "c")), "a+b+c");
    }

    #[test]
    fn test_gpt2_pattern_text() {
        assert_eq!(
            GPT2_PRETOKENIZE_PATTERN.as_str(),
            r"'(?:[sdmt]|ll|ve|re)| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+"
        );
    }

    #[test]
    fn test_gpt2_pattern_matches() {
        let re = GPT2_PRETOKENIZE_PATTERN.compile().unwrap();
        assert!(re.is_fancy());

        let text = "It's 42 cats!!  ok\n";
        let pieces: Vec<&str> = re.find_iter(text).map(|m| m.unwrap()).collect();
        assert_eq!(
            pieces,
            vec!["It", "'s", " 42", " cats", "!!", " ", " ok", "\n"]
        );
        assert_eq!(pieces.concat(), text);
    }
}
