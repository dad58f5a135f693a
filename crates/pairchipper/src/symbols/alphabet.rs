//! # Symbol Alphabet

/// How a pre-token is decomposed into its initial symbols.
///
/// The statistics, merge, and tie-break rules are identical for both.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::VariantNames
)]
#[strum(serialize_all = "lowercase")]
pub enum SymbolAlphabet {
    /// One symbol per (UTF-8 encoded) character.
    #[default]
    Char,

    /// One symbol per byte.
    Byte,
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use strum::VariantNames;

    use super::*;

    #[test]
    fn test_alphabet_names() {
        assert_eq!(SymbolAlphabet::default(), SymbolAlphabet::Char);
        assert_eq!(SymbolAlphabet::Char.to_string(), "char");
        assert_eq!(SymbolAlphabet::Byte.to_string(), "byte");
        assert_eq!(SymbolAlphabet::from_str("byte").unwrap(), SymbolAlphabet::Byte);
        assert!(SymbolAlphabet::from_str("nibble").is_err());
        assert_eq!(SymbolAlphabet::VARIANTS, &["char", "byte"]);
    }
}
