//! # Pretokenization
//!
//! Splits text with a lexical pattern (by default
//! [`crate::regex::GPT2_PRETOKENIZE_PATTERN`]) into pre-tokens, drops
//! whitespace, and counts the resulting symbol sequences.
//!
//! ## Example
//!
//! ```rust
//! use pairchipper::{pretokenization::pretokenize, symbols::SymbolSpan};
//!
//! let table = pretokenize("low lower lowest").unwrap();
//! assert_eq!(table.len(), 3);
//! assert_eq!(table.get(&SymbolSpan::from_chars("lower")), 1);
//! ```

mod pretokenizer;

#[doc(inline)]
pub use pretokenizer::{Pretokenizer, PretokenizerOptions, pretokenize};
