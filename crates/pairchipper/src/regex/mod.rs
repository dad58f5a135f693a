//! # Regex Utilities
//!
//! The lexical pattern used for pretokenization is consumed as a black-box
//! "find all matches" capability.
//!
//! Popular pre-token patterns require look-ahead, which is provided by the
//! [`fancy_regex`] crate at a performance cost. We'd prefer the standard
//! [`regex`] crate when a pattern permits it.
//!
//! * Labeling Patterns - [`RegexWrapperPattern`]
//!   * [`RegexWrapperPattern::Basic`] - a pattern which was written for [`regex`].
//!   * [`RegexWrapperPattern::Fancy`] - a pattern which was written for [`fancy_regex`].
//!   * [`RegexWrapperPattern::Adaptive`] - unknown target, try basic; then fall-up to fancy.
//! * Wrapping Compiled Regex - [`RegexWrapper`]

pub mod patterns;
pub mod regex_wrapper;

#[doc(inline)]
pub use patterns::GPT2_PRETOKENIZE_PATTERN;
#[doc(inline)]
pub use regex_wrapper::{
    ConstRegexWrapperPattern,
    ErrorWrapper,
    MatchesWrapper,
    RegexWrapper,
    RegexWrapperPattern,
};
