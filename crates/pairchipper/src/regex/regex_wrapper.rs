//! # Regex Wrapper
//! This modules provides mechanisms to mix `regex` and `fancy_regex` types.

use core::fmt::Debug;

/// Error wrapper for regex patterns.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub enum ErrorWrapper {
    /// Error from `regex`.
    Basic(regex::Error),

    /// Error from `fancy_regex`.
    Fancy(fancy_regex::Error),
}

impl From<regex::Error> for ErrorWrapper {
    fn from(err: regex::Error) -> Self {
        Self::Basic(err)
    }
}

impl From<fancy_regex::Error> for ErrorWrapper {
    fn from(err: fancy_regex::Error) -> Self {
        Self::Fancy(err)
    }
}

impl core::fmt::Display for ErrorWrapper {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            Self::Basic(err) => core::fmt::Display::fmt(err, f),
            Self::Fancy(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::error::Error for ErrorWrapper {}

/// Const Regex Wrapper Pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConstRegexWrapperPattern {
    /// This is a pattern for the `regex` crate.
    Basic(&'static str),

    /// This is a pattern for the `fancy_regex` crate.
    Fancy(&'static str),
}

impl ConstRegexWrapperPattern {
    /// Get the underlying regex pattern.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic(pattern) => pattern,
            Self::Fancy(pattern) => pattern,
        }
    }

    /// Convert to [`RegexWrapperPattern`]
    pub fn to_pattern(self) -> RegexWrapperPattern {
        self.into()
    }

    /// Compile the regex pattern into a `RegexWrapper`.
    pub fn compile(&self) -> Result<RegexWrapper, ErrorWrapper> {
        RegexWrapperPattern::from(*self).compile()
    }
}

impl From<ConstRegexWrapperPattern> for RegexWrapperPattern {
    fn from(pattern: ConstRegexWrapperPattern) -> Self {
        use ConstRegexWrapperPattern::*;
        match pattern {
            Basic(pattern) => RegexWrapperPattern::Basic(pattern.to_string()),
            Fancy(pattern) => RegexWrapperPattern::Fancy(pattern.to_string()),
        }
    }
}

/// Label for regex patterns.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RegexWrapperPattern {
    /// This is a pattern for the `regex` crate.
    Basic(String),

    /// This is a pattern for the `fancy_regex` crate.
    Fancy(String),

    /// This pattern will try the `regex` crate first,
    /// and fallback to `fancy_regex` if it fails.
    Adaptive(String),
}

impl<S: AsRef<str>> From<S> for RegexWrapperPattern {
    fn from(pattern: S) -> Self {
        Self::Adaptive(pattern.as_ref().to_string())
    }
}

impl RegexWrapperPattern {
    /// Get the underlying regex pattern.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(pattern) => pattern,
            Self::Fancy(pattern) => pattern,
            Self::Adaptive(pattern) => pattern,
        }
    }

    /// Compile the regex pattern into a `RegexWrapper`.
    ///
    /// ## Returns
    /// A `Result` containing the compiled `RegexWrapper` or an `ErrorWrapper`.
    pub fn compile(&self) -> Result<RegexWrapper, ErrorWrapper> {
        match self {
            Self::Basic(pattern) => regex::Regex::new(pattern)
                .map(RegexWrapper::from)
                .map_err(ErrorWrapper::from),
            Self::Fancy(pattern) => fancy_regex::Regex::new(pattern)
                .map(RegexWrapper::from)
                .map_err(ErrorWrapper::from),
            Self::Adaptive(pattern) => regex::Regex::new(pattern)
                .map(RegexWrapper::from)
                .or_else(|_| {
                    fancy_regex::Regex::new(pattern)
                        .map(RegexWrapper::from)
                        .map_err(ErrorWrapper::from)
                }),
        }
    }
}

/// Wrapper for compiled regex patterns.
#[derive(Debug, Clone)]
pub enum RegexWrapper {
    /// Wrapper for `regex::Regex`.
    Basic(regex::Regex),

    /// Wrapper for `fancy_regex::Regex`.
    Fancy(fancy_regex::Regex),
}

impl From<regex::Regex> for RegexWrapper {
    fn from(regex: regex::Regex) -> Self {
        Self::Basic(regex)
    }
}

impl From<fancy_regex::Regex> for RegexWrapper {
    fn from(regex: fancy_regex::Regex) -> Self {
        Self::Fancy(regex)
    }
}

impl RegexWrapper {
    /// Is this `Fancy`?
    pub fn is_fancy(&self) -> bool {
        matches!(self, Self::Fancy(_))
    }

    /// Get the underlying regex pattern.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(regex) => regex.as_str(),
            Self::Fancy(regex) => regex.as_str(),
        }
    }

    /// Lazily iterate over the non-overlapping matches in `haystack`.
    ///
    /// `fancy_regex` may fail mid-scan (e.g. on its backtrack limit);
    /// such failures are yielded as `Err` items.
    pub fn find_iter<'r, 'h>(
        &'r self,
        haystack: &'h str,
    ) -> MatchesWrapper<'r, 'h> {
        match self {
            Self::Basic(regex) => MatchesWrapper::Basic(regex.find_iter(haystack)),
            Self::Fancy(regex) => MatchesWrapper::Fancy(regex.find_iter(haystack)),
        }
    }
}

/// Wrapper for regex match iterators.
pub enum MatchesWrapper<'r, 'h> {
    /// Wrapper for `regex::Matches`.
    Basic(regex::Matches<'r, 'h>),

    /// Wrapper for `fancy_regex::Matches`.
    Fancy(fancy_regex::Matches<'r, 'h>),
}

impl<'h> Iterator for MatchesWrapper<'_, 'h> {
    type Item = Result<&'h str, ErrorWrapper>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Basic(matches) => matches.next().map(|m| Ok(m.as_str())),
            Self::Fancy(matches) => matches
                .next()
                .map(|m| m.map(|m| m.as_str()).map_err(ErrorWrapper::from)),
        }
    }
}
