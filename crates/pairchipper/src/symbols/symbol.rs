//! # Symbols

use core::fmt::{Debug, Display, Write};
use std::sync::Arc;

/// An atomic unit of the training alphabet.
///
/// A symbol is an immutable, non-empty byte string; initially a single
/// character (or byte), and after merges the concatenation of two symbols.
///
/// Symbols compare, hash, and order by content. Ordering is lexicographic
/// over the bytes, which for UTF-8 text agrees with code point order.
/// Clones share the underlying buffer.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Arc<[u8]>);

/// An ordered pair of adjacent symbols: ``(left, right)``.
pub type SymbolPair = (Symbol, Symbol);

impl Symbol {
    /// Build a symbol from raw bytes.
    pub fn from_bytes<B: AsRef<[u8]>>(bytes: B) -> Self {
        Self(Arc::from(bytes.as_ref()))
    }

    /// Build a single-character symbol.
    pub fn from_char(c: char) -> Self {
        let mut buf = [0u8; 4];
        Self::from_bytes(c.encode_utf8(&mut buf).as_bytes())
    }

    /// Build a single-byte symbol.
    pub fn from_byte(b: u8) -> Self {
        Self::from_bytes([b])
    }

    /// The content of this symbol.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The content as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.0).ok()
    }

    /// The byte length of this symbol.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Is this symbol empty?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Concatenate two symbols into a new one.
    pub fn concat(
        &self,
        other: &Symbol,
    ) -> Symbol {
        let mut bytes = Vec::with_capacity(self.len() + other.len());
        bytes.extend_from_slice(&self.0);
        bytes.extend_from_slice(&other.0);
        Self(bytes.into())
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::from_bytes(s.as_bytes())
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self::from_char(c)
    }
}

impl From<&[u8]> for Symbol {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl Display for Symbol {
    /// Writes valid UTF-8 as-is; invalid bytes are escaped as ``\xNN``.
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        for chunk in self.0.utf8_chunks() {
            f.write_str(chunk.valid())?;
            for b in chunk.invalid() {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl Debug for Symbol {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.write_str("Symbol(\"")?;
        for c in self.to_string().chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                c if c.is_control() => write!(f, "{}", c.escape_default())?,
                c => f.write_char(c)?,
            }
        }
        f.write_str("\")")
    }
}
