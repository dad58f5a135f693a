//! # Split Marker

use aho_corasick::AhoCorasick;

use crate::errors::{PCResult, PairchipperError};

/// The default document separator.
pub const DEFAULT_SPLIT_MARKER: &str = "<|endoftext|>";

/// A fixed byte sequence marking safe split points between documents.
///
/// Markers are only used to place chunk boundaries and to separate
/// documents; they are never pretokenized.
#[derive(Debug, Clone)]
pub struct SplitMarker {
    bytes: Vec<u8>,
    searcher: AhoCorasick,
}

impl SplitMarker {
    /// Build a marker.
    ///
    /// ## Errors
    /// [`PairchipperError::InvalidArgument`] if `bytes` is empty.
    pub fn new<B: AsRef<[u8]>>(bytes: B) -> PCResult<Self> {
        let bytes = bytes.as_ref().to_vec();
        if bytes.is_empty() {
            return Err(PairchipperError::invalid_argument(
                "split marker must be non-empty",
            ));
        }
        let searcher = AhoCorasick::new([&bytes])
            .map_err(|e| PairchipperError::invalid_argument(e.to_string()))?;
        Ok(Self { bytes, searcher })
    }

    /// The marker bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The marker length in bytes; always > 0.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; markers are non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The start offset of the first occurrence in `haystack`.
    pub fn find(
        &self,
        haystack: &[u8],
    ) -> Option<usize> {
        self.searcher.find(haystack).map(|m| m.start())
    }

    /// Split `haystack` on marker occurrences.
    ///
    /// Yields the non-empty pieces between markers; the markers
    /// themselves are dropped.
    pub fn split_documents<'a>(
        &'a self,
        haystack: &'a [u8],
    ) -> impl Iterator<Item = &'a [u8]> + 'a {
        let mut last = 0;
        let mut matches = self.searcher.find_iter(haystack);
        core::iter::from_fn(move || {
            loop {
                if last > haystack.len() {
                    return None;
                }
                let (piece, next) = match matches.next() {
                    Some(m) => (&haystack[last..m.start()], m.end()),
                    None => (&haystack[last..], haystack.len() + 1),
                };
                last = next;
                if !piece.is_empty() {
                    return Some(piece);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_marker_is_invalid() {
        assert!(matches!(
            SplitMarker::new(b""),
            Err(PairchipperError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_default_marker() {
        let marker = SplitMarker::new(DEFAULT_SPLIT_MARKER).unwrap();
        assert_eq!(marker.as_bytes(), DEFAULT_SPLIT_MARKER.as_bytes());
        assert_eq!(marker.len(), 13);
        assert!(!marker.is_empty());
    }

    #[test]
    fn test_find() {
        let marker = SplitMarker::new("<|eot|>").unwrap();
        assert_eq!(marker.find(b"abc<|eot|>def<|eot|>"), Some(3));
        assert_eq!(marker.find(b"abc"), None);
        assert_eq!(marker.find(b"<|eot"), None);
    }

    #[test]
    fn test_split_documents() {
        let marker = SplitMarker::new("##").unwrap();

        let docs: Vec<&[u8]> = marker.split_documents(b"##one##two####three").collect();
        assert_eq!(docs, vec![&b"one"[..], b"two", b"three"]);

        let docs: Vec<&[u8]> = marker.split_documents(b"plain").collect();
        assert_eq!(docs, vec![&b"plain"[..]]);

        assert_eq!(marker.split_documents(b"").count(), 0);
        assert_eq!(marker.split_documents(b"####").count(), 0);
    }
}
