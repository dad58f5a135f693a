//! # Chunk Extraction

use std::{
    borrow::Cow,
    io::{Read, Seek, SeekFrom},
    ops::Range,
};

use crate::{
    corpus::SplitMarker,
    errors::{PCResult, PairchipperError},
};

/// Consecutive ``[start, end)`` ranges over a boundary list.
pub fn chunk_ranges(boundaries: &[u64]) -> Vec<Range<u64>> {
    boundaries.windows(2).map(|w| w[0]..w[1]).collect()
}

/// Read exactly the bytes of `range` from `source`.
///
/// ## Errors
/// * [`PairchipperError::InvalidArgument`] if `range` is inverted.
/// * [`PairchipperError::Io`] on seek failures, or if the source ends early.
pub fn read_chunk<R>(
    source: &mut R,
    range: Range<u64>,
) -> PCResult<Vec<u8>>
where
    R: Read + Seek,
{
    if range.end < range.start {
        return Err(PairchipperError::invalid_argument(format!(
            "inverted chunk range: {range:?}"
        )));
    }
    let len = range.end - range.start;

    source.seek(SeekFrom::Start(range.start))?;
    let mut buf = Vec::with_capacity(len as usize);
    source.by_ref().take(len).read_to_end(&mut buf)?;

    if buf.len() as u64 != len {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("chunk {range:?} truncated at {} bytes", buf.len()),
        )
        .into());
    }
    Ok(buf)
}

/// Decode `bytes` as UTF-8, dropping any invalid sequences.
///
/// Nothing is substituted for the dropped bytes, so a multi-byte character
/// cut at a chunk edge disappears.
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.utf8_chunks().map(|c| c.valid()).collect()),
    }
}

/// Reads chunks and splits them into decoded documents.
#[derive(Debug, Clone)]
pub struct ChunkReader {
    marker: SplitMarker,
}

impl ChunkReader {
    /// Build a reader around `marker`.
    pub fn new(marker: SplitMarker) -> Self {
        Self { marker }
    }

    /// The split marker.
    pub fn marker(&self) -> &SplitMarker {
        &self.marker
    }

    /// Read `range` from `source`, and return its documents.
    ///
    /// The raw bytes are split on the marker before decoding;
    /// marker bytes never appear in the output.
    pub fn read_documents<R>(
        &self,
        source: &mut R,
        range: Range<u64>,
    ) -> PCResult<Vec<String>>
    where
        R: Read + Seek,
    {
        let bytes = read_chunk(source, range)?;
        Ok(self.split_documents(&bytes))
    }

    /// Split raw chunk bytes into decoded, non-empty documents.
    pub fn split_documents(
        &self,
        bytes: &[u8],
    ) -> Vec<String> {
        self.marker
            .split_documents(bytes)
            .map(decode_lossy)
            .filter(|doc| !doc.is_empty())
            .map(Cow::into_owned)
            .collect()
    }
}
