//! # Chunk Boundary Finder

use std::io::{Cursor, Read, Seek, SeekFrom};

use crate::{
    corpus::SplitMarker,
    errors::{PCResult, PairchipperError},
};

/// The default look-ahead window size, in bytes.
pub const DEFAULT_LOOKAHEAD_WINDOW: usize = 4096;

/// Options for [`ChunkBoundaryFinder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryFinderOptions {
    /// Bytes read per look-ahead step when scanning for a marker.
    pub window_size: usize,
}

impl Default for BoundaryFinderOptions {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_LOOKAHEAD_WINDOW,
        }
    }
}

impl BoundaryFinderOptions {
    /// Sets the look-ahead window size.
    pub fn with_window_size(
        self,
        window_size: usize,
    ) -> Self {
        Self { window_size }
    }
}

/// Finds marker-aligned chunk boundaries in a seekable byte source.
#[derive(Debug, Clone)]
pub struct ChunkBoundaryFinder {
    options: BoundaryFinderOptions,
    marker: SplitMarker,
}

impl ChunkBoundaryFinder {
    /// Build a finder.
    ///
    /// ## Errors
    /// [`PairchipperError::InvalidArgument`] if the window size is zero.
    pub fn new(
        marker: SplitMarker,
        options: BoundaryFinderOptions,
    ) -> PCResult<Self> {
        if options.window_size == 0 {
            return Err(PairchipperError::invalid_argument(
                "look-ahead window size must be > 0",
            ));
        }
        Ok(Self { options, marker })
    }

    /// The options.
    pub fn options(&self) -> &BoundaryFinderOptions {
        &self.options
    }

    /// The split marker.
    pub fn marker(&self) -> &SplitMarker {
        &self.marker
    }

    /// Find chunk boundaries over `source`.
    ///
    /// Starts from `desired_chunks + 1` uniformly spaced guesses, and snaps
    /// each interior guess forward to the start of the next marker (or to
    /// the end of the source). The result is sorted and deduplicated, so
    /// it may hold fewer than `desired_chunks + 1` offsets; it always
    /// starts at 0 and ends at the source length.
    ///
    /// The stream position of `source` is restored before returning.
    ///
    /// ## Errors
    /// * [`PairchipperError::InvalidArgument`] if `desired_chunks` is zero.
    /// * [`PairchipperError::Io`] on read/seek failures.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, source)))]
    pub fn find_boundaries<R>(
        &self,
        source: &mut R,
        desired_chunks: usize,
    ) -> PCResult<Vec<u64>>
    where
        R: Read + Seek,
    {
        if desired_chunks < 1 {
            return Err(PairchipperError::invalid_argument(
                "desired_chunks must be >= 1",
            ));
        }

        let saved = source.stream_position()?;
        let result = self.scan_boundaries(source, desired_chunks);
        source.seek(SeekFrom::Start(saved))?;
        result
    }

    /// Find chunk boundaries over an in-memory buffer.
    ///
    /// See [`Self::find_boundaries`].
    pub fn find_boundaries_in(
        &self,
        bytes: &[u8],
        desired_chunks: usize,
    ) -> PCResult<Vec<u64>> {
        self.find_boundaries(&mut Cursor::new(bytes), desired_chunks)
    }

    fn scan_boundaries<R>(
        &self,
        source: &mut R,
        desired_chunks: usize,
    ) -> PCResult<Vec<u64>>
    where
        R: Read + Seek,
    {
        let byte_length = source.seek(SeekFrom::End(0))?;
        let chunk_size = byte_length / desired_chunks as u64;

        let mut boundaries: Vec<u64> = (0..=desired_chunks as u64)
            .map(|i| i * chunk_size)
            .collect();
        boundaries[desired_chunks] = byte_length;

        let mut window: Vec<u8> =
            Vec::with_capacity(self.options.window_size + self.marker.len());
        for boundary in boundaries[1..desired_chunks].iter_mut() {
            *boundary = self.snap_to_marker(source, *boundary, byte_length, &mut window)?;
        }

        boundaries.sort_unstable();
        boundaries.dedup();

        log::debug!("chunk boundaries: {boundaries:?}");
        Ok(boundaries)
    }

    /// Scan forward from `guess` for the first marker start.
    ///
    /// Consecutive windows overlap by ``marker.len() - 1`` bytes,
    /// so markers straddling a window edge are not missed.
    fn snap_to_marker<R>(
        &self,
        source: &mut R,
        guess: u64,
        byte_length: u64,
        window: &mut Vec<u8>,
    ) -> PCResult<u64>
    where
        R: Read + Seek,
    {
        let carry = self.marker.len() - 1;
        let step = self.options.window_size as u64;

        window.clear();
        let mut position = source.seek(SeekFrom::Start(guess))?;

        loop {
            let keep = window.len().min(carry);
            window.drain(..window.len() - keep);
            let window_start = position - keep as u64;

            let read = source.by_ref().take(step).read_to_end(window)?;
            if read == 0 {
                return Ok(byte_length);
            }
            position += read as u64;

            if let Some(offset) = self.marker.find(window) {
                return Ok(window_start + offset as u64);
            }
        }
    }
}

/// Find marker-aligned chunk boundaries with default options.
///
/// ## Errors
/// * [`PairchipperError::InvalidArgument`] if `marker` is empty or `desired_chunks` is zero.
/// * [`PairchipperError::Io`] on read/seek failures.
pub fn find_chunk_boundaries<R, M>(
    source: &mut R,
    desired_chunks: usize,
    marker: M,
) -> PCResult<Vec<u64>>
where
    R: Read + Seek,
    M: AsRef<[u8]>,
{
    ChunkBoundaryFinder::new(SplitMarker::new(marker)?, BoundaryFinderOptions::default())?
        .find_boundaries(source, desired_chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finder(
        marker: &str,
        window_size: usize,
    ) -> ChunkBoundaryFinder {
        ChunkBoundaryFinder::new(
            SplitMarker::new(marker).unwrap(),
            BoundaryFinderOptions::default().with_window_size(window_size),
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            ChunkBoundaryFinder::new(
                SplitMarker::new("|").unwrap(),
                BoundaryFinderOptions::default().with_window_size(0)
            ),
            Err(PairchipperError::InvalidArgument(_))
        ));

        assert!(matches!(
            finder("|", 8).find_boundaries_in(b"abc", 0),
            Err(PairchipperError::InvalidArgument(_))
        ));

        assert!(matches!(
            find_chunk_boundaries(&mut Cursor::new(b"abc"), 2, b""),
            Err(PairchipperError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_single_chunk() {
        let f = finder("|", 8);
        assert_eq!(f.find_boundaries_in(b"a|b|c", 1).unwrap(), vec![0, 5]);
    }

    #[test]
    fn test_empty_source() {
        let f = finder("|", 8);
        assert_eq!(f.find_boundaries_in(b"", 4).unwrap(), vec![0]);
    }

    #[test]
    fn test_snaps_to_markers() {
        let text = b"aaaa|bbbb|cccc|dddd";
        let f = finder("|", 4);

        // Guesses [0, 4, 8, 12, 19]; 4 is already a marker.
        assert_eq!(f.find_boundaries_in(text, 4).unwrap(), vec![0, 4, 9, 14, 19]);

        // Guesses [0, 6, 12, 19] snap forward to [0, 9, 14, 19].
        assert_eq!(f.find_boundaries_in(text, 3).unwrap(), vec![0, 9, 14, 19]);
    }

    #[test]
    fn test_no_marker_collapses_to_end() {
        let f = finder("<|eot|>", 4);
        let text = b"no markers in this text at all";
        assert_eq!(f.find_boundaries_in(text, 5).unwrap(), vec![0, text.len() as u64]);
    }

    #[test]
    fn test_collapsing_guesses_are_deduplicated() {
        let f = finder("|", 2);
        let text = b"abcdefghijklmnop|q";
        assert_eq!(f.find_boundaries_in(text, 4).unwrap(), vec![0, 16, 18]);
    }

    #[test]
    fn test_marker_straddling_window_edge() {
        // 4 byte windows from guess 11: "x<|e", then "ot|>".
        let text = b"0123456789xx<|eot|>tail";
        let f = finder("<|eot|>", 4);
        assert_eq!(
            f.find_boundaries_in(text, 2).unwrap(),
            vec![0, 12, text.len() as u64]
        );
    }

    #[test]
    fn test_restores_stream_position() {
        let text = b"aaaa|bbbb|cccc|dddd".to_vec();
        let mut cursor = Cursor::new(text);
        cursor.set_position(7);

        let f = finder("|", 4);
        let boundaries = f.find_boundaries(&mut cursor, 4).unwrap();

        assert_eq!(boundaries.len(), 5);
        assert_eq!(cursor.position(), 7);
    }

    #[test]
    fn test_find_chunk_boundaries_defaults() {
        let text = "doc one<|endoftext|>doc two<|endoftext|>doc three";
        let boundaries = find_chunk_boundaries(&mut Cursor::new(text), 2, "<|endoftext|>").unwrap();
        assert_eq!(boundaries, vec![0, 27, text.len() as u64]);
    }
}
