//! # Corpus Chunking
//!
//! Splits a corpus into independently processable chunks, whose edges
//! only ever fall at the start of a [`SplitMarker`] (or at the ends of
//! the source).
//!
//! * [`ChunkBoundaryFinder`] - finds marker-aligned byte offsets.
//! * [`CorpusSource`] - hands out an independent cursor per worker.
//! * [`ChunkReader`] - reads a chunk, and splits it into decoded documents.

mod boundary_finder;
mod chunk_reader;
mod corpus_source;
mod split_marker;

#[doc(inline)]
pub use boundary_finder::{
    BoundaryFinderOptions,
    ChunkBoundaryFinder,
    DEFAULT_LOOKAHEAD_WINDOW,
    find_chunk_boundaries,
};
#[doc(inline)]
pub use chunk_reader::{ChunkReader, chunk_ranges, decode_lossy, read_chunk};
#[doc(inline)]
pub use corpus_source::CorpusSource;
#[doc(inline)]
pub use split_marker::{DEFAULT_SPLIT_MARKER, SplitMarker};
