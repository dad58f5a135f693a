//! # Corpus Trainer
//!
//! Chunked, parallel pretokenization of a whole corpus, followed by
//! a single training run over the reduced table.

use std::ops::Range;

use compact_str::CompactString;

use crate::{
    corpus::{
        BoundaryFinderOptions,
        ChunkBoundaryFinder,
        ChunkReader,
        CorpusSource,
        DEFAULT_SPLIT_MARKER,
        SplitMarker,
        chunk_ranges,
    },
    errors::{PCResult, PairchipperError},
    pretokenization::{Pretokenizer, PretokenizerOptions},
    symbols::FrequencyTable,
    training::{BpeTrainer, BpeTrainerOptions, TrainResults},
    types::CountType,
};

/// The default number of chunks.
pub const DEFAULT_NUM_CHUNKS: usize = 4;

/// Options for [`CorpusTrainer`].
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusTrainerOptions {
    /// The document separator; chunk boundaries snap to it.
    pub split_marker: Vec<u8>,

    /// The desired number of chunks.
    pub num_chunks: usize,

    /// Boundary search options.
    pub boundaries: BoundaryFinderOptions,

    /// Pretokenizer options.
    pub pretokenizer: PretokenizerOptions,

    /// Trainer options.
    pub trainer: BpeTrainerOptions,
}

impl CorpusTrainerOptions {
    /// Create new options around `trainer`, with defaults for the rest.
    pub fn new(trainer: BpeTrainerOptions) -> Self {
        Self {
            split_marker: DEFAULT_SPLIT_MARKER.as_bytes().to_vec(),
            num_chunks: DEFAULT_NUM_CHUNKS,
            boundaries: BoundaryFinderOptions::default(),
            pretokenizer: PretokenizerOptions::default(),
            trainer,
        }
    }

    /// Sets the split marker.
    pub fn with_split_marker<B: AsRef<[u8]>>(
        self,
        split_marker: B,
    ) -> Self {
        Self {
            split_marker: split_marker.as_ref().to_vec(),
            ..self
        }
    }

    /// Sets the desired number of chunks.
    pub fn with_num_chunks(
        self,
        num_chunks: usize,
    ) -> Self {
        Self { num_chunks, ..self }
    }

    /// Sets the boundary search options.
    pub fn with_boundaries(
        self,
        boundaries: BoundaryFinderOptions,
    ) -> Self {
        Self { boundaries, ..self }
    }

    /// Sets the pretokenizer options.
    pub fn with_pretokenizer(
        self,
        pretokenizer: PretokenizerOptions,
    ) -> Self {
        Self {
            pretokenizer,
            ..self
        }
    }

    /// Sets the trainer options.
    pub fn with_trainer(
        self,
        trainer: BpeTrainerOptions,
    ) -> Self {
        Self { trainer, ..self }
    }
}

/// Trains a merge list over a whole [`CorpusSource`].
///
/// The pipeline:
/// 1. find marker-aligned chunk boundaries;
/// 2. per chunk (in parallel with `rayon`): read, split on the marker,
///    decode, and pretokenize into a private table;
/// 3. fold the chunk tables together, in chunk order;
/// 4. train.
///
/// # Parameters
/// * `C` - the type used to store counts.
#[derive(Debug, Clone)]
pub struct CorpusTrainer<C: CountType = u64> {
    num_chunks: usize,
    finder: ChunkBoundaryFinder,
    reader: ChunkReader,
    pretokenizer: Pretokenizer<CompactString, C>,
    trainer: BpeTrainer,
}

impl<C: CountType> CorpusTrainer<C> {
    /// Build a trainer.
    ///
    /// ## Errors
    /// * [`PairchipperError::InvalidArgument`] on an empty marker, a zero
    ///   window size, or a zero chunk count.
    /// * [`PairchipperError::Regex`] if the pattern does not compile.
    pub fn new(options: CorpusTrainerOptions) -> PCResult<Self> {
        if options.num_chunks < 1 {
            return Err(PairchipperError::invalid_argument(
                "num_chunks must be >= 1",
            ));
        }
        let marker = SplitMarker::new(&options.split_marker)?;

        Ok(Self {
            num_chunks: options.num_chunks,
            finder: ChunkBoundaryFinder::new(marker.clone(), options.boundaries)?,
            reader: ChunkReader::new(marker),
            pretokenizer: Pretokenizer::new(options.pretokenizer)?,
            trainer: BpeTrainer::new(options.trainer),
        })
    }

    /// The desired number of chunks.
    pub fn num_chunks(&self) -> usize {
        self.num_chunks
    }

    /// The pretokenizer.
    pub fn pretokenizer(&self) -> &Pretokenizer<CompactString, C> {
        &self.pretokenizer
    }

    /// The BPE trainer.
    pub fn trainer(&self) -> &BpeTrainer {
        &self.trainer
    }

    /// Find the chunk boundaries of `source`.
    pub fn find_boundaries<S>(
        &self,
        source: &S,
    ) -> PCResult<Vec<u64>>
    where
        S: CorpusSource + ?Sized,
    {
        let mut cursor = source.open_cursor()?;
        self.finder.find_boundaries(&mut cursor, self.num_chunks)
    }

    /// Count one chunk of `source`, with a private cursor.
    ///
    /// Marker occurrences separate documents, and are never counted.
    pub fn count_chunk<S>(
        &self,
        source: &S,
        range: Range<u64>,
    ) -> PCResult<FrequencyTable<C>>
    where
        S: CorpusSource + ?Sized,
    {
        let mut cursor = source.open_cursor()?;
        let documents = self.reader.read_documents(&mut cursor, range.clone())?;

        let mut table: FrequencyTable<C> = FrequencyTable::new();
        for document in &documents {
            table.absorb(self.pretokenizer.pretokenize(document)?);
        }

        log::debug!(
            "chunk {range:?}: {} documents, {} distinct words",
            documents.len(),
            table.len()
        );
        Ok(table)
    }

    /// Count every chunk of `source`, and fold the results in chunk order.
    ///
    /// Chunks are counted in parallel when the `rayon` feature is enabled.
    /// Every chunk owns its table; the first chunk error is returned.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, source)))]
    pub fn count_corpus<S>(
        &self,
        source: &S,
    ) -> PCResult<FrequencyTable<C>>
    where
        S: CorpusSource + ?Sized,
    {
        let boundaries = self.find_boundaries(source)?;
        let ranges = chunk_ranges(&boundaries);
        log::info!("Counting {} chunks", ranges.len());

        #[cfg(feature = "rayon")]
        let chunk_tables: Vec<PCResult<FrequencyTable<C>>> = {
            use rayon::prelude::*;

            ranges
                .par_iter()
                .map(|range| self.count_chunk(source, range.clone()))
                .collect()
        };

        #[cfg(not(feature = "rayon"))]
        let chunk_tables: Vec<PCResult<FrequencyTable<C>>> = ranges
            .iter()
            .map(|range| self.count_chunk(source, range.clone()))
            .collect();

        let mut table: FrequencyTable<C> = FrequencyTable::new();
        for chunk_table in chunk_tables {
            table.absorb(chunk_table?);
        }

        log::info!(
            "Counted {} distinct words, {} total",
            table.len(),
            table.total_count()
        );
        Ok(table)
    }

    /// Count `source`, then train over the combined table.
    pub fn train<S>(
        &self,
        source: &S,
    ) -> PCResult<TrainResults<C>>
    where
        S: CorpusSource + ?Sized,
    {
        let table = self.count_corpus(source)?;
        self.trainer.train(table)
    }
}
