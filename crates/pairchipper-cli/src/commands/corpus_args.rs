use std::path::PathBuf;

use pairchipper::{
    corpus::{BoundaryFinderOptions, DEFAULT_LOOKAHEAD_WINDOW, DEFAULT_SPLIT_MARKER},
    pretokenization::PretokenizerOptions,
    regex::GPT2_PRETOKENIZE_PATTERN,
    symbols::SymbolAlphabet,
    training::{BpeTrainerOptions, CorpusTrainer, CorpusTrainerOptions, DEFAULT_NUM_CHUNKS},
};

/// Corpus and pretokenization arg group.
#[derive(clap::Args, Debug)]
pub struct CorpusArgs {
    /// Input corpus file.
    pub file: PathBuf,

    /// Desired number of chunks.
    #[arg(long, default_value_t = DEFAULT_NUM_CHUNKS)]
    pub num_chunks: usize,

    /// Document separator; never counted.
    #[arg(long, default_value_t = DEFAULT_SPLIT_MARKER.to_string())]
    pub split_token: String,

    /// Boundary search window, in bytes.
    #[arg(long, default_value_t = DEFAULT_LOOKAHEAD_WINDOW)]
    pub window_size: usize,

    /// Pre-token regex.
    #[arg(long, default_value_t = GPT2_PRETOKENIZE_PATTERN.as_str().to_string())]
    pub regex: String,

    /// Initial symbol alphabet: "char" or "byte".
    #[arg(long, default_value_t = SymbolAlphabet::Char)]
    pub alphabet: SymbolAlphabet,
}

impl CorpusArgs {
    /// Build the corpus trainer options around `trainer`.
    pub fn trainer_options(
        &self,
        trainer: BpeTrainerOptions,
    ) -> CorpusTrainerOptions {
        CorpusTrainerOptions::new(trainer)
            .with_split_marker(&self.split_token)
            .with_num_chunks(self.num_chunks)
            .with_boundaries(BoundaryFinderOptions::default().with_window_size(self.window_size))
            .with_pretokenizer(
                PretokenizerOptions::default()
                    .with_pattern(&self.regex)
                    .with_alphabet(self.alphabet),
            )
    }

    /// Build a corpus trainer around `trainer`.
    pub fn init(
        &self,
        trainer: BpeTrainerOptions,
    ) -> Result<CorpusTrainer<u64>, Box<dyn std::error::Error>> {
        log::info!("corpus: {}", self.file.display());
        Ok(CorpusTrainer::new(self.trainer_options(trainer))?)
    }
}
