//! # BPE Training
//!
//! Learns an ordered merge list from a [`crate::symbols::FrequencyTable`].
//!
//! Each training iteration:
//! * counts every adjacent symbol pair, weighted by span count
//!   ([`compute_pair_stats`]);
//! * selects the highest count pair, breaking ties toward the
//!   lexicographically greater pair ([`select_best_pair`]);
//! * merges every non-overlapping occurrence of it ([`apply_merge`]).
//!
//! [`BpeTrainer`] runs the loop, with either a full [`MergeStrategy::Rescan`]
//! per merge, or [`MergeStrategy::Incremental`] pair count maintenance.
//! [`CorpusTrainer`] wraps the whole pipeline over a [`crate::corpus::CorpusSource`].
//!
//! ## Example
//!
//! ```rust
//! use pairchipper::{
//!     pretokenization::pretokenize,
//!     symbols::Symbol,
//!     training::{TrainingState, train},
//! };
//!
//! let table = pretokenize("low lower lowest").unwrap();
//! let results = train(table, 2).unwrap();
//!
//! assert_eq!(results.state, TrainingState::Done);
//! assert_eq!(results.merges[0].merged(), &Symbol::from("ow"));
//! assert_eq!(results.merges[1].merged(), &Symbol::from("low"));
//! ```

pub mod utility;

mod bpe_trainer;
mod corpus_trainer;
mod merge;
mod merge_record;
mod pair_stats;

#[doc(inline)]
pub use bpe_trainer::{
    BpeTrainer,
    BpeTrainerOptions,
    MergeStrategy,
    TrainResults,
    TrainingState,
    train,
};
#[doc(inline)]
pub use corpus_trainer::{CorpusTrainer, CorpusTrainerOptions, DEFAULT_NUM_CHUNKS};
#[doc(inline)]
pub use merge::apply_merge;
#[doc(inline)]
pub use merge_record::MergeRecord;
#[doc(inline)]
pub use pair_stats::{
    PairStats,
    best_pair_entry,
    compute_pair_stats,
    pair_rank,
    ranked_pairs,
    select_best_pair,
};
