//! # `pairchipper` BPE Merge Trainer
//!
//! This crate learns an ordered byte-pair-encoding merge list from a raw
//! text corpus.
//!
//! The pipeline, leaves first:
//! * [`corpus`] - split a corpus at a marker into independently countable chunks.
//! * [`pretokenization`] - split chunk text with a lexical pattern into symbol sequences.
//! * [`training`] - count adjacent symbol pairs, merge the best pair, repeat.
//!
//! The resulting [`training::MergeRecord`] list is the trained artifact;
//! persisting it is left to the caller (see the `pairchipper-cli` crate).
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//!
//! #### feature: ``ahash`` / ``foldhash``
//!
//! These swap all HashMap/HashSet implementations for ``ahash`` or ``foldhash``.
//! If both are enabled, ``ahash`` wins.
//!
//! This is done by the ``types::PC{HashMap,HashSet}`` type alias machinery.
//!
//! #### feature: ``rayon``
//!
//! Per-chunk pretokenization in [`training::CorpusTrainer`] runs on the
//! ``rayon`` pool. Without it, chunks are counted sequentially.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//! This is only useful for timing tracing of the library itself.
//!
//! ## Training Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use pairchipper::training::{BpeTrainerOptions, CorpusTrainer, CorpusTrainerOptions};
//!
//! fn example(path: &Path) -> pairchipper::PCResult<()> {
//!     let options = CorpusTrainerOptions::new(BpeTrainerOptions::new(1000)).with_num_chunks(8);
//!     let trainer: CorpusTrainer<u64> = CorpusTrainer::new(options)?;
//!
//!     let results = trainer.train(path)?;
//!     for record in &results.merges {
//!         println!("{} {}", record.left(), record.right());
//!     }
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, unused)]

pub mod corpus;
pub mod errors;
pub mod pretokenization;
pub mod regex;
pub mod symbols;
pub mod training;
pub mod types;

#[doc(inline)]
pub use errors::{PCResult, PairchipperError};
