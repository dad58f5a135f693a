//! # BPE Merge Trainer

use core::cmp::Ordering;

use dary_heap::OctonaryHeap;

use crate::{
    errors::{PCResult, PairchipperError},
    symbols::{FrequencyTable, SymbolPair, SymbolSpan},
    training::{
        MergeRecord,
        merge::apply_merge,
        pair_stats::{compute_pair_stats, ranked_pairs, select_best_pair},
        utility::PairSpanIndex,
    },
    types::CountType,
};

/// The state of a training run.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::VariantNames
)]
#[strum(serialize_all = "lowercase")]
pub enum TrainingState {
    /// More merges may follow.
    Running,

    /// No adjacent pairs remain; every span is a single symbol.
    Converged,

    /// The merge budget was reached.
    Done,
}

/// How pair frequencies are maintained between merges.
///
/// Both strategies produce identical merges and final tables.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::VariantNames
)]
#[strum(serialize_all = "lowercase")]
pub enum MergeStrategy {
    /// Recount all pairs, and rewrite the whole table, on every merge.
    Rescan,

    /// Maintain pair counts from merge deltas, with a lazily refreshed heap.
    #[default]
    Incremental,
}

/// Options for [`BpeTrainer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BpeTrainerOptions {
    /// The maximum number of merges to learn.
    pub num_merges: usize,

    /// The pair count maintenance strategy.
    pub strategy: MergeStrategy,
}

impl BpeTrainerOptions {
    /// Create new options.
    ///
    /// ## Arguments
    /// * `num_merges` - the merge budget.
    pub fn new(num_merges: usize) -> Self {
        Self {
            num_merges,
            strategy: MergeStrategy::default(),
        }
    }

    /// Sets the merge budget.
    pub fn with_num_merges(
        self,
        num_merges: usize,
    ) -> Self {
        Self { num_merges, ..self }
    }

    /// Sets the strategy.
    pub fn with_strategy(
        self,
        strategy: MergeStrategy,
    ) -> Self {
        Self { strategy, ..self }
    }

    /// Initializes a [`BpeTrainer`] from these options.
    pub fn init(self) -> BpeTrainer {
        BpeTrainer::new(self)
    }
}

/// The results of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainResults<C: CountType = u64> {
    /// The final, fully merged table.
    pub table: FrequencyTable<C>,

    /// The learned merges, in order.
    pub merges: Vec<MergeRecord<C>>,

    /// The terminal state; [`TrainingState::Converged`] or [`TrainingState::Done`].
    pub state: TrainingState,
}

/// Info about a [`SymbolPair`] that could be merged.
#[derive(Debug, Eq)]
pub struct MergeJob<C: CountType> {
    /// The number of instances of this pair in the corpus, when pushed.
    pub count: C,

    /// The pair to merge.
    pub pair: SymbolPair,
}

impl<C: CountType> MergeJob<C> {
    /// The job key.
    ///
    /// Max-heap by count; ties go to the greater pair.
    pub fn heap_key(&self) -> (C, &SymbolPair) {
        (self.count, &self.pair)
    }
}

impl<C: CountType> PartialEq for MergeJob<C> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.heap_key() == other.heap_key()
    }
}

impl<C: CountType> PartialOrd for MergeJob<C> {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: CountType> Ord for MergeJob<C> {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.heap_key().cmp(&other.heap_key())
    }
}

/// Logs training progress at every whole percent of the budget.
struct ProgressLog {
    num_merges: usize,
    last_percent: usize,
}

impl ProgressLog {
    fn new(num_merges: usize) -> Self {
        Self {
            num_merges,
            last_percent: 0,
        }
    }

    fn update<C: CountType>(
        &mut self,
        merges_done: usize,
        record: &MergeRecord<C>,
    ) {
        if self.num_merges == 0 {
            return;
        }
        let current_percent = (merges_done * 100) / self.num_merges;
        if current_percent > self.last_percent {
            log::info!(
                "Progress: {}% ({}/{} merges) - Last merge: {:?} + {:?} -> {:?} (frequency: {})",
                current_percent,
                merges_done,
                self.num_merges,
                record.left(),
                record.right(),
                record.merged(),
                record.frequency(),
            );
            self.last_percent = current_percent;
        }
    }
}

/// Trainer for learning an ordered BPE merge list.
#[derive(Debug, Clone)]
pub struct BpeTrainer {
    options: BpeTrainerOptions,
}

impl BpeTrainer {
    /// Initializes a [`BpeTrainer`].
    pub fn new(options: BpeTrainerOptions) -> Self {
        Self { options }
    }

    /// The trainer options.
    pub fn options(&self) -> &BpeTrainerOptions {
        &self.options
    }

    /// Learn up to ``options.num_merges`` merges over `table`.
    ///
    /// Each iteration:
    /// 1. stops as [`TrainingState::Converged`] when no adjacent pair remains;
    /// 2. stops as [`TrainingState::Done`] when the merge budget is spent;
    /// 3. otherwise merges the best pair (see [`crate::training::pair_rank`])
    ///    everywhere, and records it.
    ///
    /// Both terminal states are successes.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, table)))]
    pub fn train<C: CountType>(
        &self,
        table: FrequencyTable<C>,
    ) -> PCResult<TrainResults<C>> {
        log::info!(
            "Starting BPE training: up to {} merges over {} spans ({} strategy)",
            self.options.num_merges,
            table.len(),
            self.options.strategy,
        );
        if log::log_enabled!(log::Level::Debug) {
            let stats = compute_pair_stats(&table);
            for (rank, (pair, count)) in ranked_pairs(&stats).iter().take(16).enumerate() {
                log::debug!("pair #{rank}: {:?} + {:?} ({count})", pair.0, pair.1);
            }
        }

        let results = match self.options.strategy {
            MergeStrategy::Rescan => self.train_rescan(table),
            MergeStrategy::Incremental => self.train_incremental(table),
        }?;

        log::info!(
            "Finished training: {} merges completed ({})",
            results.merges.len(),
            results.state,
        );
        Ok(results)
    }

    fn train_rescan<C: CountType>(
        &self,
        table: FrequencyTable<C>,
    ) -> PCResult<TrainResults<C>> {
        let num_merges = self.options.num_merges;
        let mut progress = ProgressLog::new(num_merges);

        let mut table = table;
        let mut merges: Vec<MergeRecord<C>> = Vec::new();

        let mut state = TrainingState::Running;
        while state == TrainingState::Running {
            let stats = compute_pair_stats(&table);

            state = match select_best_pair(&stats) {
                Err(PairchipperError::EmptyVocabulary) => TrainingState::Converged,
                Err(err) => return Err(err),
                Ok(_) if merges.len() == num_merges => TrainingState::Done,
                Ok(pair) => {
                    let frequency = stats.get(&pair).copied().unwrap_or_default();
                    table = apply_merge(&table, &pair);

                    merges.push(MergeRecord::new(pair, frequency));
                    progress.update(merges.len(), &merges[merges.len() - 1]);
                    TrainingState::Running
                }
            };
        }

        Ok(TrainResults {
            table,
            merges,
            state,
        })
    }

    fn train_incremental<C: CountType>(
        &self,
        table: FrequencyTable<C>,
    ) -> PCResult<TrainResults<C>> {
        let num_merges = self.options.num_merges;
        let mut progress = ProgressLog::new(num_merges);

        let (mut spans, counts): (Vec<SymbolSpan>, Vec<C>) = table.into_iter().unzip();

        log::info!("Building pair index...");
        let mut index = PairSpanIndex::from_span_count_table(&spans, &counts);

        let zero = C::zero();

        log::info!("Building heap with {} unique pairs", index.pair_counts.len());
        let mut heap: OctonaryHeap<MergeJob<C>> = index
            .pair_counts
            .iter()
            .filter(|&(_, &count)| count > zero)
            .map(|(pair, &count)| MergeJob {
                count,
                pair: pair.clone(),
            })
            .collect();

        let mut merges: Vec<MergeRecord<C>> = Vec::new();

        let mut state = TrainingState::Running;
        while state == TrainingState::Running {
            let mut best: Option<MergeJob<C>> = None;
            while let Some(mut job) = heap.pop() {
                // Lazy refresh the job count.
                let current = index.count(&job.pair);
                if job.count != current {
                    job.count = current;
                    if job.count > zero {
                        heap.push(job);
                    }
                    continue;
                }
                best = Some(job);
                break;
            }

            state = match best {
                None => TrainingState::Converged,
                Some(_) if merges.len() == num_merges => TrainingState::Done,
                Some(job) => {
                    let record = MergeRecord::new(job.pair, job.count);

                    let increased =
                        index.merge_pair(&mut spans, &counts, record.pair(), record.merged());

                    // Pairs whose count grew need a fresh job;
                    // stale jobs for shrunk pairs are refreshed when popped.
                    for pair in increased {
                        let count = index.count(&pair);
                        if count > zero {
                            heap.push(MergeJob { count, pair });
                        }
                    }

                    merges.push(record);
                    progress.update(merges.len(), &merges[merges.len() - 1]);
                    TrainingState::Running
                }
            };
        }

        Ok(TrainResults {
            table: spans.into_iter().zip(counts).collect(),
            merges,
            state,
        })
    }
}

/// Learn up to `num_merges` merges over `table`, with the rescan strategy.
///
/// See [`BpeTrainer::train`].
pub fn train<C: CountType>(
    table: FrequencyTable<C>,
    num_merges: usize,
) -> PCResult<TrainResults<C>> {
    BpeTrainerOptions::new(num_merges)
        .with_strategy(MergeStrategy::Rescan)
        .init()
        .train(table)
}
