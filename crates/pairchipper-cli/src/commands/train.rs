use std::io::Write;

use pairchipper::training::{BpeTrainerOptions, MergeStrategy};

use crate::{LogArgs, commands::corpus_args::CorpusArgs, input_output::OutputArgs};

/// Args for the train command.
#[derive(clap::Args, Debug)]
pub struct TrainArgs {
    #[clap(flatten)]
    corpus: CorpusArgs,

    /// Maximum number of merges to learn.
    #[arg(long)]
    num_merges: usize,

    /// Pair count maintenance: "incremental" or "rescan".
    #[arg(long, default_value_t = MergeStrategy::Incremental)]
    strategy: MergeStrategy,

    /// Also write each merge's pair count.
    #[arg(long)]
    with_counts: bool,

    #[clap(flatten)]
    logging: LogArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl TrainArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let trainer = self.corpus.init(
            BpeTrainerOptions::new(self.num_merges).with_strategy(self.strategy),
        )?;

        log::info!("Training merges...");
        let results = trainer.train(self.corpus.file.as_path())?;
        log::info!(
            "{} merges, final state: {}",
            results.merges.len(),
            results.state
        );

        let mut writer = self.output.open_writer()?;
        for record in &results.merges {
            if self.with_counts {
                writeln!(writer, "{record} {}", record.frequency())?;
            } else {
                writeln!(writer, "{record}")?;
            }
        }
        writer.flush()?;

        Ok(())
    }
}
