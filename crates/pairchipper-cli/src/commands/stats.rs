use std::io::Write;

use pairchipper::{
    symbols::SymbolSpan,
    training::{BpeTrainerOptions, compute_pair_stats, ranked_pairs},
};

use crate::{LogArgs, commands::corpus_args::CorpusArgs, input_output::OutputArgs};

/// Args for the stats command.
#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    #[clap(flatten)]
    corpus: CorpusArgs,

    /// Number of entries to print per section.
    #[arg(long, default_value = "20")]
    top: usize,

    #[clap(flatten)]
    logging: LogArgs,

    #[command(flatten)]
    output: OutputArgs,
}

fn span_text(span: &SymbolSpan) -> String {
    span.symbols()
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl StatsArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let trainer = self.corpus.init(BpeTrainerOptions::new(0))?;
        let table = trainer.count_corpus(self.corpus.file.as_path())?;
        let stats = compute_pair_stats(&table);

        let mut writer = self.output.open_writer()?;
        writeln!(
            writer,
            "# pre-tokens: {} distinct, {} total",
            table.len(),
            table.total_count()
        )?;
        for (span, count) in table.to_sorted_vec().into_iter().take(self.top) {
            writeln!(writer, "{count}\t{}", span_text(&span))?;
        }

        writeln!(writer, "# pairs: {} distinct", stats.len())?;
        for ((left, right), count) in ranked_pairs(&stats).into_iter().take(self.top) {
            writeln!(writer, "{count}\t{left} {right}")?;
        }
        writer.flush()?;

        Ok(())
    }
}
