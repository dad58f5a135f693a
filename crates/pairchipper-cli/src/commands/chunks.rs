use std::io::Write;

use pairchipper::{corpus::chunk_ranges, training::BpeTrainerOptions};

use crate::{LogArgs, commands::corpus_args::CorpusArgs, input_output::OutputArgs};

/// Args for the chunks command.
#[derive(clap::Args, Debug)]
pub struct ChunksArgs {
    #[clap(flatten)]
    corpus: CorpusArgs,

    #[clap(flatten)]
    logging: LogArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl ChunksArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let trainer = self.corpus.init(BpeTrainerOptions::new(0))?;
        let boundaries = trainer.find_boundaries(self.corpus.file.as_path())?;

        let mut writer = self.output.open_writer()?;
        for (idx, range) in chunk_ranges(&boundaries).into_iter().enumerate() {
            writeln!(
                writer,
                "{idx}\t{}\t{}\t{}",
                range.start,
                range.end,
                range.end - range.start
            )?;
        }
        writer.flush()?;

        Ok(())
    }
}
