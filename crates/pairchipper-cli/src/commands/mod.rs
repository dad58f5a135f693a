mod chunks;
mod corpus_args;
mod stats;
mod train;

/// Subcommands for pchipper
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print the marker-aligned chunk boundaries of a corpus.
    Chunks(chunks::ChunksArgs),

    /// Print the most frequent pre-tokens and symbol pairs of a corpus.
    Stats(stats::StatsArgs),

    /// Train a merge list.
    Train(train::TrainArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Chunks(cmd) => cmd.run(),
            Commands::Stats(cmd) => cmd.run(),
            Commands::Train(cmd) => cmd.run(),
        }
    }
}
