use std::path::PathBuf;

use clap::Parser;
use log::info;
use mchain_core::{ChainModel, RngIndexSource};

/// Generates text from a word-level Markov chain trained on a text file.
#[derive(Parser, Debug, PartialEq)]
#[command(name = "mchain-exemple")]
struct Options {
    /// Text file to train the chain on
    path: PathBuf,

    /// Number of chain steps (the output has one more word)
    #[arg(default_value_t = 100)]
    steps: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Print the transition table before the generated text
    #[arg(long)]
    show_chain: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug shows training statistics
    env_logger::init();

    let options = Options::parse();

    // Train the chain from the whole file
    let model = ChainModel::from_file(&options.path)?;
    info!("Loaded {} ({} words, {} prefixes)", options.path.display(), model.word_count(), model.prefix_count());

    if options.show_chain {
        print!("{model}");
    }

    // A seed makes the output reproducible
    let text = match options.seed {
        Some(seed) => model.generate(options.steps, &mut RngIndexSource::seeded(seed))?,
        None => model.generate(options.steps, &mut RngIndexSource::thread())?,
    };
    println!("{text}");

    Ok(())
}
