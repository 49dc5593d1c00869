mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mnemo", about = "Vocabulary mnemonic manager", version)]
struct Cli {
    /// Data directory holding the store, imports and exports
    #[arg(long, global = true, env = "MNEMO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Recall mnemonics whose word or meaning contains any of the queries
    Recall {
        /// One or more search strings, each matched independently
        #[arg(required = true)]
        queries: Vec<String>,
        /// Match case exactly
        #[arg(long)]
        case_sensitive: bool,
    },

    /// Import mnemonics from a JSON batch or a store CSV
    Import {
        /// Import file (bare names are also looked up in the imports directory)
        path: PathBuf,
        /// Move the file into the processed-imports directory afterwards and
        /// refuse files already imported
        #[arg(long)]
        archive: bool,
    },

    /// Add a single mnemonic
    Add {
        #[arg(long)]
        word: String,
        #[arg(long)]
        meaning: String,
        #[arg(long, default_value = "")]
        transliteration: String,
        #[arg(long, default_value = "")]
        mnemonic: String,
        #[arg(long, default_value = "")]
        visual: String,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Export flashcards for Anki (front/back CSV without a header)
    Export {
        /// Put the meaning on the front of each card
        #[arg(long)]
        reverse: bool,
        /// Destination file (defaults to a timestamped file in the exports directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show the most recently added mnemonics, newest last
    #[command(alias = "last")]
    Recent {
        #[arg(default_value = "5")]
        n: usize,
    },

    /// Show study statistics
    Stats,

    /// Quiz yourself on a weighted random sample
    Sample {
        /// Number of cards (0 for all)
        #[arg(default_value = "10")]
        n: usize,
        /// Favor newer (> 0) or older (< 0) mnemonics
        #[arg(long, default_value = "0", allow_hyphen_values = true, value_parser = parse_bias)]
        bias: f64,
        /// Prompt with the meaning instead of the word
        #[arg(long)]
        english_first: bool,
    },

    /// List every mnemonic in the store
    List,
}

fn parse_bias(s: &str) -> Result<f64, String> {
    let bias: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if (-1.0..=1.0).contains(&bias) {
        Ok(bias)
    } else {
        Err(format!("bias must be between -1 and 1, got {}", bias))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::new(cli.data_dir)?;

    match cli.command {
        Command::Recall { queries, case_sensitive } => {
            commands::recall::run(&app, &queries, case_sensitive, &cli.format, use_color)?;
        }
        Command::Import { path, archive } => {
            commands::import::run(&mut app, &path, archive, &cli.format)?;
        }
        Command::Add { word, meaning, transliteration, mnemonic, visual, notes } => {
            let record = mnemo_lib::mnemonics::MnemonicRecord::new(word, meaning)
                .with_transliteration(transliteration)
                .with_mnemonic(mnemonic)
                .with_visual(visual)
                .with_notes(notes)
                .with_created_at(chrono::Utc::now().timestamp() as f64);
            commands::add::run(&mut app, record, &cli.format)?;
        }
        Command::Export { reverse, output } => {
            commands::export::run(&app, reverse, output, &cli.format)?;
        }
        Command::Recent { n } => {
            commands::recent::run(&app, n, &cli.format, use_color)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Command::Sample { n, bias, english_first } => {
            commands::sample::run(&app, n, bias, english_first, &cli.format, use_color)?;
        }
        Command::List => {
            commands::list::run(&app, &cli.format)?;
        }
    }

    Ok(())
}
