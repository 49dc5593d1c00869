use anyhow::{Context, Result};

use mnemo_lib::mnemonics::{InsertOutcome, MnemonicRecord};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, record: MnemonicRecord, format: &OutputFormat) -> Result<()> {
    let (word, meaning) = record.dedup_key();
    let outcome = app
        .store
        .insert(record)
        .with_context(|| format!("Failed to add '{}'", word))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "word": word,
                "meaning": meaning,
                "outcome": outcome,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => match outcome {
            InsertOutcome::Inserted => println!("Added: {} ({})", word, meaning),
            InsertOutcome::Skipped => {
                println!("'{}' ({}) already exists. Skipping.", word, meaning)
            }
        },
    }

    Ok(())
}
