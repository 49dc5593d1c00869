use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;

use mnemo_lib::mnemonics::export::default_export_path;
use mnemo_lib::mnemonics::CardOrientation;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, reverse: bool, output: Option<PathBuf>, format: &OutputFormat) -> Result<()> {
    let orientation = CardOrientation::from_reverse(reverse);
    let destination = output.unwrap_or_else(|| {
        default_export_path(&app.config.exports_dir, orientation, &Local::now())
    });

    let written = app
        .store
        .export_flashcards(&destination, orientation)
        .with_context(|| format!("Failed to export to {}", destination.display()))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": destination.to_string_lossy(),
                "cards": written,
                "reversed": reverse,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "Exported {} cards to {}{}",
                written,
                destination.display(),
                if reverse { " (reversed)" } else { "" }
            );
        }
    }

    Ok(())
}
