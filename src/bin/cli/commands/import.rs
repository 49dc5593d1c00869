use std::path::Path;

use anyhow::{Context, Result};

use mnemo_lib::mnemonics::StoreError;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, path: &Path, archive: bool, format: &OutputFormat) -> Result<()> {
    let source = app.resolve_import_path(path);
    let archive_dir = archive.then(|| app.config.processed_dir.clone());

    let report = match app.store.bulk_import(&source, archive_dir.as_deref()) {
        Ok(report) => report,
        Err(StoreError::AlreadyImported { file_name, archive_dir }) => {
            log::warn!("Skipping {:?}: already imported", source);
            println!(
                "'{}' was already imported (see {}). Nothing to do.",
                file_name,
                archive_dir.display()
            );
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to import {}", source.display()));
        }
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Plain => {
            for (word, meaning) in &report.skipped_keys {
                println!("'{}' ({}) already exists. Skipping.", word, meaning);
            }
            println!(
                "Imported {} of {} mnemonics from {} ({} skipped).",
                report.inserted,
                report.total(),
                source.display(),
                report.skipped
            );
            if let Some(target) = &report.archived_to {
                println!("Moved to {}", target.display());
            }
        }
    }

    Ok(())
}
