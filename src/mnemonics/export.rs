//! Flashcard export
//!
//! Cards are written as headerless two-column CSV rows (`front,back`), the
//! layout Anki's text importer expects. Fields on the back are separated by
//! blank lines so they render as paragraphs.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use super::models::{CardOrientation, MnemonicRecord};

/// Front and back text of the card for `record`
pub fn flashcard(record: &MnemonicRecord, orientation: CardOrientation) -> (String, String) {
    match orientation {
        CardOrientation::WordFirst => {
            let back = [
                format!("Transliteration: {}", record.transliteration),
                format!("Meaning: {}", record.meaning),
                format!("Mnemonic: {}", record.mnemonic),
                format!("Visual: {}", record.visual),
                format!("Notes: {}", record.notes),
            ]
            .join("\n\n");
            (record.word.clone(), back)
        }
        CardOrientation::MeaningFirst => {
            let back = [
                format!("Word: {} ({})", record.word, record.transliteration),
                format!("Mnemonic: {}", record.mnemonic),
                format!("Visual: {}", record.visual),
                format!("Notes: {}", record.notes),
            ]
            .join("\n\n");
            (record.meaning.clone(), back)
        }
    }
}

/// Write one card per record, returning how many were written
pub fn write_flashcards<W: io::Write>(
    records: &[MnemonicRecord],
    orientation: CardOrientation,
    writer: W,
) -> csv::Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for record in records {
        let (front, back) = flashcard(record, orientation);
        writer.write_record([front, back])?;
    }
    writer.flush()?;

    Ok(records.len())
}

/// Timestamped file name inside `exports_dir`, so earlier exports are kept
pub fn default_export_path<Tz: TimeZone>(
    exports_dir: &Path,
    orientation: CardOrientation,
    now: &DateTime<Tz>,
) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let suffix = match orientation {
        CardOrientation::WordFirst => "",
        CardOrientation::MeaningFirst => "_reversed",
    };
    exports_dir.join(format!("flashcards_{}{}.csv", now.format("%Y%m%d_%H%M%S"), suffix))
}
