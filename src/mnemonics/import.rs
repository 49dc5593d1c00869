//! Import file parsing
//!
//! Three source shapes are accepted:
//! - a batch object `{"timestamp": <secs>, "mnemonics": [...]}` whose
//!   timestamp stamps every entry (one study session per batch)
//! - a bare array of entries, each optionally carrying its own `timestamp`
//! - a `.csv` table in the store schema

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::models::MnemonicRecord;
use super::storage::{read_table, Result, StoreError};

/// A parsed import file whose entries have not been validated yet
#[derive(Debug)]
pub enum ImportSource {
    Batch { timestamp: f64, entries: Vec<Value> },
    Flat(Vec<Value>),
    Table(Vec<MnemonicRecord>),
}

#[derive(Deserialize)]
struct ImportBatch {
    timestamp: f64,
    mnemonics: Vec<Value>,
}

/// One entry of a JSON import file
#[derive(Debug, Deserialize)]
struct ImportEntry {
    #[serde(alias = "korean_word")]
    word: String,
    #[serde(default, alias = "romanization")]
    transliteration: Option<String>,
    meaning: String,
    #[serde(default)]
    mnemonic: Option<String>,
    #[serde(default)]
    visual: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    timestamp: Option<f64>,
}

impl ImportEntry {
    fn into_record(self, created_at: f64) -> MnemonicRecord {
        MnemonicRecord {
            word: self.word.trim().to_string(),
            transliteration: self.transliteration.unwrap_or_default(),
            meaning: self.meaning.trim().to_string(),
            mnemonic: self.mnemonic.unwrap_or_default(),
            visual: self.visual.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            created_at: Some(created_at),
        }
    }
}

/// Read and classify an import file
pub fn read_import_source(path: &Path) -> Result<ImportSource> {
    let malformed = |reason: String| StoreError::MalformedImport {
        path: path.to_path_buf(),
        reason,
    };

    let is_csv = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        let file = fs::File::open(path)?;
        return read_table(file).map(ImportSource::Table).map_err(malformed);
    }

    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content).map_err(|e| malformed(e.to_string()))?;

    match value {
        Value::Array(entries) => Ok(ImportSource::Flat(entries)),
        Value::Object(_) => {
            let batch: ImportBatch =
                serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;
            Ok(ImportSource::Batch {
                timestamp: batch.timestamp,
                entries: batch.mnemonics,
            })
        }
        _ => Err(malformed(
            "expected a batch object or an array of entries".to_string(),
        )),
    }
}

impl ImportSource {
    /// Convert batch entries, stamping each with the shared timestamp
    pub fn batch_records(
        path: &Path,
        timestamp: f64,
        entries: Vec<Value>,
    ) -> Vec<Result<MnemonicRecord>> {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, value)| parse_entry(path, i, value).map(|e| e.into_record(timestamp)))
            .collect()
    }

    /// Convert flat entries, using `fallback` for entries without a timestamp
    pub fn flat_records(
        path: &Path,
        fallback: f64,
        entries: Vec<Value>,
    ) -> Vec<Result<MnemonicRecord>> {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                parse_entry(path, i, value).map(|e| {
                    let created_at = e.timestamp.unwrap_or(fallback);
                    e.into_record(created_at)
                })
            })
            .collect()
    }

    /// Trim and check store-schema rows the same way as JSON entries
    pub fn table_records(path: &Path, records: Vec<MnemonicRecord>) -> Vec<Result<MnemonicRecord>> {
        records
            .into_iter()
            .enumerate()
            .map(|(i, mut record)| {
                record.word = record.word.trim().to_string();
                record.meaning = record.meaning.trim().to_string();
                check_required(path, i, &record.word, &record.meaning)?;
                Ok(record)
            })
            .collect()
    }
}

fn parse_entry(path: &Path, index: usize, value: Value) -> Result<ImportEntry> {
    let malformed = |reason: String| StoreError::MalformedImport {
        path: path.to_path_buf(),
        reason: format!("entry {}: {}", index, reason),
    };

    let entry: ImportEntry =
        serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;
    check_required(path, index, entry.word.trim(), entry.meaning.trim())?;

    Ok(entry)
}

fn check_required(path: &Path, index: usize, word: &str, meaning: &str) -> Result<()> {
    let missing = if word.is_empty() {
        "empty word"
    } else if meaning.is_empty() {
        "empty meaning"
    } else {
        return Ok(());
    };

    Err(StoreError::MalformedImport {
        path: path.to_path_buf(),
        reason: format!("entry {}: {}", index, missing),
    })
}
