//! Storage operations for mnemonic records
//!
//! The whole table lives in memory and is mirrored to a single CSV file:
//! ```text
//! {data-dir}/
//! ├── mnemonics.csv        # word,transliteration,meaning,mnemonic,visual,notes,createdAt
//! ├── imports/
//! │   └── processed/       # Consumed import files, one per batch
//! └── exports/
//!     └── flashcards_*.csv # Headerless front/back rows
//! ```
//! Every successful insert rewrites `mnemonics.csv` through a temp file in
//! the same directory, so a crash mid-write leaves the previous table intact.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use tempfile::NamedTempFile;
use thiserror::Error;

use super::export::write_flashcards;
use super::import::{read_import_source, ImportSource};
use super::models::*;
use super::sampling::{sampling_weights, weighted_sample_indices};
use super::stats::compute_stats;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Store file {} is corrupt: {reason}", .path.display())]
    CorruptStore { path: PathBuf, reason: String },

    #[error("Malformed import file {}: {reason}", .path.display())]
    MalformedImport { path: PathBuf, reason: String },

    #[error("'{file_name}' was already imported (found in {})", .archive_dir.display())]
    AlreadyImported {
        file_name: String,
        archive_dir: PathBuf,
    },

    #[error("Invalid record '{word}': {reason}")]
    InvalidRecord { word: String, reason: String },

    #[error("Requested {requested} records but the store only holds {available}")]
    InsufficientRecords { requested: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// In-memory record table mirrored to a CSV file
pub struct MnemonicStore {
    store_path: PathBuf,
    records: Vec<MnemonicRecord>,
    /// `(word, meaning)` pairs present in `records`
    index: HashSet<(String, String)>,
}

impl MnemonicStore {
    /// Load the store at `store_path`, or start an empty table if the file
    /// does not exist yet
    pub fn load(store_path: impl Into<PathBuf>) -> Result<Self> {
        let store_path = store_path.into();

        let mut records = if store_path.exists() {
            let file = fs::File::open(&store_path)?;
            read_table(file).map_err(|reason| StoreError::CorruptStore {
                path: store_path.clone(),
                reason,
            })?
        } else {
            log::debug!("No store at {:?}, starting empty", store_path);
            Vec::new()
        };

        sort_by_created_at(&mut records);

        let mut index = HashSet::with_capacity(records.len());
        for record in &records {
            if !index.insert(record.dedup_key()) {
                log::warn!(
                    "Store {:?} holds a duplicate entry for '{}' ({})",
                    store_path,
                    record.word,
                    record.meaning
                );
            }
        }

        log::debug!("Loaded {} records from {:?}", records.len(), store_path);

        Ok(Self {
            store_path,
            records,
            index,
        })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// All records, oldest first
    pub fn records(&self) -> &[MnemonicRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, word: &str, meaning: &str) -> bool {
        self.index.contains(&(word.to_string(), meaning.to_string()))
    }

    // ==================== Insert Operations ====================

    /// Insert a record unless its `(word, meaning)` pair is already present
    ///
    /// A successful insert rewrites the store file before returning.
    pub fn insert(&mut self, record: MnemonicRecord) -> Result<InsertOutcome> {
        if record.created_at.map_or(false, |t| !t.is_finite()) {
            return Err(StoreError::InvalidRecord {
                word: record.word,
                reason: "createdAt is not a finite number".to_string(),
            });
        }

        let key = record.dedup_key();
        if self.index.contains(&key) {
            log::debug!("'{}' ({}) already exists, skipping", key.0, key.1);
            return Ok(InsertOutcome::Skipped);
        }

        self.records.push(record);
        self.index.insert(key);

        // Keep memory and disk in step if the write fails
        if let Err(e) = self.persist() {
            if let Some(record) = self.records.pop() {
                self.index.remove(&record.dedup_key());
            }
            return Err(e);
        }

        Ok(InsertOutcome::Inserted)
    }

    /// Insert every record of an import file
    ///
    /// With `archive_dir` set, the source is moved there once all of its
    /// entries have been processed, and a source whose file name is already
    /// in `archive_dir` is rejected before anything is inserted. Inserts
    /// commit one at a time: a malformed entry stops the import but keeps
    /// the entries before it.
    pub fn bulk_import(
        &mut self,
        source: &Path,
        archive_dir: Option<&Path>,
    ) -> Result<ImportReport> {
        let file_name = source
            .file_name()
            .ok_or_else(|| StoreError::MalformedImport {
                path: source.to_path_buf(),
                reason: "path does not name a file".to_string(),
            })?
            .to_owned();

        if let Some(dir) = archive_dir {
            if dir.join(&file_name).exists() {
                return Err(StoreError::AlreadyImported {
                    file_name: file_name.to_string_lossy().into_owned(),
                    archive_dir: dir.to_path_buf(),
                });
            }
        }

        let import_time = chrono::Utc::now().timestamp() as f64;
        let entries = match read_import_source(source)? {
            ImportSource::Batch { timestamp, entries } => {
                log::debug!("Importing batch of {} from {:?}", entries.len(), source);
                ImportSource::batch_records(source, timestamp, entries)
            }
            ImportSource::Flat(entries) => {
                log::warn!(
                    "{:?} is a bare array; entries without a timestamp get the import time",
                    source
                );
                ImportSource::flat_records(source, import_time, entries)
            }
            ImportSource::Table(records) => ImportSource::table_records(source, records),
        };

        let mut report = ImportReport::default();
        for entry in entries {
            let record = entry?;
            let key = record.dedup_key();
            let outcome = self.insert(record)?;
            report.record(outcome, key);
        }

        if let Some(dir) = archive_dir {
            fs::create_dir_all(dir)?;
            let target = dir.join(&file_name);
            move_file(source, &target)?;
            log::info!("Moved {:?} to {:?}", source, target);
            report.archived_to = Some(target);
        }

        log::info!(
            "Imported {:?}: {} inserted, {} skipped",
            source,
            report.inserted,
            report.skipped
        );

        Ok(report)
    }

    // ==================== Query Operations ====================

    /// Records whose word or meaning contains `query`, in table order
    ///
    /// An empty result means nothing matched.
    pub fn recall(&self, query: &str, case_sensitive: bool) -> Vec<&MnemonicRecord> {
        self.recall_all(&[query], case_sensitive)
    }

    /// Union of the matches for each query, de-duplicated, in table order
    pub fn recall_all<S: AsRef<str>>(
        &self,
        queries: &[S],
        case_sensitive: bool,
    ) -> Vec<&MnemonicRecord> {
        let needles: Vec<String> = queries
            .iter()
            .map(|q| fold_case(q.as_ref(), case_sensitive))
            .collect();

        self.records
            .iter()
            .filter(|record| {
                let word = fold_case(&record.word, case_sensitive);
                let meaning = fold_case(&record.meaning, case_sensitive);
                needles.iter().any(|needle| {
                    word.contains(needle.as_str()) || meaning.contains(needle.as_str())
                })
            })
            .collect()
    }

    /// The `n` most recently added records, newest last
    pub fn recent(&self, n: usize) -> &[MnemonicRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Draw `count` distinct records at random, or every record when
    /// `count` is 0
    ///
    /// `bias` > 0 favors newer records, < 0 favors older ones, 0 is uniform.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        count: usize,
        bias: f64,
        rng: &mut R,
    ) -> Result<Vec<&MnemonicRecord>> {
        let available = self.records.len();
        if count > available {
            return Err(StoreError::InsufficientRecords {
                requested: count,
                available,
            });
        }
        let count = if count == 0 { available } else { count };

        let timestamps: Vec<Option<f64>> = self.records.iter().map(|r| r.created_at).collect();
        let weights = sampling_weights(&timestamps, bias);

        Ok(weighted_sample_indices(&weights, count, rng)
            .into_iter()
            .map(|i| &self.records[i])
            .collect())
    }

    pub fn stats(&self) -> StoreStats {
        compute_stats(&self.records)
    }

    // ==================== Export Operations ====================

    /// Write every record as a headerless front/back CSV row
    pub fn export_flashcards(
        &self,
        destination: &Path,
        orientation: CardOrientation,
    ) -> Result<usize> {
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = fs::File::create(destination)?;
        let written = write_flashcards(&self.records, orientation, file)?;

        log::info!("Exported {} cards to {:?}", written, destination);
        Ok(written)
    }

    // ==================== Persistence ====================

    /// Rewrite the whole table to the store file
    fn persist(&self) -> Result<()> {
        let parent = self
            .store_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        write_table(&self.records, temp.as_file())?;
        temp.persist(&self.store_path).map_err(|e| e.error)?;

        log::debug!("Wrote {} records to {:?}", self.records.len(), self.store_path);
        Ok(())
    }
}

/// Parse a store-schema CSV table
///
/// A zero-length input is an empty table. Returns a description of the
/// first problem found otherwise, including a `createdAt` that parses but
/// is not finite (`NaN`, `inf`).
pub(crate) fn read_table<R: io::Read>(
    reader: R,
) -> std::result::Result<Vec<MnemonicRecord>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = reader.headers().map_err(|e| e.to_string())?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    for (column, legacy) in [("word", "Korean Word"), ("meaning", "Meaning")] {
        if !headers.iter().any(|h| h == column || h == legacy) {
            return Err(format!("missing required column '{}'", column));
        }
    }

    let records = reader
        .deserialize::<MnemonicRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;

    if let Some((row, record)) = records
        .iter()
        .enumerate()
        .find(|(_, r)| r.created_at.map_or(false, |t| !t.is_finite()))
    {
        return Err(format!(
            "row {}: createdAt for '{}' is not a finite number",
            row + 1,
            record.word
        ));
    }

    Ok(records)
}

fn write_table<W: io::Write>(records: &[MnemonicRecord], writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(STORE_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Stable sort, oldest first; records without a timestamp come first
fn sort_by_created_at(records: &mut [MnemonicRecord]) {
    records.sort_by(|a, b| match (a.created_at, b.created_at) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (x, y) => x.is_some().cmp(&y.is_some()),
    });
}

fn fold_case(s: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        s.to_string()
    } else {
        s.to_lowercase()
    }
}

/// Rename, falling back to copy and delete across filesystems
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    fs::copy(from, to)?;
    fs::remove_file(from)
}
