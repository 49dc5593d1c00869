//! Data models for the mnemonic store

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Column order of the persisted store
pub const STORE_COLUMNS: [&str; 7] = [
    "word",
    "transliteration",
    "meaning",
    "mnemonic",
    "visual",
    "notes",
    "createdAt",
];

/// One vocabulary entry with its study fields
///
/// The serde aliases accept the column headers written by the earlier
/// pandas-based tool, so old stores load without a migration step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MnemonicRecord {
    #[serde(alias = "Korean Word")]
    pub word: String,
    #[serde(default, alias = "Romanization")]
    pub transliteration: String,
    #[serde(alias = "Meaning")]
    pub meaning: String,
    #[serde(default, alias = "Mnemonic")]
    pub mnemonic: String,
    #[serde(default, alias = "Visual")]
    pub visual: String,
    #[serde(default, alias = "Notes")]
    pub notes: String,
    /// Epoch seconds; absent in stores written before timestamps existed
    #[serde(default, alias = "Timestamp")]
    pub created_at: Option<f64>,
}

impl MnemonicRecord {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            transliteration: String::new(),
            meaning: meaning.into(),
            mnemonic: String::new(),
            visual: String::new(),
            notes: String::new(),
            created_at: None,
        }
    }

    pub fn with_transliteration(mut self, transliteration: impl Into<String>) -> Self {
        self.transliteration = transliteration.into();
        self
    }

    pub fn with_mnemonic(mut self, mnemonic: impl Into<String>) -> Self {
        self.mnemonic = mnemonic.into();
        self
    }

    pub fn with_visual(mut self, visual: impl Into<String>) -> Self {
        self.visual = visual.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_created_at(mut self, created_at: f64) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// The `(word, meaning)` pair used to reject duplicate inserts
    pub fn dedup_key(&self) -> (String, String) {
        (self.word.clone(), self.meaning.clone())
    }

    /// Creation time as a UTC datetime, when the record carries one
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(timestamp_to_utc)
    }
}

/// Convert fractional epoch seconds into a UTC datetime
pub fn timestamp_to_utc(ts: f64) -> Option<DateTime<Utc>> {
    if !ts.is_finite() {
        return None;
    }
    let secs = ts.floor();
    let nanos = ((ts - secs) * 1e9).round() as u32;
    Utc.timestamp_opt(secs as i64, nanos.min(999_999_999)).single()
}

/// Result of a single insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InsertOutcome {
    Inserted,
    /// A record with the same `(word, meaning)` already exists
    Skipped,
}

/// Summary of a bulk import
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub inserted: usize,
    pub skipped: usize,
    /// `(word, meaning)` pairs that were already present
    pub skipped_keys: Vec<(String, String)>,
    /// Where the source file was moved, if it was archived
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_to: Option<std::path::PathBuf>,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.inserted + self.skipped
    }

    pub(crate) fn record(&mut self, outcome: InsertOutcome, key: (String, String)) {
        match outcome {
            InsertOutcome::Inserted => self.inserted += 1,
            InsertOutcome::Skipped => {
                self.skipped += 1;
                self.skipped_keys.push(key);
            }
        }
    }
}

/// Which side of a record is the front of an exported card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardOrientation {
    /// Front is the word, back holds the meaning and study fields
    #[default]
    WordFirst,
    /// Front is the meaning, back holds the word and study fields
    MeaningFirst,
}

impl CardOrientation {
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Self::MeaningFirst
        } else {
            Self::WordFirst
        }
    }
}

/// Aggregate statistics over the store
///
/// Metrics that are undefined for the current data (no timestamps, a single
/// session, a zero-length span) are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total_records: usize,
    pub distinct_words: usize,
    pub distinct_meanings: usize,
    pub missing_notes: usize,
    pub session_count: usize,
    pub most_recent_session: Option<DateTime<Utc>>,
    /// Mean gap in days between consecutive sessions
    pub mean_session_gap_days: Option<f64>,
    /// Standard deviation of session times, in days since the first session
    pub session_spread_days: Option<f64>,
    pub records_per_day: Option<f64>,
    pub records_per_session: Option<f64>,
    /// Mean records added per calendar week, empty weeks included
    pub records_per_week: Option<f64>,
}
