//! Mnemonic record store
//!
//! This module provides:
//! - The record table, persisted as CSV and rewritten on every insert
//! - Deduplicated single and bulk inserts (JSON batches or store CSVs)
//! - Substring recall over words and meanings
//! - Recency-weighted quiz sampling
//! - Study statistics and flashcard export

pub mod export;
pub mod import;
pub mod models;
pub mod sampling;
pub mod stats;
pub mod storage;

pub use models::*;
pub use storage::{MnemonicStore, StoreError};
