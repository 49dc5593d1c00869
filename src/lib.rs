//! Vocabulary mnemonic manager
//!
//! Stores word records with their study aids in a local CSV table and
//! offers recall, recency-weighted quizzing, study statistics and flashcard
//! export on top of it.

pub mod config;
pub mod mnemonics;
