//! # Storage
//!
//! Everything that touches disk: the CSV master list, the JSON and SQLite
//! assets, and the append-only embedding log.

pub mod csv;
pub mod json;
pub mod log;
pub mod sqlite;

pub use log::{load_records, read_ids, EmbeddingLog, ResumeSet};
