//! Core domain types

pub mod embedding;
pub mod record;
pub mod threshold;

pub use embedding::EmbeddingRecord;
pub use record::{Score, VocabularyRecord};
pub use threshold::{band_for_scaled, DifficultyLevel, ThresholdBand};
