//! Persisted embedding rows, one per line of the output log

use serde::{Deserialize, Serialize};

use super::record::{Score, VocabularyRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
	pub id: i64,
	pub word: String,
	pub difficulty_score: Option<Score>,
	pub embedding: Vec<f32>,
}

impl EmbeddingRecord {
	/// Pair a source record with its returned vector.
	pub fn new(id: i64, record: &VocabularyRecord, embedding: Vec<f32>) -> Self {
		Self {
			id,
			word: record.word.clone(),
			difficulty_score: record.difficulty_score,
			embedding,
		}
	}
}
