//! Vocabulary records as loaded from the master list
//!
//! Only `id`, `word` and `difficulty_score` have meaning to the core; every
//! other column rides along in `extra` and is written back out untouched,
//! after the three known fields and in its original column order.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Numeric difficulty score that remembers whether it was written as an integer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
	Int(i64),
	Float(f64),
}

impl Score {
	pub fn value(self) -> f64 {
		match self {
			Score::Int(v) => v as f64,
			Score::Float(v) => v,
		}
	}

	/// Parse a cell: integer first, float as fallback.
	pub fn parse(raw: &str) -> Option<Self> {
		if let Ok(v) = raw.parse::<i64>() {
			return Some(Score::Int(v));
		}
		raw.parse::<f64>().ok().filter(|v| v.is_finite()).map(Score::Float)
	}

	fn total_cmp(&self, other: &Self) -> Ordering {
		self.value().total_cmp(&other.value())
	}
}

impl std::fmt::Display for Score {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Score::Int(v) => write!(f, "{}", v),
			Score::Float(v) => write!(f, "{}", v),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyRecord {
	/// `None` when the source id is missing or not an integer
	#[serde(default, deserialize_with = "lenient_id")]
	pub id: Option<i64>,
	pub word: String,
	#[serde(default)]
	pub difficulty_score: Option<Score>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl VocabularyRecord {
	pub fn new(id: i64, word: impl Into<String>, difficulty_score: Option<Score>) -> Self {
		Self {
			id: Some(id),
			word: word.into(),
			difficulty_score,
			extra: Map::new(),
		}
	}

	/// Opaque text column, if present and a string.
	pub fn text_field(&self, key: &str) -> Option<&str> {
		self.extra.get(key).and_then(Value::as_str)
	}
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;
	Ok(value.as_i64())
}

/// Column a record set can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortKey {
	Id,
	Word,
	#[value(alias = "difficulty_score")]
	DifficultyScore,
}

/// Stable sort; missing values first, words compared case-insensitively.
pub fn sort_records(records: &mut [VocabularyRecord], key: SortKey) {
	match key {
		SortKey::Id => records.sort_by_key(|r| r.id),
		SortKey::Word => records.sort_by_cached_key(|r| r.word.to_lowercase()),
		SortKey::DifficultyScore => records.sort_by(|a, b| match (&a.difficulty_score, &b.difficulty_score) {
			(None, None) => Ordering::Equal,
			(None, Some(_)) => Ordering::Less,
			(Some(_), None) => Ordering::Greater,
			(Some(x), Some(y)) => x.total_cmp(y),
		}),
	}
}

/// Assign ids 1..=n in current order.
pub fn renumber(records: &mut [VocabularyRecord]) {
	for (idx, record) in records.iter_mut().enumerate() {
		record.id = Some(idx as i64 + 1);
	}
}
