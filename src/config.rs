//! Application configuration and constants

use std::time::Duration;

// === Difficulty Bands ===
/// Raw difficulty bands of the master list, lowest to highest.
pub const DIFFICULTY_LEVELS: &[(&str, i64, i64)] = &[
	("超基本", 1, 100),
	("基本", 101, 500),
	("中学", 501, 1000),
	("高校基礎", 1001, 1500),
	("高校標準", 1501, 2000),
	("高校上級", 2001, 2500),
	("大学", 2501, 3000),
	("最上級", 3001, 3500),
];

// === Scaling Defaults ===
pub const DEFAULT_TARGET_MIN: i64 = 5;
pub const DEFAULT_TARGET_MAX: i64 = 10000;
pub const DEFAULT_ALPHA: f64 = 0.0;

// === Embedding Defaults ===
pub const DEFAULT_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_PACING_SECS: f64 = 1.0;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 20;
pub const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
pub const MAX_BACKOFF: Duration = Duration::from_secs(10);

// === Environment ===
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "LEXIS_OPENAI_BASE";
pub const MODEL_ENV: &str = "LEXIS_OPENAI_MODEL";

// === Default Paths ===
pub const DEFAULT_CSV: &str = "vocabulary_new.csv";
pub const DEFAULT_DB: &str = "data/vocabulary.db";
pub const DEFAULT_JSON: &str = "data/vocabulary.json";
pub const DEFAULT_THRESHOLDS: &str = "data/difficulty-thresholds.json";
pub const DEFAULT_EMBEDDINGS: &str = "data/vocab-embeddings.jsonl";
