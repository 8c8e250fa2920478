//! Typed errors for the scaling and embedding core

use crate::embedder::EmbedError;

#[derive(Debug, thiserror::Error)]
pub enum LexisError {
	#[error("no numeric difficulty_score values found")]
	EmptyDomain,

	#[error("scale alpha must be a finite value >= 0, got {alpha}")]
	InvalidAlpha { alpha: f64 },

	#[error("target range must satisfy min < max, got {min}-{max}")]
	InvalidTargetRange { min: i64, max: i64 },

	#[error("batch size must be at least 1")]
	InvalidBatchSize,

	#[error("embedding API key not set. Export {var} in your environment.")]
	MissingCredential { var: &'static str },

	#[error("embedding service returned {returned} vectors for {expected} inputs")]
	EmbeddingCountMismatch { expected: usize, returned: usize },

	#[error("gave up on words {start}-{end} after {attempts} attempts: {last}")]
	RetriesExhausted {
		start: usize,
		end: usize,
		attempts: u32,
		last: EmbedError,
	},

	#[error("embedding log I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("failed to encode embedding record: {0}")]
	Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LexisError>;
