//! # Embedding Service
//!
//! The seam between the pipeline and whatever produces vectors. A service
//! takes one batch of input strings and returns one vector per input, in
//! input order.

pub mod openai;

pub use openai::OpenAiEmbedder;

/// Transient failure reported by an embedding service
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EmbedError {
	#[error("rate limited: {0}")]
	RateLimited(String),

	#[error("service error: {0}")]
	Service(String),
}

pub trait EmbeddingService {
	/// Embed `inputs`, returning vectors positionally aligned with them.
	fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbedError>;
}

impl<S: EmbeddingService + ?Sized> EmbeddingService for &S {
	fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
		(**self).embed_batch(inputs)
	}
}
