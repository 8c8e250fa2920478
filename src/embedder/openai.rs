//! OpenAI-compatible embeddings client

use std::time::Duration;

use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{EmbedError, EmbeddingService};
use crate::config::API_KEY_ENV;
use crate::error::LexisError;

/// Blocking client for `POST {base}/embeddings`. Retries are left to the caller.
#[derive(Clone)]
pub struct OpenAiEmbedder {
	client: Client,
	endpoint: String,
	model: String,
}

impl OpenAiEmbedder {
	pub fn new(api_key: Option<&str>, base_url: &str, model: &str, timeout: Duration) -> anyhow::Result<Self> {
		let api_key = api_key
			.map(str::trim)
			.filter(|key| !key.is_empty())
			.ok_or(LexisError::MissingCredential { var: API_KEY_ENV })?;
		anyhow::ensure!(!model.trim().is_empty(), "missing embedding model name");

		let mut headers = HeaderMap::new();
		headers.insert(
			AUTHORIZATION,
			HeaderValue::from_str(&format!("Bearer {}", api_key)).context("invalid API key")?,
		);
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		let client = Client::builder()
			.timeout(timeout)
			.default_headers(headers)
			.build()
			.context("failed to build embeddings HTTP client")?;

		Ok(Self {
			client,
			endpoint: format!("{}/embeddings", base_url.trim_end_matches('/')),
			model: model.trim().to_string(),
		})
	}

	pub fn model(&self) -> &str {
		&self.model
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}
}

impl EmbeddingService for OpenAiEmbedder {
	fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
		if inputs.is_empty() {
			return Ok(Vec::new());
		}
		let request = EmbeddingRequest { model: &self.model, input: inputs };
		let resp = self
			.client
			.post(&self.endpoint)
			.json(&request)
			.send()
			.map_err(|e| EmbedError::Service(e.to_string()))?;

		let status = resp.status();
		if !status.is_success() {
			let body = resp.text().unwrap_or_else(|_| "<body unavailable>".to_string());
			return Err(classify_status(status, body));
		}

		let parsed: EmbeddingResponse = resp
			.json()
			.map_err(|e| EmbedError::Service(format!("invalid embedding response: {}", e)))?;
		Ok(parsed.into_vectors())
	}
}

fn classify_status(status: StatusCode, body: String) -> EmbedError {
	if status == StatusCode::TOO_MANY_REQUESTS {
		EmbedError::RateLimited(body)
	} else {
		EmbedError::Service(format!("{}: {}", status, body))
	}
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
	model: &'a str,
	input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
	data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
	embedding: Vec<f32>,
	#[serde(default)]
	index: Option<usize>,
}

impl EmbeddingResponse {
	/// Order by the echoed `index` when the server provides one.
	fn into_vectors(mut self) -> Vec<Vec<f32>> {
		if self.data.iter().all(|d| d.index.is_some()) {
			self.data.sort_by_key(|d| d.index);
		}
		self.data.into_iter().map(|d| d.embedding).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_key_is_fatal() {
		let err = OpenAiEmbedder::new(None, "http://localhost", "m", Duration::from_secs(1)).err().unwrap();
		assert!(matches!(
			err.downcast_ref::<LexisError>(),
			Some(LexisError::MissingCredential { .. })
		));
		assert!(OpenAiEmbedder::new(Some("  "), "http://localhost", "m", Duration::from_secs(1)).is_err());
	}

	#[test]
	fn endpoint_joins_base() {
		let client = OpenAiEmbedder::new(Some("sk-test"), "http://localhost:9/v1/", "m", Duration::from_secs(1)).unwrap();
		assert_eq!(client.endpoint(), "http://localhost:9/v1/embeddings");
		assert_eq!(client.model(), "m");
	}

	#[test]
	fn response_is_reordered_by_index() {
		let raw = r#"{"data":[{"embedding":[2.0],"index":1},{"embedding":[1.0],"index":0}]}"#;
		let parsed: EmbeddingResponse = serde_json::from_str(raw).unwrap();
		assert_eq!(parsed.into_vectors(), vec![vec![1.0], vec![2.0]]);
	}

	#[test]
	fn request_shape() {
		let input = vec!["apple".to_string(), "pear".to_string()];
		let json = serde_json::to_string(&EmbeddingRequest { model: "m", input: &input }).unwrap();
		assert_eq!(json, r#"{"model":"m","input":["apple","pear"]}"#);
	}

	#[test]
	fn status_classification() {
		assert!(matches!(
			classify_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
			EmbedError::RateLimited(_)
		));
		assert!(matches!(
			classify_status(StatusCode::INTERNAL_SERVER_ERROR, String::new()),
			EmbedError::Service(_)
		));
		assert!(matches!(
			classify_status(StatusCode::UNAUTHORIZED, String::new()),
			EmbedError::Service(_)
		));
	}
}
