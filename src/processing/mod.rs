//! Processing pipeline: score scaling and batch embedding

pub mod pipeline;
pub mod scale;

pub use pipeline::{EmbeddingPipeline, PipelineOptions, PipelineReport, RetryPolicy};
pub use scale::{derive_thresholds, scale_scores, score_bounds, ScoreScale};
