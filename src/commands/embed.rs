//! Embed command - resumable embedding generation

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::embedder::OpenAiEmbedder;
use crate::processing::{EmbeddingPipeline, PipelineOptions, PipelineReport, RetryPolicy};
use crate::storage::{self, EmbeddingLog};
use crate::ui;

pub struct EmbedArgs {
    pub vocab: PathBuf,
    pub out: PathBuf,
    pub batch: usize,
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub sleep: f64,
    pub resume: bool,
    pub prompt: String,
    /// `None` retries forever
    pub max_retries: Option<u32>,
    pub timeout: u64,
}

impl EmbedArgs {
    fn pipeline_options(&self) -> PipelineOptions {
        let retry = match self.max_retries {
            Some(max) => RetryPolicy::bounded(max),
            None => RetryPolicy::unbounded(),
        };
        let prompt = Some(self.prompt.trim().to_string()).filter(|p| !p.is_empty());
        PipelineOptions {
            batch_size: self.batch,
            pacing: Duration::from_secs_f64(self.sleep),
            resume: self.resume,
            prompt,
            retry,
        }
    }
}

pub fn run(args: EmbedArgs) -> Result<PipelineReport> {
    let start = Instant::now();

    // credential problems must surface before any work is attempted
    let embedder = OpenAiEmbedder::new(
        args.api_key.as_deref(),
        &args.base_url,
        &args.model,
        Duration::from_secs(args.timeout.max(1)),
    )?;
    ui::debug(&format!("Using {} at {}", embedder.model(), embedder.endpoint()));

    let records = storage::json::load_vocabulary(&args.vocab)
        .with_context(|| format!("Failed to load vocabulary from {}", args.vocab.display()))?;
    let mut log = EmbeddingLog::open(&args.out)
        .with_context(|| format!("Failed to open {}", args.out.display()))?;

    let mut pipeline = EmbeddingPipeline::new(embedder, args.pipeline_options())?;
    let report = pipeline.run(&records, &mut log)?;

    if report.pending == 0 {
        ui::success("Nothing left to embed");
    } else {
        ui::success(&format!("Embedded {} words into {}", report.embedded, log.path().display()));
    }
    ui::summary(
        &[
            ("Embedded", report.embedded),
            ("Already logged", report.already_logged),
            ("Skipped", report.skipped),
            ("Retries", report.retries),
            ("Malformed lines", report.malformed_lines),
        ],
        start.elapsed().as_secs_f32(),
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> EmbedArgs {
        EmbedArgs {
            vocab: PathBuf::from("vocab.json"),
            out: PathBuf::from("out.jsonl"),
            batch: 8,
            model: "text-embedding-ada-002".into(),
            base_url: "http://localhost".into(),
            api_key: None,
            sleep: 0.5,
            resume: true,
            prompt: "  ".into(),
            max_retries: Some(3),
            timeout: 5,
        }
    }

    #[test]
    fn options_follow_arguments() {
        let options = args().pipeline_options();
        assert_eq!(options.batch_size, 8);
        assert_eq!(options.pacing, Duration::from_millis(500));
        assert_eq!(options.prompt, None);
        assert_eq!(options.retry.max_retries, Some(3));

        let forever = EmbedArgs { max_retries: None, prompt: "word".into(), ..args() };
        let options = forever.pipeline_options();
        assert_eq!(options.retry.max_retries, None);
        assert_eq!(options.prompt.as_deref(), Some("word"));
    }

    #[test]
    fn missing_key_fails_before_reading_input() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.jsonl");
        let err = run(EmbedArgs { out: out.clone(), ..args() }).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
        assert!(!out.exists());
    }
}
