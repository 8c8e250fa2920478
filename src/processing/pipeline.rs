//! Resumable batch embedding pipeline
//!
//! Records not yet in the log are cut into fixed-size batches. Each batch is
//! one request; transient failures are retried with doubling backoff, and a
//! successful batch is appended and flushed before the next one starts.

use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use crate::config::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_RETRIES, INITIAL_BACKOFF, MAX_BACKOFF};
use crate::core::{EmbeddingRecord, VocabularyRecord};
use crate::embedder::{EmbedError, EmbeddingService};
use crate::error::{LexisError, Result};
use crate::storage::{EmbeddingLog, ResumeSet};
use crate::ui;

/// Backoff schedule for a failing batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    /// `None` retries until the service answers.
    pub max_retries: Option<u32>,
}

impl RetryPolicy {
    pub fn bounded(max_retries: u32) -> Self {
        Self {
            max_retries: Some(max_retries),
            ..Self::unbounded()
        }
    }

    pub fn unbounded() -> Self {
        Self {
            initial_backoff: INITIAL_BACKOFF,
            max_backoff: MAX_BACKOFF,
            max_retries: None,
        }
    }

    pub fn next_backoff(&self, current: Duration) -> Duration {
        current.saturating_mul(2).min(self.max_backoff)
    }

    fn allows(&self, retries_done: u32) -> bool {
        self.max_retries.map_or(true, |max| retries_done < max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::bounded(DEFAULT_MAX_RETRIES)
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub batch_size: usize,
    pub pacing: Duration,
    pub resume: bool,
    /// Appended to every word, separated by a space
    pub prompt: Option<String>,
    pub retry: RetryPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            pacing: Duration::ZERO,
            resume: true,
            prompt: None,
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Records selected for embedding this run
    pub pending: usize,
    /// Records skipped because their id was already logged
    pub already_logged: usize,
    /// Records without a usable integer id, or repeating an earlier id
    pub skipped: usize,
    pub embedded: usize,
    pub batches: usize,
    pub retries: usize,
    /// Unparseable lines met while reading the log
    pub malformed_lines: usize,
}

pub struct EmbeddingPipeline<S> {
    service: S,
    options: PipelineOptions,
    sleep: Box<dyn FnMut(Duration)>,
}

impl<S: EmbeddingService> EmbeddingPipeline<S> {
    pub fn new(service: S, options: PipelineOptions) -> Result<Self> {
        if options.batch_size == 0 {
            return Err(LexisError::InvalidBatchSize);
        }
        Ok(Self {
            service,
            options,
            sleep: Box::new(thread::sleep),
        })
    }

    /// Replace the blocking sleep used for backoff and pacing.
    pub fn with_sleeper(mut self, sleep: impl FnMut(Duration) + 'static) -> Self {
        self.sleep = Box::new(sleep);
        self
    }

    pub fn run(&mut self, records: &[VocabularyRecord], log: &mut EmbeddingLog) -> Result<PipelineReport> {
        let resume_set = if self.options.resume {
            log.resume_set()?
        } else {
            ResumeSet::default()
        };
        if resume_set.malformed() > 0 {
            ui::debug(&format!("Ignored {} malformed log lines", resume_set.malformed()));
        }

        let selection = select_pending(records, &resume_set);
        let total = selection.pending.len();
        let mut report = PipelineReport {
            pending: total,
            already_logged: selection.already_logged,
            skipped: selection.skipped,
            malformed_lines: resume_set.malformed(),
            ..Default::default()
        };

        ui::info(&format!("Embedding {} words (resume={})", total, self.options.resume));

        let batch_count = total.div_ceil(self.options.batch_size);
        let mut processed = 0;
        for (batch_no, batch) in selection.pending.chunks(self.options.batch_size).enumerate() {
            let start = processed + 1;
            let end = processed + batch.len();
            ui::info(&format!("Processing words {}-{} / {}", start, end, total));

            let inputs: Vec<String> = batch.iter().map(|(_, r)| self.input_text(&r.word)).collect();
            let vectors = self.request_with_retry(&inputs, start, end, &mut report)?;
            if vectors.len() != batch.len() {
                return Err(LexisError::EmbeddingCountMismatch {
                    expected: batch.len(),
                    returned: vectors.len(),
                });
            }

            let rows: Vec<EmbeddingRecord> = batch
                .iter()
                .zip(vectors)
                .map(|((id, record), vector)| EmbeddingRecord::new(*id, record, vector))
                .collect();
            log.append_batch(&rows)?;

            processed = end;
            report.embedded += rows.len();
            report.batches += 1;

            if batch_no + 1 < batch_count && !self.options.pacing.is_zero() {
                (self.sleep)(self.options.pacing);
            }
        }

        Ok(report)
    }

    fn input_text(&self, word: &str) -> String {
        match self.options.prompt.as_deref() {
            Some(prompt) => format!("{} {}", word, prompt).trim().to_string(),
            None => word.trim().to_string(),
        }
    }

    fn request_with_retry(
        &mut self,
        inputs: &[String],
        start: usize,
        end: usize,
        report: &mut PipelineReport,
    ) -> Result<Vec<Vec<f32>>> {
        let policy = self.options.retry;
        let mut backoff = policy.initial_backoff;
        let mut retries = 0u32;
        loop {
            let err = match self.service.embed_batch(inputs) {
                Ok(vectors) => return Ok(vectors),
                Err(err) => err,
            };
            if !policy.allows(retries) {
                return Err(LexisError::RetriesExhausted {
                    start,
                    end,
                    attempts: retries + 1,
                    last: err,
                });
            }
            match &err {
                EmbedError::RateLimited(_) => {
                    ui::warn(&format!("Rate limited, backing off {:.1}s", backoff.as_secs_f32()))
                }
                EmbedError::Service(msg) => ui::warn(&format!(
                    "Embedding service error: {} (retrying in {:.1}s)",
                    msg,
                    backoff.as_secs_f32()
                )),
            }
            (self.sleep)(backoff);
            backoff = policy.next_backoff(backoff);
            retries += 1;
            report.retries += 1;
        }
    }
}

struct Selection<'a> {
    pending: Vec<(i64, &'a VocabularyRecord)>,
    already_logged: usize,
    skipped: usize,
}

/// Records with an integer id not yet logged, in source order, first occurrence only.
fn select_pending<'a>(records: &'a [VocabularyRecord], resume_set: &ResumeSet) -> Selection<'a> {
    let mut seen = HashSet::new();
    let mut selection = Selection {
        pending: Vec::new(),
        already_logged: 0,
        skipped: 0,
    };
    for record in records {
        let Some(id) = record.id else {
            selection.skipped += 1;
            continue;
        };
        if resume_set.contains(id) {
            selection.already_logged += 1;
        } else if !seen.insert(id) {
            selection.skipped += 1;
        } else {
            selection.pending.push((id, record));
        }
    }
    selection
}
