//! Pretty JSON documents: vocabulary asset, threshold bands, level tables

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::{DifficultyLevel, ThresholdBand, VocabularyRecord};

fn write_pretty<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
	}
	let text = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
	fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
	let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
	serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

pub fn write_vocabulary(records: &[VocabularyRecord], path: &Path) -> Result<()> {
	write_pretty(records, path)
}

pub fn load_vocabulary(path: &Path) -> Result<Vec<VocabularyRecord>> {
	read_json(path)
}

pub fn write_thresholds(bands: &[ThresholdBand], path: &Path) -> Result<()> {
	write_pretty(bands, path)
}

pub fn load_thresholds(path: &Path) -> Result<Vec<ThresholdBand>> {
	anyhow::ensure!(path.exists(), "difficulty threshold file missing ({})", path.display());
	read_json(path)
}

/// Custom band table: `[{"label": "...", "start": 1, "end": 100}, ...]`
pub fn load_levels(path: &Path) -> Result<Vec<DifficultyLevel>> {
	let levels: Vec<DifficultyLevel> = read_json(path)?;
	anyhow::ensure!(!levels.is_empty(), "no difficulty levels in {}", path.display());
	Ok(levels)
}
