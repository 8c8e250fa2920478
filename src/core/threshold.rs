//! Named difficulty bands over the raw score domain

use serde::{Deserialize, Serialize};

use crate::config::DIFFICULTY_LEVELS;

/// One configured raw band, e.g. `("基本", 101, 500)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyLevel {
	pub label: String,
	pub start: i64,
	pub end: i64,
}

impl DifficultyLevel {
	pub fn new(label: impl Into<String>, start: i64, end: i64) -> Self {
		Self { label: label.into(), start, end }
	}

	/// Built-in band table of the master list.
	pub fn defaults() -> Vec<Self> {
		DIFFICULTY_LEVELS
			.iter()
			.map(|&(label, start, end)| Self::new(label, start, end))
			.collect()
	}
}

/// Raw band plus the same band after rescaling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdBand {
	pub label: String,
	pub range: [i64; 2],
	pub scaled_range: [i64; 2],
}

/// First band whose scaled upper bound reaches `score`.
///
/// Scores above every band fall through to `None`.
pub fn band_for_scaled(bands: &[ThresholdBand], score: i64) -> Option<&ThresholdBand> {
	bands.iter().find(|band| score <= band.scaled_range[1])
}
