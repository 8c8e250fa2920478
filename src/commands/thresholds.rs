//! Thresholds command - inspect scaled bands

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::core::band_for_scaled;
use crate::storage;
use crate::ui;

pub fn run(file: &Path, score: Option<i64>) -> Result<()> {
	let bands = storage::json::load_thresholds(file)?;
	ui::header("Difficulty thresholds");
	for band in &bands {
		println!(
			"  {} {}-{} {}",
			band.label.bright_white(),
			band.scaled_range[0],
			band.scaled_range[1],
			format!("(raw {}-{})", band.range[0], band.range[1]).dimmed()
		);
	}
	println!();

	if let Some(score) = score {
		match band_for_scaled(&bands, score) {
			Some(band) => ui::success(&format!("{} falls in {}", score, band.label)),
			None => ui::warn(&format!("{} is above every band", score)),
		}
	}
	Ok(())
}
