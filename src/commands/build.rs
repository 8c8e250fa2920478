//! Build command - CSV master list to SQLite/JSON assets

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::record::{renumber, sort_records, SortKey};
use crate::core::{DifficultyLevel, Score, ThresholdBand, VocabularyRecord};
use crate::processing::{derive_thresholds, scale_scores, score_bounds};
use crate::storage;
use crate::ui;

pub struct BuildArgs {
    pub csv: PathBuf,
    pub db: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub sort_by: Option<SortKey>,
    pub renumber: bool,
    pub scaling: Option<ScalingArgs>,
}

pub struct ScalingArgs {
    pub target_min: i64,
    pub target_max: i64,
    pub alpha: f64,
    pub levels: Option<PathBuf>,
    pub thresholds_json: PathBuf,
}

pub fn run(args: BuildArgs) -> Result<Option<Vec<ThresholdBand>>> {
    let start = Instant::now();

    ui::info(&format!("Reading: {}", args.csv.display()));
    let mut records = storage::csv::read_csv(&args.csv)?;

    if let Some(key) = args.sort_by {
        sort_records(&mut records, key);
    }
    if args.renumber {
        renumber(&mut records);
    }

    // an unscored master list is unusable even when not rescaling
    let (min_score, max_score) = score_bounds(&records)?;
    ui::debug(&format!("Raw difficulty range: {}-{}", min_score, max_score));

    let mut thresholds = None;
    if let Some(scaling) = &args.scaling {
        ui::info(&format!(
            "Rescaling difficulty_score into {}-{} band (alpha={})",
            scaling.target_min, scaling.target_max, scaling.alpha
        ));
        let levels = match &scaling.levels {
            Some(path) => storage::json::load_levels(path)?,
            None => DifficultyLevel::defaults(),
        };
        let (scaled, scale) = scale_scores(records, scaling.alpha, scaling.target_min, scaling.target_max)?;
        records = scaled;

        let bands = derive_thresholds(&levels, &scale);
        print_thresholds(&bands, &scaled_scores(&records));
        ui::info(&format!("Writing thresholds to: {}", scaling.thresholds_json.display()));
        storage::json::write_thresholds(&bands, &scaling.thresholds_json)?;
        thresholds = Some(bands);
    }

    if let Some(db) = &args.db {
        ui::info(&format!("Writing {} records to SQLite: {}", records.len(), db.display()));
        storage::sqlite::write_vocabulary(&records, db)?;
    }
    if let Some(json) = &args.json {
        ui::info(&format!("Writing JSON asset: {}", json.display()));
        storage::json::write_vocabulary(&records, json)?;
    }

    let unscored = records.iter().filter(|r| r.difficulty_score.is_none()).count();
    ui::summary(
        &[("Records", records.len()), ("Unscored", unscored)],
        start.elapsed().as_secs_f32(),
    );
    Ok(thresholds)
}

fn scaled_scores(records: &[VocabularyRecord]) -> Vec<i64> {
    records
        .iter()
        .filter_map(|r| match r.difficulty_score {
            Some(Score::Int(v)) => Some(v),
            _ => None,
        })
        .collect()
}

fn print_thresholds(bands: &[ThresholdBand], scores: &[i64]) {
    let mut counts = vec![0usize; bands.len()];
    for &score in scores {
        if let Some(idx) = bands.iter().position(|b| score <= b.scaled_range[1]) {
            counts[idx] += 1;
        }
    }

    ui::header("Scaled difficulty thresholds");
    for (band, count) in bands.iter().zip(counts) {
        println!(
            "  {}: {}-{} ({} words)",
            band.label, band.scaled_range[0], band.scaled_range[1], count
        );
    }
    println!();
}

/// Resolve `--no-db` / `--no-json` into optional targets.
pub fn output_target(path: &Path, disabled: bool) -> Option<PathBuf> {
    (!disabled).then(|| path.to_path_buf())
}
