//! Difficulty score rescaling
//!
//! Raw scores are normalized against the observed domain, bent by a symmetric
//! soft curve `norm + alpha * norm * (1 - norm)`, clamped to `[0, 1]` and
//! stretched over the target band. Threshold bands go through the very same
//! function so they always agree with the rescaled records.

use crate::core::{DifficultyLevel, Score, ThresholdBand, VocabularyRecord};
use crate::error::{LexisError, Result};

/// Fitted remapping from raw scores into `[target_min, target_max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreScale {
    min_score: f64,
    max_score: f64,
    alpha: f64,
    target_min: i64,
    target_max: i64,
}

impl ScoreScale {
    pub fn new(min_score: f64, max_score: f64, alpha: f64, target_min: i64, target_max: i64) -> Result<Self> {
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(LexisError::InvalidAlpha { alpha });
        }
        if target_min >= target_max {
            return Err(LexisError::InvalidTargetRange { min: target_min, max: target_max });
        }
        Ok(Self {
            min_score,
            max_score,
            alpha,
            target_min,
            target_max,
        })
    }

    /// Fit the raw domain from every record that carries a score.
    pub fn fit(records: &[VocabularyRecord], alpha: f64, target_min: i64, target_max: i64) -> Result<Self> {
        let (min_score, max_score) = score_bounds(records)?;
        Self::new(min_score, max_score, alpha, target_min, target_max)
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min_score, self.max_score)
    }

    /// Map one raw value into the target band.
    pub fn apply(&self, value: f64) -> i64 {
        if self.max_score <= self.min_score {
            return self.target_min;
        }
        let norm = (value - self.min_score) / (self.max_score - self.min_score);
        let soft = (norm + self.alpha * norm * (1.0 - norm)).clamp(0.0, 1.0);
        let span = self.target_max as f64 - self.target_min as f64;
        // ties-to-even keeps output identical to previously built assets
        (self.target_min as f64 + soft * span).round_ties_even() as i64
    }

    pub fn apply_score(&self, score: Score) -> Score {
        Score::Int(self.apply(score.value()))
    }

    /// Rescale every scored record; unscored records pass through untouched.
    pub fn scale_records(&self, records: Vec<VocabularyRecord>) -> Vec<VocabularyRecord> {
        records
            .into_iter()
            .map(|mut record| {
                record.difficulty_score = record.difficulty_score.map(|s| self.apply_score(s));
                record
            })
            .collect()
    }

    pub fn thresholds(&self, levels: &[DifficultyLevel]) -> Vec<ThresholdBand> {
        levels
            .iter()
            .map(|level| ThresholdBand {
                label: level.label.clone(),
                range: [level.start, level.end],
                scaled_range: [self.apply(level.start as f64), self.apply(level.end as f64)],
            })
            .collect()
    }
}

/// Minimum and maximum raw score across scored records.
pub fn score_bounds(records: &[VocabularyRecord]) -> Result<(f64, f64)> {
    records
        .iter()
        .filter_map(|r| r.difficulty_score.map(Score::value))
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })
        .ok_or(LexisError::EmptyDomain)
}

/// Consume `records`, returning them rescaled along with the fitted scale.
pub fn scale_scores(
    records: Vec<VocabularyRecord>,
    alpha: f64,
    target_min: i64,
    target_max: i64,
) -> Result<(Vec<VocabularyRecord>, ScoreScale)> {
    let scale = ScoreScale::fit(&records, alpha, target_min, target_max)?;
    Ok((scale.scale_records(records), scale))
}

pub fn derive_thresholds(levels: &[DifficultyLevel], scale: &ScoreScale) -> Vec<ThresholdBand> {
    scale.thresholds(levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(id: i64, score: Score) -> VocabularyRecord {
        VocabularyRecord::new(id, format!("w{}", id), Some(score))
    }

    fn master_domain(alpha: f64) -> ScoreScale {
        ScoreScale::new(1.0, 3500.0, alpha, 5, 10000).unwrap()
    }

    #[test]
    fn linear_endpoints_and_midpoint() {
        let records = vec![
            scored(1, Score::Int(1)),
            scored(2, Score::Int(3500)),
            scored(3, Score::Float(1750.5)),
        ];
        let (scaled, scale) = scale_scores(records, 0.0, 5, 10000).unwrap();
        assert_eq!(scale.bounds(), (1.0, 3500.0));
        let scores: Vec<_> = scaled.iter().map(|r| r.difficulty_score).collect();
        assert_eq!(scores, [Some(Score::Int(5)), Some(Score::Int(10000)), Some(Score::Int(5002))]);
    }

    #[test]
    fn alpha_lifts_low_end_and_keeps_endpoints() {
        let linear = master_domain(0.0);
        let soft = master_domain(1.0);
        assert_eq!(soft.apply(1.0), 5);
        assert_eq!(soft.apply(3500.0), 10000);
        assert!(soft.apply(100.0) > linear.apply(100.0));
        // bump term peaks at norm = 0.5 where it adds 0.25
        assert_eq!(soft.apply(1750.5), 7501);
    }

    #[test]
    fn extreme_target_band_does_not_overflow() {
        let scale = ScoreScale::new(0.0, 1.0, 0.0, i64::MIN, i64::MAX).unwrap();
        assert_eq!(scale.apply(0.0), i64::MIN);
        assert_eq!(scale.apply(1.0), i64::MAX);
        assert!(scale.apply(0.5).abs() < 1 << 20);
    }

    #[test]
    fn output_is_monotonic_and_in_band() {
        for alpha in [0.0, 0.25, 0.5, 1.0, 2.0, 5.0] {
            let scale = master_domain(alpha);
            let mut prev = i64::MIN;
            for raw in (-50..=3600).map(|v| v as f64 * 0.97) {
                let out = scale.apply(raw);
                assert!((5..=10000).contains(&out), "alpha {} raw {} -> {}", alpha, raw, out);
                assert!(out >= prev, "alpha {} not monotonic at raw {}", alpha, raw);
                prev = out;
            }
        }
    }

    #[test]
    fn degenerate_domain_maps_to_target_min() {
        let records = vec![scored(1, Score::Int(7)), scored(2, Score::Int(7))];
        let (scaled, _) = scale_scores(records, 0.8, 5, 10000).unwrap();
        assert!(scaled.iter().all(|r| r.difficulty_score == Some(Score::Int(5))));
    }

    #[test]
    fn unscored_records_untouched() {
        let mut plain = VocabularyRecord::new(3, "gap", None);
        plain.extra.insert("meaning_1".into(), "隙間".into());
        let records = vec![scored(1, Score::Int(1)), plain.clone(), scored(2, Score::Int(9))];
        let (scaled, _) = scale_scores(records, 0.0, 5, 10000).unwrap();
        assert_eq!(scaled[1], plain);
    }

    #[test]
    fn empty_domain_is_an_error() {
        let records = vec![VocabularyRecord::new(1, "a", None)];
        assert!(matches!(scale_scores(records, 0.0, 5, 10000), Err(LexisError::EmptyDomain)));
        assert!(matches!(score_bounds(&[]), Err(LexisError::EmptyDomain)));
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(matches!(ScoreScale::new(1.0, 2.0, -0.1, 5, 10), Err(LexisError::InvalidAlpha { .. })));
        assert!(matches!(ScoreScale::new(1.0, 2.0, f64::NAN, 5, 10), Err(LexisError::InvalidAlpha { .. })));
        assert!(matches!(
            ScoreScale::new(1.0, 2.0, 0.0, 10, 10),
            Err(LexisError::InvalidTargetRange { min: 10, max: 10 })
        ));
    }

    #[test]
    fn thresholds_match_record_scaling() {
        let levels = DifficultyLevel::defaults();
        let records: Vec<_> = levels
            .iter()
            .flat_map(|l| [l.start, l.end])
            .enumerate()
            .map(|(i, raw)| scored(i as i64, Score::Int(raw)))
            .collect();
        let (scaled, scale) = scale_scores(records, 0.6, 5, 10000).unwrap();
        let bands = derive_thresholds(&levels, &scale);

        assert_eq!(bands.len(), levels.len());
        for (i, band) in bands.iter().enumerate() {
            assert_eq!(band.label, levels[i].label);
            assert_eq!(band.range, [levels[i].start, levels[i].end]);
            assert_eq!(Some(Score::Int(band.scaled_range[0])), scaled[2 * i].difficulty_score);
            assert_eq!(Some(Score::Int(band.scaled_range[1])), scaled[2 * i + 1].difficulty_score);
        }
        assert_eq!(bands[0].scaled_range[0], 5);
        assert_eq!(bands[7].scaled_range[1], 10000);
    }
}
