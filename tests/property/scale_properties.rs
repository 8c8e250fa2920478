use lexis::core::{DifficultyLevel, Score, VocabularyRecord};
use lexis::processing::{derive_thresholds, scale_scores, ScoreScale};
use proptest::prelude::*;

fn record(id: i64, raw: i64) -> VocabularyRecord {
    VocabularyRecord::new(id, format!("w{}", id), Some(Score::Int(raw)))
}

proptest! {
    #[test]
    fn scaling_is_monotonic_within_the_domain(
        alpha in 0.0f64..=10.0,
        lo in -5000.0f64..5000.0,
        width in 0.0f64..5000.0,
        t in 0.0f64..=1.0,
        u in 0.0f64..=1.0,
        target_min in -10_000i64..10_000,
        span in 1i64..20_000,
    ) {
        let scale = ScoreScale::new(lo, lo + width, alpha, target_min, target_min + span).unwrap();
        let (a, b) = (lo + t.min(u) * width, lo + t.max(u) * width);
        prop_assert!(scale.apply(a) <= scale.apply(b), "alpha {} raw {} > raw {}", alpha, a, b);
    }

    #[test]
    fn scaled_scores_stay_in_the_target_band(
        alpha in 0.0f64..=10.0,
        raws in prop::collection::vec(-100_000i64..100_000, 1..40),
        target_min in -10_000i64..10_000,
        span in 1i64..20_000,
    ) {
        let target_max = target_min + span;
        let records: Vec<_> = raws.iter().enumerate().map(|(i, &raw)| record(i as i64, raw)).collect();
        let (scaled, _) = scale_scores(records, alpha, target_min, target_max).unwrap();
        for r in &scaled {
            match r.difficulty_score {
                Some(Score::Int(v)) => prop_assert!((target_min..=target_max).contains(&v), "{} outside {}-{}", v, target_min, target_max),
                other => prop_assert!(false, "unexpected score {:?}", other),
            }
        }
    }

    #[test]
    fn thresholds_agree_with_record_scaling(
        alpha in 0.0f64..=10.0,
        lo in -5000i64..5000,
        width in 1i64..5000,
        start_off in 0i64..5000,
        end_off in 0i64..5000,
        target_min in -10_000i64..10_000,
        span in 1i64..20_000,
    ) {
        let hi = lo + width;
        let start = lo + start_off % (width + 1);
        let end = lo + end_off % (width + 1);
        let records = vec![record(1, lo), record(2, hi), record(3, start), record(4, end)];
        let (scaled, scale) = scale_scores(records, alpha, target_min, target_min + span).unwrap();
        let bands = derive_thresholds(&[DifficultyLevel::new("band", start, end)], &scale);

        prop_assert_eq!(bands[0].range, [start, end]);
        prop_assert_eq!(Some(Score::Int(bands[0].scaled_range[0])), scaled[2].difficulty_score);
        prop_assert_eq!(Some(Score::Int(bands[0].scaled_range[1])), scaled[3].difficulty_score);
    }
}
