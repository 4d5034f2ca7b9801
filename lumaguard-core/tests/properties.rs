//! Property tests for scoring, smoothing and ledger resolution

use lumaguard_core::{
    quality, DetectionResult, ExplorationLedger, SmootherConfig, TemporalSmoother,
    UncertaintyEngine, UncertaintyScore,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn score_stays_in_unit_interval(
        sharpness in -10.0f32..1e6,
        area in -10.0f32..1e6,
        detected in any::<bool>(),
    ) {
        let detection = if detected {
            DetectionResult::found(area, [1])
        } else {
            DetectionResult::none()
        };
        let (score, metrics) = UncertaintyEngine::default().score_measurements(sharpness, &detection);
        prop_assert!((0.0..=1.0).contains(&score.value()));
        prop_assert!((0.0..=1.0).contains(&metrics.quality_sharpness));
        prop_assert!((0.0..=1.0).contains(&metrics.quality_size));
    }

    #[test]
    fn detection_never_scores_worse_than_blind(
        sharpness in 0.0f32..1e4,
        area in 0.0f32..2e5,
    ) {
        let engine = UncertaintyEngine::default();
        let (seen, _) = engine.score_measurements(sharpness, &DetectionResult::found(area, [1]));
        prop_assert!(seen.value() <= UncertaintyScore::UNDETECTED.value() + 1e-6);
        prop_assert!(seen.value() >= 0.1 - 1e-6);
    }

    #[test]
    fn quality_is_monotone(a in -1e3f32..1e6, b in -1e3f32..1e6) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(quality(lo, 20.0, 300.0) <= quality(hi, 20.0, 300.0));
    }

    #[test]
    fn sharper_frames_score_lower(s1 in 0.0f32..500.0, s2 in 0.0f32..500.0, area in 0.0f32..2e5) {
        let engine = UncertaintyEngine::default();
        let detection = DetectionResult::found(area, [2]);
        let (lo, hi) = if s1 <= s2 { (s1, s2) } else { (s2, s1) };
        let (blurry, _) = engine.score_measurements(lo, &detection);
        let (sharp, _) = engine.score_measurements(hi, &detection);
        prop_assert!(sharp.value() <= blurry.value() + 1e-6);
    }

    #[test]
    fn smoothed_value_within_window_bounds(
        window in 1usize..=32,
        scores in prop::collection::vec(0.0f32..=1.0, 1..80),
    ) {
        let mut smoother = TemporalSmoother::new(SmootherConfig { window }).unwrap();
        for (i, &s) in scores.iter().enumerate() {
            let smoothed = smoother.update(UncertaintyScore::new(s));
            let start = (i + 1).saturating_sub(window);
            let recent = &scores[start..=i];
            let min = recent.iter().copied().fold(f32::INFINITY, f32::min);
            let max = recent.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            prop_assert!(smoothed >= min - 1e-5 && smoothed <= max + 1e-5);
            prop_assert!(smoother.len() <= window);
        }
    }

    #[test]
    fn resolve_picks_brightest_near_minimum(
        scores in prop::collection::vec(0.0f32..=1.0, 1..=16),
    ) {
        let mut ledger = ExplorationLedger::new(scores.len());
        for (i, &s) in scores.iter().enumerate() {
            ledger.record(i, s).unwrap();
        }
        let winner = ledger.resolve().unwrap();

        let min = scores.iter().copied().fold(f32::INFINITY, f32::min);
        prop_assert!((scores[winner] - min).abs() < 0.01);
        for (i, &s) in scores.iter().enumerate().skip(winner + 1) {
            prop_assert!((s - min).abs() >= 0.01, "index {} also ties", i);
        }
    }
}
