use crate::config::EngineConfig;
use crate::modeling::scoring::performance_score;
use crate::types::{ComplexityLevel, PerformanceObservation, Recommendation};

/// Confidence split between evidence volume and score decisiveness.
const DATA_POINT_WEIGHT: f64 = 0.6;
const PERFORMANCE_WEIGHT: f64 = 0.4;

/// Map a performance history and the current level to a recommended level
/// plus a confidence value.
///
/// Returns `None` below `min_performance_data_points` — insufficient data is
/// a no-op, not an error; the caller keeps its previous recommendation. The
/// rank change per call is bounded by `max_complexity_jump`.
pub fn recommend(
    history: &[PerformanceObservation],
    current: ComplexityLevel,
    learning_rate: f64,
    challenge_preference: f64,
    config: &EngineConfig,
) -> Option<Recommendation> {
    let params = &config.recommender;
    if history.len() < params.min_performance_data_points {
        return None;
    }

    let score = performance_score(history, learning_rate, challenge_preference, &config.scoring);

    let current_rank = current.rank();
    let recommended_rank = if score > params.raise_threshold && current_rank < ComplexityLevel::MAX_RANK
    {
        (current_rank + params.max_complexity_jump).min(ComplexityLevel::MAX_RANK)
    } else if score < params.lower_threshold && current_rank > ComplexityLevel::MIN_RANK {
        (current_rank - params.max_complexity_jump).max(ComplexityLevel::MIN_RANK)
    } else {
        current_rank
    };

    let confidence = confidence_score(history.len(), score, params.min_performance_data_points);

    Some(Recommendation {
        level: ComplexityLevel::from_rank(recommended_rank),
        confidence,
    })
}

/// Confidence grows with more data and with scores that are decisively high
/// or low; a score near 0.5 is ambiguous and yields low confidence no matter
/// how much data backs it.
pub fn confidence_score(history_len: usize, score: f64, min_data_points: usize) -> f64 {
    let data_point_factor = (history_len as f64 / (2.0 * min_data_points as f64)).min(1.0);
    let performance_factor = ((score - 0.5).abs() * 2.0).min(1.0);
    data_point_factor * DATA_POINT_WEIGHT + performance_factor * PERFORMANCE_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(score: f64, timestamp: i64) -> PerformanceObservation {
        PerformanceObservation {
            user_id: "u1".to_string(),
            content_id: "c1".to_string(),
            subject_area: "math".to_string(),
            skill_area: "algebra".to_string(),
            score,
            time_spent_secs: 60.0,
            completion_rate: 1.0,
            attempt_count: 1,
            timestamp,
        }
    }

    fn history(scores: &[f64]) -> Vec<PerformanceObservation> {
        scores
            .iter()
            .enumerate()
            .map(|(i, s)| obs(*s, i as i64 + 1))
            .collect()
    }

    #[test]
    fn short_history_yields_nothing() {
        let config = EngineConfig::default();
        let two = history(&[0.9, 0.95]);
        assert!(recommend(&two, ComplexityLevel::Basic, 0.5, 0.5, &config).is_none());
    }

    #[test]
    fn strong_scores_raise_one_step() {
        let config = EngineConfig::default();
        let strong = history(&[0.9, 0.95, 0.92]);
        let rec = recommend(&strong, ComplexityLevel::Basic, 0.5, 0.5, &config).unwrap();
        assert_eq!(rec.level, ComplexityLevel::Intermediate);
        assert!(rec.confidence > 0.5, "confidence={}", rec.confidence);
    }

    #[test]
    fn weak_scores_lower_one_step() {
        let config = EngineConfig::default();
        let weak = history(&[0.2, 0.15, 0.25]);
        let rec = recommend(&weak, ComplexityLevel::Basic, 0.5, 0.5, &config).unwrap();
        assert_eq!(rec.level, ComplexityLevel::Foundational);
    }

    #[test]
    fn expert_never_raises_and_foundational_never_lowers() {
        let config = EngineConfig::default();
        let strong = history(&[0.95, 0.95, 0.95]);
        let weak = history(&[0.1, 0.1, 0.1]);
        let top = recommend(&strong, ComplexityLevel::Expert, 0.5, 0.5, &config).unwrap();
        assert_eq!(top.level, ComplexityLevel::Expert);
        let bottom = recommend(&weak, ComplexityLevel::Foundational, 0.5, 0.5, &config).unwrap();
        assert_eq!(bottom.level, ComplexityLevel::Foundational);
    }

    #[test]
    fn mid_scores_keep_the_level() {
        let config = EngineConfig::default();
        let mid = history(&[0.55, 0.6, 0.5]);
        let rec = recommend(&mid, ComplexityLevel::Advanced, 0.5, 0.5, &config).unwrap();
        assert_eq!(rec.level, ComplexityLevel::Advanced);
    }

    #[test]
    fn wider_jump_is_honored_but_capped() {
        let mut config = EngineConfig::default();
        config.recommender.max_complexity_jump = 3;
        let strong = history(&[0.95, 0.95, 0.95]);
        let rec = recommend(&strong, ComplexityLevel::Intermediate, 0.5, 0.5, &config).unwrap();
        // Rank 3 + 3 clamps at Expert.
        assert_eq!(rec.level, ComplexityLevel::Expert);
    }

    #[test]
    fn confidence_factors_combine() {
        // Full data, fully decisive score.
        assert!((confidence_score(6, 1.0, 3) - 1.0).abs() < 1e-12);
        // Full data, ambiguous score: capped by the data weight.
        assert!((confidence_score(6, 0.5, 3) - 0.6).abs() < 1e-12);
        // Minimal data, decisive score.
        assert!((confidence_score(3, 1.0, 3) - 0.7).abs() < 1e-12);
    }
}
