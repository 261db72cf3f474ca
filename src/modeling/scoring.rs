use crate::config::ScoringWeights;
use crate::types::PerformanceObservation;

/// Returned whenever there is no usable evidence.
const NEUTRAL_SCORE: f64 = 0.5;

/// Aggregate a performance history into a single score in [0, 1].
///
/// Observations are weighted by recency (most recent first) and completion
/// rate, then the weighted average is shifted by the user's learning-rate and
/// challenge-preference traits. Input order is not trusted; the history is
/// sorted by timestamp descending internally.
///
/// Pure and deterministic: identical inputs always produce the same score.
pub fn performance_score(
    observations: &[PerformanceObservation],
    learning_rate: f64,
    challenge_preference: f64,
    weights: &ScoringWeights,
) -> f64 {
    if observations.is_empty() {
        return NEUTRAL_SCORE;
    }

    let mut ordered: Vec<&PerformanceObservation> = observations.iter().collect();
    ordered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let n = ordered.len() as f64;
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    for (i, obs) in ordered.iter().enumerate() {
        let recency_weight = (1.0 - i as f64 / n).max(0.0);
        let weight = recency_weight * obs.completion_rate;
        weighted_sum += obs.score * weight;
        weight_sum += weight;
    }

    let base = if weight_sum > 0.0 {
        weighted_sum / weight_sum
    } else {
        NEUTRAL_SCORE
    };

    let adjusted = base
        + (learning_rate - 0.5) * weights.learning_rate_weight
        + (challenge_preference - 0.5) * weights.challenge_preference_weight;

    adjusted.clamp(0.0, 1.0)
}
