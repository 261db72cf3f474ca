use crate::types::PerformanceObservation;

const SMOOTHING_RETAIN: f64 = 0.7;
const SMOOTHING_BLEND: f64 = 0.3;
const RATE_OFFSET: f64 = 0.1;
const RATE_SCALE: f64 = 5.0;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Update the learning-rate trait from the slope of score-over-time trends.
///
/// For each consecutive pair of observations with a positive time delta the
/// improvement rate is `score_delta / hours_delta`; the average rate is
/// normalized into [0, 1] and blended into the current trait with 70/30
/// exponential smoothing so a single outlier session cannot swing it.
///
/// Fewer than two observations, or no pair with a positive time delta, leave
/// the trait unchanged.
pub fn update_learning_rate(current: f64, history: &[PerformanceObservation]) -> f64 {
    if history.len() < 2 {
        return current;
    }

    let mut ordered: Vec<&PerformanceObservation> = history.iter().collect();
    ordered.sort_by_key(|obs| obs.timestamp);

    let mut improvement_rates = Vec::with_capacity(ordered.len() - 1);
    for pair in ordered.windows(2) {
        let hours_delta = (pair[1].timestamp - pair[0].timestamp) as f64 / MILLIS_PER_HOUR;
        if hours_delta > 0.0 {
            improvement_rates.push((pair[1].score - pair[0].score) / hours_delta);
        }
    }

    if improvement_rates.is_empty() {
        return current;
    }

    let avg_rate = improvement_rates.iter().sum::<f64>() / improvement_rates.len() as f64;
    let normalized = ((avg_rate + RATE_OFFSET) * RATE_SCALE).clamp(0.0, 1.0);

    current * SMOOTHING_RETAIN + normalized * SMOOTHING_BLEND
}
