use uuid::Uuid;

use crate::types::{AdjustmentDirection, ComplexityAdjustmentResult, ComplexityLevel};

const MIN_RECORD_CONFIDENCE: f64 = 0.4;
const CONFIDENCE_PENALTY_PER_RANK: f64 = 0.2;

/// Appended to every record regardless of direction.
const MONITOR_STEP: &str = "Monitor engagement over the next few sessions";

/// Build the audit record for a level change.
///
/// Pure construction — nothing is recomputed. The asserted confidence is
/// penalized by rank distance: larger jumps are inherently riskier claims,
/// whatever the recommender's own confidence was.
pub fn record_adjustment(
    user_id: impl Into<String>,
    content_id: impl Into<String>,
    previous_level: ComplexityLevel,
    new_level: ComplexityLevel,
    reason: impl Into<String>,
) -> ComplexityAdjustmentResult {
    let rank_distance = previous_level.distance(new_level) as f64;
    let confidence =
        (1.0 - rank_distance * CONFIDENCE_PENALTY_PER_RANK).max(MIN_RECORD_CONFIDENCE);

    let result = ComplexityAdjustmentResult {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.into(),
        content_id: content_id.into(),
        previous_level,
        new_level,
        reason: reason.into(),
        confidence,
        timestamp: chrono::Utc::now().timestamp_millis(),
        next_steps: next_steps(AdjustmentDirection::from_levels(previous_level, new_level)),
    };

    tracing::info!(
        user_id = %result.user_id,
        content_id = %result.content_id,
        previous = previous_level.as_str(),
        new = new_level.as_str(),
        confidence = result.confidence,
        "complexity level adjusted"
    );

    result
}

fn next_steps(direction: AdjustmentDirection) -> Vec<String> {
    let mut steps: Vec<String> = match direction {
        AdjustmentDirection::Increase => vec![
            "Introduce stretch material at the new level".to_string(),
            "Invite the learner to explain recent concepts to a peer".to_string(),
        ],
        AdjustmentDirection::Decrease => vec![
            "Revisit foundational material before advancing again".to_string(),
            "Schedule additional scaffolded practice".to_string(),
        ],
        AdjustmentDirection::Unchanged => {
            vec!["Keep the current study plan in place".to_string()]
        }
    };
    steps.push(MONITOR_STEP.to_string());
    steps
}
