use serde::{Deserialize, Serialize};

/// Weights applied by the scoring function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringWeights {
    /// How strongly the learning-rate trait shifts the weighted average.
    pub learning_rate_weight: f64,
    /// How strongly the challenge-preference trait shifts the weighted average.
    pub challenge_preference_weight: f64,
    /// Reserved: balance of full-history evidence in a future blended score.
    pub performance_history_weight: f64,
    /// Reserved: balance of a recent-window score in a future blended score.
    pub recent_performance_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            learning_rate_weight: 0.2,
            challenge_preference_weight: 0.1,
            performance_history_weight: 0.4,
            recent_performance_weight: 0.3,
        }
    }
}

/// Thresholds and bounds for the level recommender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommenderParams {
    /// Minimum history length before any recommendation is made.
    pub min_performance_data_points: usize,
    /// Maximum rank change per recommendation.
    pub max_complexity_jump: i32,
    /// Score above which the level is raised.
    pub raise_threshold: f64,
    /// Score below which the level is lowered.
    pub lower_threshold: f64,
    /// Reserved: future threshold-based dampening of small adjustments.
    pub adjustment_threshold: f64,
}

impl Default for RecommenderParams {
    fn default() -> Self {
        Self {
            min_performance_data_points: 3,
            max_complexity_jump: 1,
            raise_threshold: 0.8,
            lower_threshold: 0.4,
            adjustment_threshold: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// When false the content adapter is a no-op passthrough.
    pub enable_adaptive_content: bool,
    pub scoring: ScoringWeights,
    pub recommender: RecommenderParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enable_adaptive_content: true,
            scoring: ScoringWeights::default(),
            recommender: RecommenderParams::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("ADAPT_ENABLE_ADAPTIVE_CONTENT") {
            config.enable_adaptive_content = val.parse().unwrap_or(true);
        }
        if let Ok(val) = std::env::var("ADAPT_MIN_DATA_POINTS") {
            config.recommender.min_performance_data_points = val.parse().unwrap_or(3);
        }
        if let Ok(val) = std::env::var("ADAPT_MAX_COMPLEXITY_JUMP") {
            config.recommender.max_complexity_jump = val.parse().unwrap_or(1);
        }
        if let Ok(val) = std::env::var("ADAPT_RAISE_THRESHOLD") {
            config.recommender.raise_threshold = val.parse().unwrap_or(0.8);
        }
        if let Ok(val) = std::env::var("ADAPT_LOWER_THRESHOLD") {
            config.recommender.lower_threshold = val.parse().unwrap_or(0.4);
        }
        if let Ok(val) = std::env::var("ADAPT_ADJUSTMENT_THRESHOLD") {
            config.recommender.adjustment_threshold = val.parse().unwrap_or(0.2);
        }
        if let Ok(val) = std::env::var("ADAPT_LEARNING_RATE_WEIGHT") {
            config.scoring.learning_rate_weight = val.parse().unwrap_or(0.2);
        }
        if let Ok(val) = std::env::var("ADAPT_CHALLENGE_WEIGHT") {
            config.scoring.challenge_preference_weight = val.parse().unwrap_or(0.1);
        }
        if let Ok(val) = std::env::var("ADAPT_HISTORY_WEIGHT") {
            config.scoring.performance_history_weight = val.parse().unwrap_or(0.4);
        }
        if let Ok(val) = std::env::var("ADAPT_RECENT_WEIGHT") {
            config.scoring.recent_performance_weight = val.parse().unwrap_or(0.3);
        }

        config
    }
}
