use thiserror::Error;

/// Rejection of an observation (or trait update) at the engine boundary.
///
/// The pure scoring and recommendation paths never return errors; only input
/// that has not yet entered the performance store can be invalid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObservationError {
    #[error("score {0} is outside [0, 1]")]
    ScoreOutOfRange(f64),
    #[error("completion rate {0} is outside [0, 1]")]
    CompletionRateOutOfRange(f64),
    #[error("time spent must be non-negative, got {0}")]
    NegativeTimeSpent(f64),
    #[error("attempt count must be at least 1")]
    ZeroAttempts,
    #[error("challenge preference {0} is outside [0, 1]")]
    ChallengePreferenceOutOfRange(f64),
    #[error("field {0} is not a finite number")]
    NonFinite(&'static str),
}
