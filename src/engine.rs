use crate::config::EngineConfig;
use crate::content;
use crate::decision::adjustment;
use crate::error::ObservationError;
use crate::store;
use crate::types::{
    AdaptiveContent, ComplexityAdjustmentResult, ComplexityLevel, LearningProfile,
    PerformanceObservation, Recommendation,
};

/// Stateless engine facade.
///
/// Owns only its configuration; every operation takes a [`LearningProfile`]
/// snapshot and returns a new one, so concurrent use is safe and tests need
/// no shared state. Per-user write serialization lives in
/// [`crate::store::ProfileRegistry`].
#[derive(Debug, Clone, Default)]
pub struct AdaptiveEngine {
    config: EngineConfig,
}

impl AdaptiveEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(EngineConfig::from_env())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate and fold one observation into the profile: append to the
    /// subject and skill histories, refresh both recommendations and the
    /// derived content lists, and update the learning-rate trait.
    pub fn record_observation(
        &self,
        profile: &LearningProfile,
        observation: &PerformanceObservation,
    ) -> Result<LearningProfile, ObservationError> {
        match store::record_observation(profile, observation, &self.config) {
            Ok(updated) => Ok(updated),
            Err(err) => {
                tracing::warn!(
                    user_id = %observation.user_id,
                    content_id = %observation.content_id,
                    error = %err,
                    "observation rejected"
                );
                Err(err)
            }
        }
    }

    /// The stored recommendation for a subject, or for one of its skills
    /// when `skill_id` is given and known. Falls back from an unknown skill
    /// to the subject level.
    pub fn recommendation(
        &self,
        profile: &LearningProfile,
        subject_id: &str,
        skill_id: Option<&str>,
    ) -> Option<Recommendation> {
        let subject = profile.subject(subject_id)?;
        if let Some(skill) = skill_id.and_then(|id| subject.skills.get(id)) {
            return Some(Recommendation {
                level: skill.recommended_level,
                confidence: skill.confidence,
            });
        }
        Some(Recommendation {
            level: subject.recommended_level,
            confidence: subject.confidence,
        })
    }

    /// Like [`recommendation`](Self::recommendation) but always yields a
    /// level; an unknown subject maps to the starting level.
    pub fn recommend_level(
        &self,
        profile: &LearningProfile,
        subject_id: &str,
        skill_id: Option<&str>,
    ) -> ComplexityLevel {
        self.recommendation(profile, subject_id, skill_id)
            .map(|rec| rec.level)
            .unwrap_or_default()
    }

    /// Substitute the content's variants to match the recommended level. A
    /// no-op passthrough when adaptive content is disabled.
    pub fn adapt_content(
        &self,
        content: &AdaptiveContent,
        profile: &LearningProfile,
    ) -> AdaptiveContent {
        content::adapt_content(content, profile, &self.config)
    }

    /// Build the audit record for an accepted level change.
    pub fn record_adjustment(
        &self,
        user_id: impl Into<String>,
        content_id: impl Into<String>,
        previous_level: ComplexityLevel,
        new_level: ComplexityLevel,
        reason: impl Into<String>,
    ) -> ComplexityAdjustmentResult {
        adjustment::record_adjustment(user_id, content_id, previous_level, new_level, reason)
    }

    /// Caller-settable challenge-preference trait. Out-of-range values are
    /// rejected, matching the observation boundary.
    pub fn set_challenge_preference(
        &self,
        profile: &LearningProfile,
        value: f64,
    ) -> Result<LearningProfile, ObservationError> {
        if !value.is_finite() {
            return Err(ObservationError::NonFinite("challengePreference"));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(ObservationError::ChallengePreferenceOutOfRange(value));
        }
        let mut updated = profile.clone();
        updated.challenge_preference = value;
        Ok(updated)
    }
}
