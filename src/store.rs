use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::config::EngineConfig;
use crate::decision::recommend::recommend;
use crate::engine::AdaptiveEngine;
use crate::error::ObservationError;
use crate::modeling::learning_rate::update_learning_rate;
use crate::types::{
    LearningProfile, PerformanceObservation, SkillAreaProfile, SubjectPreference,
};

/// Validate an observation, append it to the subject and skill histories and
/// run the recalculation step, returning the updated profile snapshot.
///
/// The input profile is never mutated; callers that need per-user
/// serialization go through [`ProfileRegistry`].
pub fn record_observation(
    profile: &LearningProfile,
    observation: &PerformanceObservation,
    config: &EngineConfig,
) -> Result<LearningProfile, ObservationError> {
    observation.validate()?;

    let learning_rate = profile.learning_rate;
    let challenge_preference = profile.challenge_preference;

    let mut updated = profile.clone();
    let subject = updated
        .subjects
        .entry(observation.subject_area.clone())
        .or_insert_with(|| SubjectPreference::new(&observation.subject_area));

    insert_sorted(&mut subject.observations, observation.clone());

    let skill = subject
        .skills
        .entry(observation.skill_area.clone())
        .or_insert_with(|| SkillAreaProfile::new(&observation.skill_area));
    insert_sorted(&mut skill.observations, observation.clone());

    // Recalculate the skill profile.
    if let Some(rec) = recommend(
        &skill.observations,
        skill.current_level,
        learning_rate,
        challenge_preference,
        config,
    ) {
        if rec.level != skill.recommended_level {
            tracing::info!(
                user_id = %observation.user_id,
                subject = %observation.subject_area,
                skill = %observation.skill_area,
                from = skill.recommended_level.as_str(),
                to = rec.level.as_str(),
                confidence = rec.confidence,
                "skill recommendation changed"
            );
        }
        skill.recommended_level = rec.level;
        skill.confidence = rec.confidence;
    }
    refresh_focus_lists(
        &skill.observations,
        &mut skill.strengths,
        &mut skill.improvement_areas,
        config,
    );

    // Recalculate the subject profile over the full subject history.
    if let Some(rec) = recommend(
        &subject.observations,
        subject.current_level,
        learning_rate,
        challenge_preference,
        config,
    ) {
        if rec.level != subject.recommended_level {
            tracing::info!(
                user_id = %observation.user_id,
                subject = %observation.subject_area,
                from = subject.recommended_level.as_str(),
                to = rec.level.as_str(),
                confidence = rec.confidence,
                "subject recommendation changed"
            );
        }
        subject.recommended_level = rec.level;
        subject.confidence = rec.confidence;
    }
    refresh_focus_lists(
        &subject.observations,
        &mut subject.strengths,
        &mut subject.improvement_areas,
        config,
    );

    let new_rate = update_learning_rate(learning_rate, &subject.observations);

    updated.learning_rate = new_rate;
    updated.last_updated = observation.timestamp;
    Ok(updated)
}

/// Histories stay sorted by timestamp ascending whatever the arrival order.
fn insert_sorted(history: &mut Vec<PerformanceObservation>, observation: PerformanceObservation) {
    let idx = history.partition_point(|o| o.timestamp <= observation.timestamp);
    history.insert(idx, observation);
}

/// Rebuild the derived strength / improvement-needed content lists from the
/// mean observed score per content id. A content id lands in at most one
/// list.
fn refresh_focus_lists(
    observations: &[PerformanceObservation],
    strengths: &mut Vec<String>,
    improvement_areas: &mut Vec<String>,
    config: &EngineConfig,
) {
    let mut totals: HashMap<&str, (f64, u32)> = HashMap::new();
    for obs in observations {
        let entry = totals.entry(obs.content_id.as_str()).or_insert((0.0, 0));
        entry.0 += obs.score;
        entry.1 += 1;
    }

    strengths.clear();
    improvement_areas.clear();
    for (content_id, (sum, count)) in totals {
        let mean = sum / count as f64;
        if mean >= config.recommender.raise_threshold {
            strengths.push(content_id.to_string());
        } else if mean < config.recommender.lower_threshold {
            improvement_areas.push(content_id.to_string());
        }
    }
    strengths.sort();
    improvement_areas.sort();
}

/// Concurrent per-user profile map.
///
/// Updates for one user are serialized through that user's mutex (the
/// profile update is a read-modify-write); different users proceed in
/// parallel with no shared mutable state beyond the map itself.
#[derive(Default)]
pub struct ProfileRegistry {
    profiles: RwLock<HashMap<String, Arc<Mutex<LearningProfile>>>>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observation against the (possibly new) profile of its user,
    /// serialized per user.
    pub fn ingest(
        &self,
        engine: &AdaptiveEngine,
        observation: &PerformanceObservation,
    ) -> Result<LearningProfile, ObservationError> {
        let slot = {
            let mut map = self.profiles.write();
            Arc::clone(map.entry(observation.user_id.clone()).or_insert_with(|| {
                Arc::new(Mutex::new(LearningProfile::new(&observation.user_id)))
            }))
        };

        let mut profile = slot.lock();
        let updated = engine.record_observation(&profile, observation)?;
        *profile = updated.clone();
        Ok(updated)
    }

    /// Clone of the current profile, if the user has one.
    pub fn snapshot(&self, user_id: &str) -> Option<LearningProfile> {
        let slot = {
            let map = self.profiles.read();
            map.get(user_id).map(Arc::clone)
        };
        slot.map(|s| s.lock().clone())
    }

    /// Replace (or seed) a user's profile, e.g. when loading persisted state.
    pub fn restore(&self, profile: LearningProfile) {
        let mut map = self.profiles.write();
        match map.entry(profile.user_id.clone()) {
            Entry::Occupied(slot) => *slot.get().lock() = profile,
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(profile)));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.read().is_empty()
    }
}
