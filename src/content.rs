use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::types::{AdaptiveContent, ComplexityLevel, LearningProfile};

/// Minimum confidence before a skill-specific recommendation overrides the
/// subject-level one.
const SKILL_CONFIDENCE_FLOOR: f64 = 0.7;
/// Minimum confidence before the subject-level recommendation is applied.
const SUBJECT_CONFIDENCE_FLOOR: f64 = 0.6;

/// Substitute a content item's variants to match the level recommended for
/// its subject / primary skill.
///
/// Idempotent: content already at the target level is returned unchanged.
/// With adaptation disabled, or no profile data for the content's subject,
/// this is a passthrough.
pub fn adapt_content(
    content: &AdaptiveContent,
    profile: &LearningProfile,
    config: &EngineConfig,
) -> AdaptiveContent {
    if !config.enable_adaptive_content {
        return content.clone();
    }

    let Some(target) = target_level(content, profile, config) else {
        return content.clone();
    };

    if content.complexity_level == target {
        return content.clone();
    }

    let mut adapted = content.clone();
    adapted.complexity_level = target;
    for element in &mut adapted.elements {
        element.selected_level = nearest_variant_level(&element.variants, target).unwrap_or(target);
    }

    tracing::debug!(
        content_id = %content.id,
        user_id = %profile.user_id,
        from = content.complexity_level.as_str(),
        to = target.as_str(),
        "content adapted"
    );

    adapted
}

/// Resolve the level to surface: skill-specific recommendation when it has
/// enough data and confidence, else the subject-level recommendation, else
/// the user's current level. Never undefined while the subject has a profile.
fn target_level(
    content: &AdaptiveContent,
    profile: &LearningProfile,
    config: &EngineConfig,
) -> Option<ComplexityLevel> {
    let subject = profile.subjects.get(&content.subject_area)?;
    let skill = content
        .primary_skill()
        .and_then(|skill_id| subject.skills.get(skill_id));

    if let Some(skill) = skill {
        if skill.observations.len() >= config.recommender.min_performance_data_points
            && skill.confidence >= SKILL_CONFIDENCE_FLOOR
        {
            return Some(skill.recommended_level);
        }
    }

    if subject.confidence >= SUBJECT_CONFIDENCE_FLOOR {
        return Some(subject.recommended_level);
    }

    Some(skill.map_or(subject.current_level, |s| s.current_level))
}

/// The variant level closest to `target` by rank distance, ties broken
/// toward the lower rank to avoid over-challenging on missing data. Linear
/// scan — variant maps are small.
pub fn nearest_variant_level(
    variants: &BTreeMap<ComplexityLevel, String>,
    target: ComplexityLevel,
) -> Option<ComplexityLevel> {
    if variants.contains_key(&target) {
        return Some(target);
    }
    variants
        .keys()
        .copied()
        .min_by_key(|level| (level.distance(target), level.rank()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variants(levels: &[ComplexityLevel]) -> BTreeMap<ComplexityLevel, String> {
        levels
            .iter()
            .map(|l| (*l, format!("body at {}", l.as_str())))
            .collect()
    }

    #[test]
    fn exact_variant_wins() {
        let v = variants(&[ComplexityLevel::Basic, ComplexityLevel::Intermediate]);
        assert_eq!(
            nearest_variant_level(&v, ComplexityLevel::Intermediate),
            Some(ComplexityLevel::Intermediate)
        );
    }

    #[test]
    fn closer_variant_beats_farther() {
        // Basic and Advanced are equidistant from Intermediate; the tie
        // breaks toward the lower rank.
        let v = variants(&[ComplexityLevel::Basic, ComplexityLevel::Advanced]);
        assert_eq!(
            nearest_variant_level(&v, ComplexityLevel::Intermediate),
            Some(ComplexityLevel::Basic)
        );

        let v = variants(&[ComplexityLevel::Foundational, ComplexityLevel::Advanced]);
        assert_eq!(
            nearest_variant_level(&v, ComplexityLevel::Expert),
            Some(ComplexityLevel::Advanced)
        );
    }

    #[test]
    fn empty_variant_map_yields_nothing() {
        let v = BTreeMap::new();
        assert_eq!(nearest_variant_level(&v, ComplexityLevel::Basic), None);
    }
}
