use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::ObservationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum ComplexityLevel {
    Foundational,
    Basic,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl ComplexityLevel {
    pub const MIN_RANK: i32 = 1;
    pub const MAX_RANK: i32 = 5;

    pub const ALL: [Self; 5] = [
        Self::Foundational,
        Self::Basic,
        Self::Intermediate,
        Self::Advanced,
        Self::Expert,
    ];

    pub fn rank(&self) -> i32 {
        match self {
            Self::Foundational => 1,
            Self::Basic => 2,
            Self::Intermediate => 3,
            Self::Advanced => 4,
            Self::Expert => 5,
        }
    }

    /// Nearest defined level for an arbitrary rank. Out-of-range ranks snap
    /// to the boundary levels.
    pub fn from_rank(rank: i32) -> Self {
        match rank.clamp(Self::MIN_RANK, Self::MAX_RANK) {
            1 => Self::Foundational,
            2 => Self::Basic,
            3 => Self::Intermediate,
            4 => Self::Advanced,
            _ => Self::Expert,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Foundational => "foundational",
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "foundational" => Self::Foundational,
            "basic" => Self::Basic,
            "advanced" => Self::Advanced,
            "expert" => Self::Expert,
            _ => Self::Intermediate,
        }
    }

    pub fn harder(&self) -> Self {
        Self::from_rank(self.rank() + 1)
    }

    pub fn easier(&self) -> Self {
        Self::from_rank(self.rank() - 1)
    }

    /// Absolute rank distance between two levels.
    pub fn distance(&self, other: Self) -> i32 {
        (self.rank() - other.rank()).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum ContentKind {
    #[default]
    Text,
    Video,
    Interactive,
    Quiz,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Video => "video",
            Self::Interactive => "interactive",
            Self::Quiz => "quiz",
        }
    }
}

/// One recorded outcome of a completed learning interaction. Immutable once
/// accepted; appended to the subject history and the skill history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceObservation {
    pub user_id: String,
    pub content_id: String,
    pub subject_area: String,
    pub skill_area: String,
    pub score: f64,
    pub time_spent_secs: f64,
    pub completion_rate: f64,
    pub attempt_count: u32,
    pub timestamp: i64,
}

impl PerformanceObservation {
    /// Boundary check. Out-of-range input is rejected, not clamped, so bad
    /// upstream data stays visible.
    pub fn validate(&self) -> Result<(), ObservationError> {
        if !self.score.is_finite() {
            return Err(ObservationError::NonFinite("score"));
        }
        if !self.completion_rate.is_finite() {
            return Err(ObservationError::NonFinite("completionRate"));
        }
        if !self.time_spent_secs.is_finite() {
            return Err(ObservationError::NonFinite("timeSpentSecs"));
        }
        if !(0.0..=1.0).contains(&self.score) {
            return Err(ObservationError::ScoreOutOfRange(self.score));
        }
        if !(0.0..=1.0).contains(&self.completion_rate) {
            return Err(ObservationError::CompletionRateOutOfRange(
                self.completion_rate,
            ));
        }
        if self.time_spent_secs < 0.0 {
            return Err(ObservationError::NegativeTimeSpent(self.time_spent_secs));
        }
        if self.attempt_count == 0 {
            return Err(ObservationError::ZeroAttempts);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAreaProfile {
    pub skill_id: String,
    pub current_level: ComplexityLevel,
    pub recommended_level: ComplexityLevel,
    pub confidence: f64,
    pub observations: Vec<PerformanceObservation>,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
}

impl SkillAreaProfile {
    pub fn new(skill_id: impl Into<String>) -> Self {
        Self {
            skill_id: skill_id.into(),
            current_level: ComplexityLevel::default(),
            recommended_level: ComplexityLevel::default(),
            confidence: 0.0,
            observations: Vec::new(),
            strengths: Vec::new(),
            improvement_areas: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectPreference {
    pub subject_id: String,
    pub current_level: ComplexityLevel,
    pub recommended_level: ComplexityLevel,
    pub confidence: f64,
    pub observations: Vec<PerformanceObservation>,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub skills: HashMap<String, SkillAreaProfile>,
}

impl SubjectPreference {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            current_level: ComplexityLevel::default(),
            recommended_level: ComplexityLevel::default(),
            confidence: 0.0,
            observations: Vec::new(),
            strengths: Vec::new(),
            improvement_areas: Vec::new(),
            skills: HashMap::new(),
        }
    }
}

/// Per-user adaptive state: one `SubjectPreference` per subject plus the two
/// personal traits. Created on the first observation for a user; the engine
/// never deletes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProfile {
    pub user_id: String,
    pub subjects: HashMap<String, SubjectPreference>,
    pub learning_rate: f64,
    pub challenge_preference: f64,
    pub last_updated: i64,
}

impl LearningProfile {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            subjects: HashMap::new(),
            learning_rate: 0.5,
            challenge_preference: 0.5,
            last_updated: 0,
        }
    }

    pub fn subject(&self, subject_id: &str) -> Option<&SubjectPreference> {
        self.subjects.get(subject_id)
    }

    pub fn skill(&self, subject_id: &str, skill_id: &str) -> Option<&SkillAreaProfile> {
        self.subjects.get(subject_id)?.skills.get(skill_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveElement {
    pub id: String,
    pub kind: ContentKind,
    /// Variant body per level. Need not cover every level.
    pub variants: BTreeMap<ComplexityLevel, String>,
    /// Which variant is currently surfaced.
    pub selected_level: ComplexityLevel,
}

impl AdaptiveElement {
    pub fn selected(&self) -> Option<&str> {
        self.variants.get(&self.selected_level).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveContent {
    pub id: String,
    pub subject_area: String,
    /// Tagged skill areas; the first entry is the primary skill.
    pub skill_areas: Vec<String>,
    pub complexity_level: ComplexityLevel,
    pub elements: Vec<AdaptiveElement>,
}

impl AdaptiveContent {
    pub fn primary_skill(&self) -> Option<&str> {
        self.skill_areas.first().map(String::as_str)
    }
}

/// The level recommender's output pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub level: ComplexityLevel,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentDirection {
    Increase,
    Decrease,
    Unchanged,
}

impl AdjustmentDirection {
    pub fn from_levels(previous: ComplexityLevel, new: ComplexityLevel) -> Self {
        match new.rank() - previous.rank() {
            d if d > 0 => Self::Increase,
            d if d < 0 => Self::Decrease,
            _ => Self::Unchanged,
        }
    }
}

/// Write-once audit record of a level change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityAdjustmentResult {
    pub id: String,
    pub user_id: String,
    pub content_id: String,
    pub previous_level: ComplexityLevel,
    pub new_level: ComplexityLevel,
    pub reason: String,
    pub confidence: f64,
    pub timestamp: i64,
    pub next_steps: Vec<String>,
}
