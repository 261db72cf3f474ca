//! Adaptive complexity engine for learning platforms.
//!
//! Decides, per user and per topic, what difficulty level of learning
//! content to present next, from a rolling history of performance
//! observations:
//!
//! - [`modeling::scoring`] - recency- and completion-weighted performance
//!   score over a history, shifted by personal traits
//! - [`decision::recommend`] - maps a score to a bounded level change with a
//!   confidence value
//! - [`modeling::learning_rate`] - exponential-smoothed learning-rate trait
//!   from score-over-time slopes
//! - [`content`] - substitutes per-level content variants to match the
//!   recommended level
//! - [`decision::adjustment`] - audit records for accepted level changes
//! - [`store`] - append-only performance histories and the per-user
//!   serialized [`store::ProfileRegistry`]
//!
//! The [`engine::AdaptiveEngine`] facade is stateless: operations take a
//! [`types::LearningProfile`] snapshot and return a new one. Persistence of
//! profiles and audit records is the caller's concern; every persisted shape
//! serializes through serde.

pub mod config;
pub mod content;
pub mod decision;
pub mod engine;
pub mod error;
pub mod modeling;
pub mod store;
pub mod types;

pub use config::{EngineConfig, RecommenderParams, ScoringWeights};
pub use engine::AdaptiveEngine;
pub use error::ObservationError;
pub use store::ProfileRegistry;
pub use types::*;
