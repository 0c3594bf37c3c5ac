// ABOUTME: Gymwise intelligence crate with safety rules, scoring, history, and adaptation
// ABOUTME: Pure recommendation engine split from the root crate for parallel compilation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Gymwise Intelligence
//!
//! Safety-aware adaptive workout recommendations:
//!
//! - [`safety`]: declarative rule base and the assessor interpreting it
//! - [`personalization`]: seven-factor scoring of catalog workouts
//! - [`history`]: per-member completion history with consistency scoring
//! - [`adaptive`]: context and progression aware re-ranking
//! - [`config`]: tunable weights, deltas and thresholds

/// Context-aware re-ranking of personalization output
pub mod adaptive;
/// Intelligence configuration
pub mod config;
/// Per-member progress history
pub mod history;
/// Seven-factor personalization scoring
pub mod personalization;
/// Safety rules and assessment
pub mod safety;

pub use adaptive::{
    AdaptiveRecommendation, AdaptiveRecommender, ProgressionState, RecommendationContext,
    RecoveryStatus,
};
pub use config::IntelligenceConfig;
pub use history::{HistoryStore, InMemoryHistoryStore};
pub use personalization::{FactorScores, PersonalizationScorer, Priority, Recommendation};
pub use safety::{
    PregnancyStatus, RiskLevel, SafetyAssessment, SafetyAssessor, SafetyRuleBase,
    UserHealthProfile,
};
