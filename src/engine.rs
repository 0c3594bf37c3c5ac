// ABOUTME: Recommendation engine facade bundling safety, scoring, history, and adaptation
// ABOUTME: Exposes score, assess, generate, record_completion, history, and clear_history
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Recommendation Engine
//!
//! [`RecommendationEngine`] is the single entry point an embedding service
//! needs. All calls are synchronous; only the history store carries state.
//!
//! ```rust,no_run
//! use gymwise::engine::RecommendationEngine;
//! use gymwise::models::{FitnessLevel, UserProfile, WorkoutDefinition};
//!
//! let engine = RecommendationEngine::in_memory();
//! let profile = UserProfile::new("member-42");
//! let workout = WorkoutDefinition::new("Push-ups", FitnessLevel::Beginner, 3, 12);
//! let recommendation = engine.score(&workout, &profile)?;
//! println!("{} scored {}", recommendation.workout.name, recommendation.score);
//! # Ok::<(), gymwise::errors::AppError>(())
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use gymwise_core::errors::AppResult;
use gymwise_core::models::{UserProfile, UserProgressRecord, WorkoutDefinition, WorkoutHistory};
use gymwise_intelligence::{
    AdaptiveRecommendation, AdaptiveRecommender, HistoryStore, InMemoryHistoryStore,
    IntelligenceConfig, PersonalizationScorer, Recommendation, RecommendationContext,
    SafetyAssessment, SafetyAssessor, SafetyRuleBase, UserHealthProfile,
};
use tracing::debug;

/// Facade over the safety assessor, personalization scorer, history store
/// and adaptive recommender
pub struct RecommendationEngine<H: HistoryStore + ?Sized = InMemoryHistoryStore> {
    config: IntelligenceConfig,
    history: Arc<H>,
    scorer: PersonalizationScorer,
    recommender: AdaptiveRecommender<H>,
}

impl RecommendationEngine<InMemoryHistoryStore> {
    /// Engine with an in-memory history store and the global configuration
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_config(IntelligenceConfig::global().clone())
    }

    /// Engine with an in-memory history store and explicit configuration
    #[must_use]
    pub fn with_config(config: IntelligenceConfig) -> Self {
        let store = Arc::new(InMemoryHistoryStore::with_config(config.history.clone()));
        Self::with_store(store, config)
    }
}

impl<H: HistoryStore + ?Sized> RecommendationEngine<H> {
    /// Engine over an injected history store
    #[must_use]
    pub fn with_store(history: Arc<H>, config: IntelligenceConfig) -> Self {
        let scorer = PersonalizationScorer::with_config(config.personalization.clone());
        Self::assemble(history, config, scorer)
    }

    /// Replace the safety rule base used for assessment and scoring
    #[must_use]
    pub fn with_rule_base(self, rule_base: Arc<SafetyRuleBase>) -> Self {
        let scorer = self
            .scorer
            .with_assessor(SafetyAssessor::with_rule_base(rule_base));
        Self::assemble(self.history, self.config, scorer)
    }

    /// Pin "today" for age calculations instead of the system clock
    #[must_use]
    pub fn with_reference_date(self, date: NaiveDate) -> Self {
        let scorer = self.scorer.with_reference_date(date);
        Self::assemble(self.history, self.config, scorer)
    }

    fn assemble(
        history: Arc<H>,
        config: IntelligenceConfig,
        scorer: PersonalizationScorer,
    ) -> Self {
        let recommender = AdaptiveRecommender::with_config(
            Arc::clone(&history),
            scorer.clone(),
            config.adaptive.clone(),
        );
        Self {
            config,
            history,
            scorer,
            recommender,
        }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &IntelligenceConfig {
        &self.config
    }

    /// Score one workout for one member
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange`/`InvalidInput` for invalid profile numerics.
    pub fn score(
        &self,
        workout: &WorkoutDefinition,
        profile: &UserProfile,
    ) -> AppResult<Recommendation> {
        self.scorer.score(workout, profile)
    }

    /// Score a whole catalog, best first
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange`/`InvalidInput` for invalid profile numerics.
    pub fn score_all(
        &self,
        workouts: &[WorkoutDefinition],
        profile: &UserProfile,
    ) -> AppResult<Vec<Recommendation>> {
        self.scorer.score_all(workouts, profile)
    }

    /// Safety verdict for one workout and one health profile
    #[must_use]
    pub fn assess(
        &self,
        workout: &WorkoutDefinition,
        health: &UserHealthProfile,
    ) -> SafetyAssessment {
        self.scorer.assessor().assess(workout, health)
    }

    /// Ranked, context-adapted recommendations for the context's member
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange`/`InvalidInput` for invalid profile numerics.
    pub fn generate(
        &self,
        candidates: &[WorkoutDefinition],
        context: &RecommendationContext,
    ) -> AppResult<Vec<AdaptiveRecommendation>> {
        self.recommender.generate(candidates, context)
    }

    /// Log a completed workout
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for an empty user id and
    /// `ValueOutOfRange` for ratings outside 1-10.
    pub fn record_completion(&self, record: UserProgressRecord) -> AppResult<WorkoutHistory> {
        self.history.record_completion(record)
    }

    /// Snapshot of a member's history
    #[must_use]
    pub fn history(&self, user_id: &str) -> WorkoutHistory {
        self.history.history(user_id)
    }

    /// Erase a member's history; returns whether anything was stored
    pub fn clear_history(&self, user_id: &str) -> bool {
        debug!(user_id = %user_id, "Privacy erasure requested");
        self.history.clear(user_id)
    }
}
