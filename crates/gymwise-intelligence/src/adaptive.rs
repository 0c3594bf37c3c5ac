// ABOUTME: Adaptive recommender re-scoring candidates against history and momentary context
// ABOUTME: Progression state machine, time and energy estimates, and confidence scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Context-aware workout recommendations
#![allow(clippy::cast_precision_loss)] // Safe: record counts are small
#![allow(clippy::cast_possible_truncation)] // Safe: estimates clamped before narrowing
#![allow(clippy::cast_sign_loss)] // Safe: estimates are non-negative

use std::fmt;
use std::sync::Arc;

use gymwise_core::constants::ratings::{MAX_RATING, MIN_RATING};
use gymwise_core::constants::scores::{MAX_SCORE, MIN_SCORE};
use gymwise_core::errors::AppResult;
use gymwise_core::models::{
    tags_overlap, FitnessLevel, UserProfile, WorkoutDefinition, WorkoutHistory,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::intelligence::{AdaptiveConfig, IntelligenceConfig};
use crate::history::HistoryStore;
use crate::personalization::{to_score, PersonalizationScorer, Priority, Recommendation};
use crate::safety::push_unique;

const HIIT_ENERGY_DELTA: f64 = 2.0;
const CARDIO_STRENGTH_ENERGY_DELTA: f64 = 1.0;
const MOBILITY_ENERGY_DELTA: f64 = -2.0;

/// Self-reported recovery state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryStatus {
    /// Fully recovered
    Fresh,
    /// Partially recovered
    #[default]
    Moderate,
    /// Still fatigued
    Tired,
}

/// Suggested direction of the next training intensity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionState {
    /// Recent sessions were easy with good form
    Increase,
    /// Keep the current intensity
    #[default]
    Maintain,
    /// Recent form broke down
    Decrease,
}

impl fmt::Display for ProgressionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Increase => "increase",
            Self::Maintain => "maintain",
            Self::Decrease => "decrease",
        })
    }
}

/// Momentary context supplied with a recommendation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationContext {
    /// Member profile
    pub profile: UserProfile,
    /// Minutes available for this session
    pub time_available_minutes: u32,
    /// Reported energy, 1-10 (clamped)
    pub energy_level: u8,
    /// Reported recovery state
    #[serde(default)]
    pub recovery_status: RecoveryStatus,
    /// Equipment the member can use right now
    #[serde(default)]
    pub equipment_available: Vec<String>,
    /// Goals for this session; replace the profile goal when present
    #[serde(default)]
    pub goals: Vec<String>,
}

impl RecommendationContext {
    /// Context with moderate recovery and no equipment or goals
    #[must_use]
    pub fn new(profile: UserProfile, time_available_minutes: u32, energy_level: u8) -> Self {
        Self {
            profile,
            time_available_minutes,
            energy_level: energy_level.clamp(MIN_RATING, MAX_RATING),
            recovery_status: RecoveryStatus::Moderate,
            equipment_available: Vec::new(),
            goals: Vec::new(),
        }
    }

    /// Set the recovery state
    #[must_use]
    pub const fn with_recovery(mut self, status: RecoveryStatus) -> Self {
        self.recovery_status = status;
        self
    }

    /// Add available equipment
    #[must_use]
    pub fn with_equipment(mut self, equipment: impl Into<String>) -> Self {
        self.equipment_available.push(equipment.into());
        self
    }

    /// Add a session goal
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goals.push(goal.into());
        self
    }

    /// Energy level clamped to the rating scale
    #[must_use]
    pub fn energy(&self) -> f64 {
        f64::from(self.energy_level.clamp(MIN_RATING, MAX_RATING))
    }

    /// Profile used for scoring, with session goals replacing the profile goal
    fn scoring_profile(&self) -> UserProfile {
        if self.goals.is_empty() {
            return self.profile.clone();
        }
        UserProfile {
            fitness_goal: Some(self.goals.join(" ")),
            ..self.profile.clone()
        }
    }
}

/// A personalization recommendation enriched with adaptive context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveRecommendation {
    /// Re-scored recommendation
    #[serde(flatten)]
    pub recommendation: Recommendation,
    /// Progression state derived from recent history
    pub progression: ProgressionState,
    /// How much history backs this recommendation, 0-100
    pub confidence: u8,
    /// Estimated session length (minutes)
    pub time_estimate_minutes: u32,
    /// Estimated energy demand, 1-10
    pub energy_requirement: f64,
}

/// Re-scores personalization output against history and context
pub struct AdaptiveRecommender<H: HistoryStore + ?Sized> {
    history: Arc<H>,
    scorer: PersonalizationScorer,
    config: AdaptiveConfig,
}

impl<H: HistoryStore + ?Sized> AdaptiveRecommender<H> {
    /// Recommender using global configuration
    #[must_use]
    pub fn new(history: Arc<H>) -> Self {
        Self::with_config(
            history,
            PersonalizationScorer::new(),
            IntelligenceConfig::global().adaptive.clone(),
        )
    }

    /// Recommender with explicit scorer and configuration
    #[must_use]
    pub const fn with_config(
        history: Arc<H>,
        scorer: PersonalizationScorer,
        config: AdaptiveConfig,
    ) -> Self {
        Self {
            history,
            scorer,
            config,
        }
    }

    /// The injected history store
    #[must_use]
    pub const fn history_store(&self) -> &Arc<H> {
        &self.history
    }

    /// The personalization scorer
    #[must_use]
    pub const fn scorer(&self) -> &PersonalizationScorer {
        &self.scorer
    }

    /// Rank candidates for the context's member, best first
    ///
    /// # Errors
    ///
    /// Returns the profile validation error, if any.
    pub fn generate(
        &self,
        candidates: &[WorkoutDefinition],
        context: &RecommendationContext,
    ) -> AppResult<Vec<AdaptiveRecommendation>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let profile = context.scoring_profile();
        let history = self.history.history(&profile.user_id);
        let progression = self.progression_for(&history);
        let confidence = self.confidence_for(&history);

        let mut recommendations = candidates
            .iter()
            .map(|workout| {
                let base = self.scorer.score(workout, &profile)?;
                Ok(self.adapt(base, context, progression, confidence))
            })
            .collect::<AppResult<Vec<_>>>()?;

        recommendations.sort_by(|a, b| b.recommendation.score.cmp(&a.recommendation.score));

        info!(
            user_id = %profile.user_id,
            candidates = candidates.len(),
            %progression,
            confidence,
            "Generated adaptive recommendations"
        );
        Ok(recommendations)
    }

    /// Progression state from the most recent records only
    #[must_use]
    pub fn progression_for(&self, history: &WorkoutHistory) -> ProgressionState {
        let rules = &self.config.progression;
        let recent = history.recent(rules.window);
        if recent.len() < rules.window {
            return ProgressionState::Maintain;
        }

        let count = recent.len() as f64;
        let avg_difficulty = recent
            .iter()
            .map(|r| f64::from(r.performance.difficulty))
            .sum::<f64>()
            / count;
        let avg_form = recent
            .iter()
            .map(|r| f64::from(r.performance.form))
            .sum::<f64>()
            / count;

        if avg_form < rules.decrease_form_below {
            ProgressionState::Decrease
        } else if avg_difficulty < rules.increase_difficulty_below
            && avg_form > rules.good_form_above
        {
            ProgressionState::Increase
        } else {
            if avg_difficulty > rules.maintain_difficulty_above && avg_form > rules.good_form_above
            {
                debug!(avg_difficulty, avg_form, "Challenging with clean form, holding level");
            }
            ProgressionState::Maintain
        }
    }

    /// Confidence from the amount and regularity of history
    #[must_use]
    pub fn confidence_for(&self, history: &WorkoutHistory) -> u8 {
        let rules = &self.config.confidence;
        let mut confidence = rules.base;
        if history.total_workouts > rules.experienced_workouts {
            confidence += rules.history_bonus;
        }
        if history.consistency_score > rules.consistency_threshold {
            confidence += rules.consistency_bonus;
        }
        to_score(confidence)
    }

    /// Estimated minutes for a workout given the member's experience
    #[must_use]
    pub fn time_estimate(&self, workout: &WorkoutDefinition, experience: FitnessLevel) -> u32 {
        let rules = &self.config.time_estimate;
        let raw = rules.base_minutes
            + f64::from(workout.sets) * rules.minutes_per_set
            + f64::from(workout.reps) * rules.minutes_per_rep;
        let level = match workout.difficulty {
            FitnessLevel::Beginner => rules.beginner_workout_multiplier,
            FitnessLevel::Intermediate => rules.intermediate_workout_multiplier,
            FitnessLevel::Advanced => rules.advanced_workout_multiplier,
        };
        let member = match experience {
            FitnessLevel::Beginner => rules.beginner_member_multiplier,
            FitnessLevel::Intermediate => 1.0,
            FitnessLevel::Advanced => rules.advanced_member_multiplier,
        };
        (raw * level * member).round().max(0.0) as u32
    }

    /// Estimated energy demand of a workout on the 1-10 scale
    #[must_use]
    pub fn energy_requirement(&self, workout: &WorkoutDefinition) -> f64 {
        let rules = &self.config.energy;
        let mut energy = rules.base;
        energy += match workout.difficulty {
            FitnessLevel::Beginner => rules.beginner_delta,
            FitnessLevel::Intermediate => 0.0,
            FitnessLevel::Advanced => rules.advanced_delta,
        };
        if workout.goal_mentions(&["hiit"]) {
            energy += HIIT_ENERGY_DELTA;
        } else if workout.goal_mentions(&["cardio", "strength"]) {
            energy += CARDIO_STRENGTH_ENERGY_DELTA;
        } else if workout.goal_mentions(&["flexibility", "stretching", "mobility"]) {
            energy += MOBILITY_ENERGY_DELTA;
        }
        if workout.sets > rules.high_volume_sets {
            energy += rules.high_volume_delta;
        }
        if workout.reps > rules.high_rep_threshold {
            energy += rules.high_rep_delta;
        }
        energy.clamp(f64::from(MIN_RATING), f64::from(MAX_RATING))
    }

    fn adapt(
        &self,
        base: Recommendation,
        context: &RecommendationContext,
        progression: ProgressionState,
        confidence: u8,
    ) -> AdaptiveRecommendation {
        let adjustments = &self.config.adjustments;
        let mut recommendation = base;
        let workout = &recommendation.workout;
        let experience = context
            .profile
            .experience_level
            .unwrap_or(FitnessLevel::Intermediate);
        let mut score = f64::from(recommendation.score);
        let mut reasons = Vec::new();
        let mut warnings = Vec::new();

        match (progression, workout.difficulty) {
            (ProgressionState::Increase, FitnessLevel::Beginner) => {
                score += adjustments.increase_on_beginner;
                warnings.push(
                    "Recent sessions felt easy; this workout may be below your level".to_owned(),
                );
            }
            (ProgressionState::Increase, FitnessLevel::Advanced) => {
                score += adjustments.increase_on_advanced;
                reasons.push("Your recent performance supports a harder workout".to_owned());
            }
            (ProgressionState::Decrease, FitnessLevel::Advanced) => {
                score += adjustments.decrease_on_advanced;
                warnings.push("Recent form suggests easing off advanced work".to_owned());
            }
            _ => {}
        }

        match (context.recovery_status, workout.difficulty) {
            (RecoveryStatus::Tired, FitnessLevel::Advanced) => {
                score += adjustments.tired_on_advanced;
                warnings.push("You reported feeling tired; consider a lighter session".to_owned());
            }
            (RecoveryStatus::Fresh, FitnessLevel::Beginner) => {
                score += adjustments.fresh_on_beginner;
                warnings.push(
                    "You are well recovered; a more demanding workout may suit you better"
                        .to_owned(),
                );
            }
            _ => {}
        }

        let time_estimate = self.time_estimate(workout, experience);
        let available = f64::from(context.time_available_minutes);
        if f64::from(time_estimate) > available {
            score += adjustments.over_time_budget;
            warnings.push(format!(
                "Estimated {time_estimate} minutes exceeds your available {} minutes",
                context.time_available_minutes
            ));
        } else if f64::from(time_estimate)
            < available * self.config.time_estimate.under_budget_ratio
        {
            score += adjustments.under_time_budget;
            warnings.push("Uses less than half of your available time".to_owned());
        } else {
            reasons.push("Fits within your available time".to_owned());
        }

        let energy_requirement = self.energy_requirement(workout);
        let energy = context.energy();
        if energy_requirement > energy {
            score += adjustments.over_energy;
            warnings.push("Requires more energy than you reported".to_owned());
        } else if energy - energy_requirement > self.config.energy.surplus_margin {
            score += adjustments.under_energy;
            warnings.push("May not challenge your current energy level".to_owned());
        }

        if let Some(equipment) = workout.equipment.as_deref() {
            let available = context
                .equipment_available
                .iter()
                .any(|item| tags_overlap(item, equipment));
            if !workout.is_bodyweight() && !available {
                score += adjustments.missing_equipment;
                warnings.push(format!("Requires {equipment}, which is not available right now"));
            }
        }

        let final_score = to_score(score.clamp(MIN_SCORE, MAX_SCORE));
        debug!(
            workout = %workout.name,
            base = recommendation.score,
            adapted = final_score,
            time_estimate,
            energy_requirement,
            "Adapted recommendation"
        );

        recommendation.score = final_score;
        recommendation.priority =
            Priority::from_score(final_score, &self.scorer.config().thresholds);
        for reason in reasons {
            push_unique(&mut recommendation.reasons, reason);
        }
        for warning in warnings {
            push_unique(&mut recommendation.warnings, warning);
        }

        AdaptiveRecommendation {
            recommendation,
            progression,
            confidence,
            time_estimate_minutes: time_estimate,
            energy_requirement,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::intelligence::HistoryConfig;
    use crate::history::InMemoryHistoryStore;
    use chrono::{Duration, NaiveDate, Utc};
    use gymwise_core::models::{PerformanceMetrics, UserProgressRecord};

    fn recommender() -> AdaptiveRecommender<InMemoryHistoryStore> {
        let config = IntelligenceConfig::default();
        AdaptiveRecommender::with_config(
            Arc::new(InMemoryHistoryStore::with_config(HistoryConfig::default())),
            PersonalizationScorer::with_config(config.personalization)
                .with_reference_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
            config.adaptive,
        )
    }

    fn history_with(ratings: &[(u8, u8)]) -> WorkoutHistory {
        let mut history = WorkoutHistory::empty("u1");
        for (i, (difficulty, form)) in ratings.iter().enumerate() {
            history.records.push(UserProgressRecord::new(
                "u1",
                "Squats",
                Utc::now() - Duration::days(i64::try_from(i).unwrap()),
                PerformanceMetrics {
                    sets: 3,
                    reps: 10,
                    weight_kg: None,
                    duration_minutes: None,
                    difficulty: *difficulty,
                    form: *form,
                },
            ));
        }
        history.total_workouts = history.records.len();
        history
    }

    #[test]
    fn test_progression_needs_full_window() {
        let recommender = recommender();
        assert_eq!(
            recommender.progression_for(&history_with(&[(5, 9), (5, 9)])),
            ProgressionState::Maintain
        );
    }

    #[test]
    fn test_progression_states() {
        let recommender = recommender();
        assert_eq!(
            recommender.progression_for(&history_with(&[(5, 9), (5, 9), (6, 8)])),
            ProgressionState::Increase
        );
        assert_eq!(
            recommender.progression_for(&history_with(&[(5, 4), (5, 5), (6, 6)])),
            ProgressionState::Decrease
        );
        assert_eq!(
            recommender.progression_for(&history_with(&[(8, 9), (9, 8), (8, 8)])),
            ProgressionState::Maintain
        );
    }

    #[test]
    fn test_progression_uses_only_latest_records() {
        let recommender = recommender();
        let history = history_with(&[(5, 2), (5, 2), (5, 9), (5, 9), (6, 8)]);
        assert_eq!(recommender.progression_for(&history), ProgressionState::Increase);
    }

    #[test]
    fn test_confidence() {
        let recommender = recommender();
        let mut history = WorkoutHistory::empty("u1");
        assert_eq!(recommender.confidence_for(&history), 70);
        history.total_workouts = 11;
        assert_eq!(recommender.confidence_for(&history), 90);
        history.consistency_score = 80.0;
        assert_eq!(recommender.confidence_for(&history), 100);
    }

    #[test]
    fn test_time_estimate() {
        let recommender = recommender();
        let workout = WorkoutDefinition::new("Rows", FitnessLevel::Intermediate, 3, 10);
        assert_eq!(recommender.time_estimate(&workout, FitnessLevel::Intermediate), 27);
        assert_eq!(recommender.time_estimate(&workout, FitnessLevel::Beginner), 35);

        let advanced = WorkoutDefinition::new("Complex", FitnessLevel::Advanced, 5, 20);
        // (20 + 10 + 2) * 1.2 * 0.8 = 30.72
        assert_eq!(recommender.time_estimate(&advanced, FitnessLevel::Advanced), 31);
    }

    #[test]
    fn test_energy_requirement_is_clamped() {
        let recommender = recommender();
        let hiit = WorkoutDefinition {
            goal: Some("HIIT".into()),
            ..WorkoutDefinition::new("Tabata", FitnessLevel::Advanced, 8, 20)
        };
        assert!((recommender.energy_requirement(&hiit) - 10.0).abs() < f64::EPSILON);

        let stretch = WorkoutDefinition {
            goal: Some("stretching".into()),
            ..WorkoutDefinition::new("Hamstring Stretch", FitnessLevel::Beginner, 2, 1)
        };
        assert!((recommender.energy_requirement(&stretch) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_context_clamps_energy() {
        let context = RecommendationContext::new(UserProfile::new("u1"), 30, 15);
        assert_eq!(context.energy_level, 10);
        let context = RecommendationContext::new(UserProfile::new("u1"), 30, 0);
        assert!((context.energy() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_candidates_yield_empty_output() {
        let context = RecommendationContext::new(UserProfile::new("u1"), 30, 5);
        assert!(recommender().generate(&[], &context).unwrap().is_empty());
    }

    #[test]
    fn test_session_goals_replace_profile_goal() {
        let profile = UserProfile {
            fitness_goal: Some("flexibility".into()),
            ..UserProfile::new("u1")
        };
        let context = RecommendationContext::new(profile, 30, 5).with_goal("cardio");
        assert_eq!(context.scoring_profile().fitness_goal.as_deref(), Some("cardio"));
    }
}
