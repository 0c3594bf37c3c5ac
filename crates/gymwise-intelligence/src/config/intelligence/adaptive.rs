// ABOUTME: Adaptive recommender configuration for context-aware re-scoring
// ABOUTME: Score adjustments, progression thresholds, time and energy models, confidence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Adaptive Recommender Configuration

use serde::{Deserialize, Serialize};

/// Adaptive recommender configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdaptiveConfig {
    /// Score adjustments applied on top of the personalization score
    pub adjustments: AdaptiveAdjustments,
    /// Progression state thresholds
    pub progression: ProgressionConfig,
    /// Session duration model
    pub time_estimate: TimeEstimateConfig,
    /// Energy requirement model
    pub energy: EnergyConfig,
    /// Confidence model
    pub confidence: ConfidenceConfig,
}

/// Signed score adjustments (points on the 0-100 scale)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveAdjustments {
    /// Progression `increase` on a beginner workout
    pub increase_on_beginner: f64,
    /// Progression `decrease` on an advanced workout
    pub decrease_on_advanced: f64,
    /// Progression `increase` on an advanced workout
    pub increase_on_advanced: f64,
    /// Recovery `tired` on an advanced workout
    pub tired_on_advanced: f64,
    /// Recovery `fresh` on a beginner workout
    pub fresh_on_beginner: f64,
    /// Estimated duration exceeds the time available
    pub over_time_budget: f64,
    /// Estimated duration uses less than half of the time available
    pub under_time_budget: f64,
    /// Energy requirement exceeds the reported energy level
    pub over_energy: f64,
    /// Energy requirement is well below the reported energy level
    pub under_energy: f64,
    /// Required equipment is not available
    pub missing_equipment: f64,
}

/// Thresholds for the progression state machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Number of most recent records considered
    pub window: usize,
    /// Average form below this forces `decrease`
    pub decrease_form_below: f64,
    /// Average difficulty below this (with good form) allows `increase`
    pub increase_difficulty_below: f64,
    /// Average form above this counts as good form
    pub good_form_above: f64,
    /// Average difficulty above this (with good form) holds at `maintain`
    pub maintain_difficulty_above: f64,
}

/// Session duration estimate parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEstimateConfig {
    /// Fixed warm-up and transition minutes
    pub base_minutes: f64,
    /// Minutes per prescribed set
    pub minutes_per_set: f64,
    /// Minutes per prescribed repetition
    pub minutes_per_rep: f64,
    /// Multiplier for beginner workouts
    pub beginner_workout_multiplier: f64,
    /// Multiplier for intermediate workouts
    pub intermediate_workout_multiplier: f64,
    /// Multiplier for advanced workouts
    pub advanced_workout_multiplier: f64,
    /// Multiplier for beginner members
    pub beginner_member_multiplier: f64,
    /// Multiplier for advanced members
    pub advanced_member_multiplier: f64,
    /// Estimates below this share of the available time are penalized
    pub under_budget_ratio: f64,
}

/// Energy requirement model on a 1-10 scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyConfig {
    /// Requirement before adjustments
    pub base: f64,
    /// Delta for beginner workouts
    pub beginner_delta: f64,
    /// Delta for advanced workouts
    pub advanced_delta: f64,
    /// Sets above this count as high volume
    pub high_volume_sets: u32,
    /// Delta for high-volume workouts
    pub high_volume_delta: f64,
    /// Reps above this count as high repetition
    pub high_rep_threshold: u32,
    /// Delta for high-repetition workouts
    pub high_rep_delta: f64,
    /// Requirement this far below the reported energy counts as too easy
    pub surplus_margin: f64,
}

/// Confidence in an adaptive recommendation, 0-100
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    /// Confidence without history bonuses
    pub base: f64,
    /// More completions than this earn the history bonus
    pub experienced_workouts: usize,
    /// Bonus for an established history
    pub history_bonus: f64,
    /// Consistency above this earns the consistency bonus
    pub consistency_threshold: f64,
    /// Bonus for a consistent member
    pub consistency_bonus: f64,
}

impl Default for AdaptiveAdjustments {
    fn default() -> Self {
        Self {
            increase_on_beginner: -20.0,
            decrease_on_advanced: -30.0,
            increase_on_advanced: 15.0,
            tired_on_advanced: -25.0,
            fresh_on_beginner: -10.0,
            over_time_budget: -30.0,
            under_time_budget: -10.0,
            over_energy: -20.0,
            under_energy: -5.0,
            missing_equipment: -40.0,
        }
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            window: 3,
            decrease_form_below: 6.0,
            increase_difficulty_below: 6.0,
            good_form_above: 7.0,
            maintain_difficulty_above: 7.0,
        }
    }
}

impl Default for TimeEstimateConfig {
    fn default() -> Self {
        Self {
            base_minutes: 20.0,
            minutes_per_set: 2.0,
            minutes_per_rep: 0.1,
            beginner_workout_multiplier: 0.8,
            intermediate_workout_multiplier: 1.0,
            advanced_workout_multiplier: 1.2,
            beginner_member_multiplier: 1.3,
            advanced_member_multiplier: 0.8,
            under_budget_ratio: 0.5,
        }
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            base: 5.0,
            beginner_delta: -1.0,
            advanced_delta: 2.0,
            high_volume_sets: 4,
            high_volume_delta: 1.0,
            high_rep_threshold: 15,
            high_rep_delta: 0.5,
            surplus_margin: 4.0,
        }
    }
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            base: 70.0,
            experienced_workouts: 10,
            history_bonus: 20.0,
            consistency_threshold: 70.0,
            consistency_bonus: 10.0,
        }
    }
}
