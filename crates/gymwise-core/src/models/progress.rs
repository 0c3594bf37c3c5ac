// ABOUTME: Workout completion records and per-user history aggregates
// ABOUTME: PerformanceMetrics, UserProgressRecord, and WorkoutHistory definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::ratings::{MAX_RATING, MIN_RATING};
use crate::errors::{AppError, AppResult};

/// Self-reported performance for one completed workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Sets completed
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Load used, if any (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Session length (minutes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Perceived difficulty, 1-10
    pub difficulty: u8,
    /// Form quality, 1-10
    pub form: u8,
}

/// One logged workout completion
///
/// Created exactly once per completion and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProgressRecord {
    /// Record identifier
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Identity key of the member
    pub user_id: String,
    /// Name of the completed catalog workout
    pub workout_name: String,
    /// Completion timestamp
    pub completed_at: DateTime<Utc>,
    /// Reported performance
    pub performance: PerformanceMetrics,
    /// Optional free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UserProgressRecord {
    /// Create a record with a fresh identifier
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        workout_name: impl Into<String>,
        completed_at: DateTime<Utc>,
        performance: PerformanceMetrics,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            workout_name: workout_name.into(),
            completed_at,
            performance,
            notes: None,
        }
    }

    /// Attach notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Validate the identity key and the rating scales
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for an empty user id and
    /// `ValueOutOfRange` for difficulty/form ratings outside 1-10.
    pub fn validate(&self) -> AppResult<()> {
        if self.user_id.trim().is_empty() {
            return Err(AppError::missing_field("user_id"));
        }
        for (field, value) in [
            ("performance.difficulty", self.performance.difficulty),
            ("performance.form", self.performance.form),
        ] {
            if !(MIN_RATING..=MAX_RATING).contains(&value) {
                return Err(AppError::value_out_of_range(
                    field,
                    format!("{field} must be between {MIN_RATING} and {MAX_RATING}, got {value}"),
                )
                .with_user_id(self.user_id.clone()));
            }
        }
        Ok(())
    }
}

/// Per-user aggregate of completed workouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutHistory {
    /// Identity key of the member
    pub user_id: String,
    /// Completion records in append order
    pub records: Vec<UserProgressRecord>,
    /// Number of completions
    pub total_workouts: usize,
    /// Mean perceived difficulty across all records
    pub average_difficulty: f64,
    /// Mean form rating across all records
    pub average_form: f64,
    /// Cadence against the weekly target, 0-100
    pub consistency_score: f64,
    /// Most recent completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_workout_date: Option<DateTime<Utc>>,
}

impl WorkoutHistory {
    /// Empty aggregate for a member with no completions
    #[must_use]
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            records: Vec::new(),
            total_workouts: 0,
            average_difficulty: 0.0,
            average_form: 0.0,
            consistency_score: 0.0,
            last_workout_date: None,
        }
    }

    /// Whether no completions are recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The last `count` records in append order (fewer if not available)
    #[must_use]
    pub fn recent(&self, count: usize) -> &[UserProgressRecord] {
        let start = self.records.len().saturating_sub(count);
        &self.records[start..]
    }
}
