// ABOUTME: Progress history store holding per-member completion aggregates
// ABOUTME: HistoryStore trait plus a sharded in-memory implementation with consistency scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: record counts and window lengths are small

//! Progress history
//!
//! The store exclusively owns every [`WorkoutHistory`]; callers always receive
//! clones. Appending a record and recomputing the aggregate happen under the
//! map's shard lock for that member, so concurrent completions for one member
//! never lose an update while different members proceed in parallel.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use gymwise_core::constants::scores::MAX_SCORE;
use gymwise_core::errors::AppResult;
use gymwise_core::models::{UserProgressRecord, WorkoutHistory};
use tracing::{debug, info};

use crate::config::intelligence::{HistoryConfig, IntelligenceConfig};

const DAYS_PER_WEEK: f64 = 7.0;

/// Storage abstraction for member workout histories
///
/// Injected into the adaptive recommender so callers can supply isolated
/// stores per test or a persistent implementation in production.
pub trait HistoryStore: Send + Sync {
    /// Append a validated completion and return the updated aggregate
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for an empty user id and
    /// `ValueOutOfRange` for ratings outside 1-10.
    fn record_completion(&self, record: UserProgressRecord) -> AppResult<WorkoutHistory>;

    /// Snapshot of a member's aggregate; unseen members get an empty one
    fn history(&self, user_id: &str) -> WorkoutHistory;

    /// Erase a member's whole history; returns whether anything was stored
    fn clear(&self, user_id: &str) -> bool;

    /// The member's last `count` records in append order
    fn recent_records(&self, user_id: &str, count: usize) -> Vec<UserProgressRecord> {
        self.history(user_id).recent(count).to_vec()
    }

    /// Number of members with stored history
    fn user_count(&self) -> usize;
}

/// In-memory history store backed by a sharded concurrent map
#[derive(Debug)]
pub struct InMemoryHistoryStore {
    histories: DashMap<String, WorkoutHistory>,
    config: HistoryConfig,
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHistoryStore {
    /// Empty store using the global history configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(IntelligenceConfig::global().history.clone())
    }

    /// Empty store with explicit configuration
    #[must_use]
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            histories: DashMap::new(),
            config,
        }
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn record_completion(&self, record: UserProgressRecord) -> AppResult<WorkoutHistory> {
        record.validate()?;
        let user_id = record.user_id.clone();
        let workout_name = record.workout_name.clone();

        // Entry guard holds the shard lock across append and recompute
        let mut entry = self
            .histories
            .entry(user_id.clone())
            .or_insert_with(|| WorkoutHistory::empty(user_id.clone()));
        entry.records.push(record);
        recompute_aggregates(&mut entry, Utc::now(), &self.config);
        let snapshot = entry.clone();
        drop(entry);

        info!(
            user_id = %user_id,
            workout = %workout_name,
            total_workouts = snapshot.total_workouts,
            consistency = snapshot.consistency_score,
            "Recorded workout completion"
        );
        Ok(snapshot)
    }

    fn history(&self, user_id: &str) -> WorkoutHistory {
        self.histories.get(user_id).map_or_else(
            || {
                debug!(user_id = %user_id, "No stored history, returning empty aggregate");
                WorkoutHistory::empty(user_id)
            },
            |entry| entry.value().clone(),
        )
    }

    fn clear(&self, user_id: &str) -> bool {
        let removed = self.histories.remove(user_id).is_some();
        info!(user_id = %user_id, removed, "Cleared workout history");
        removed
    }

    fn recent_records(&self, user_id: &str, count: usize) -> Vec<UserProgressRecord> {
        self.histories
            .get(user_id)
            .map(|entry| entry.recent(count).to_vec())
            .unwrap_or_default()
    }

    fn user_count(&self) -> usize {
        self.histories.len()
    }
}

/// Recompute totals, averages, last date and consistency from the records
pub fn recompute_aggregates(
    history: &mut WorkoutHistory,
    now: DateTime<Utc>,
    config: &HistoryConfig,
) {
    let total = history.records.len();
    history.total_workouts = total;
    history.last_workout_date = history.records.iter().map(|r| r.completed_at).max();

    if total == 0 {
        history.average_difficulty = 0.0;
        history.average_form = 0.0;
        history.consistency_score = 0.0;
        return;
    }

    let count = total as f64;
    history.average_difficulty = history
        .records
        .iter()
        .map(|r| f64::from(r.performance.difficulty))
        .sum::<f64>()
        / count;
    history.average_form = history
        .records
        .iter()
        .map(|r| f64::from(r.performance.form))
        .sum::<f64>()
        / count;
    history.consistency_score = consistency_score(&history.records, now, config);
}

/// Weekly completion rate over the trailing window, scaled against the target cadence
///
/// The rate always divides by the full window length, so a member whose
/// history began inside the window is not rewarded for a short span and an
/// extra completion inside the window can only raise the score.
#[must_use]
pub fn consistency_score(
    records: &[UserProgressRecord],
    now: DateTime<Utc>,
    config: &HistoryConfig,
) -> f64 {
    let window_start = now - Duration::days(config.window_days);
    let count = records
        .iter()
        .filter(|r| r.completed_at >= window_start && r.completed_at <= now)
        .count();
    if count == 0 {
        return 0.0;
    }

    let weeks = config.window_days as f64 / DAYS_PER_WEEK;
    let rate = count as f64 / weeks;
    (rate * config.target_workouts_per_week * config.score_scale).min(MAX_SCORE)
}
