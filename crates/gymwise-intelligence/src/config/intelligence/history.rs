// ABOUTME: Progress history configuration for consistency scoring
// ABOUTME: Trailing window length, weekly cadence target, and score scale
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Consistency scoring parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Trailing window (days) of completions counted towards consistency
    pub window_days: i64,
    /// Weekly completion target
    pub target_workouts_per_week: f64,
    /// Points per weekly completion at the target cadence
    pub score_scale: f64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            window_days: 28,
            target_workouts_per_week: 7.0,
            score_scale: 10.0,
        }
    }
}
