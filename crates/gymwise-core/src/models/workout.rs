// ABOUTME: Workout catalog entry model owned by the external catalog service
// ABOUTME: WorkoutDefinition with tag helpers for muscle groups and equipment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{mentions_any, normalize_tag, tags_overlap, FitnessLevel};
use crate::constants::keywords;

/// A workout from the catalog
///
/// Immutable from the engine's perspective; `name` is unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDefinition {
    /// Catalog-unique workout name
    pub name: String,
    /// Targeted muscle groups (e.g. `chest`, `lower_back`, `full body`)
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    /// Goal tag (e.g. `strength`, `cardio`, `stretching`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    /// Difficulty level
    pub difficulty: FitnessLevel,
    /// Equipment requirement tag (e.g. `barbell`, `bodyweight`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    /// Prescribed number of sets
    pub sets: u32,
    /// Prescribed repetitions per set
    pub reps: u32,
}

impl WorkoutDefinition {
    /// Create a workout with no muscle groups, goal or equipment
    #[must_use]
    pub fn new(name: impl Into<String>, difficulty: FitnessLevel, sets: u32, reps: u32) -> Self {
        Self {
            name: name.into(),
            muscle_groups: Vec::new(),
            goal: None,
            difficulty,
            equipment: None,
            sets,
            reps,
        }
    }

    /// Whether any targeted muscle group textually overlaps `area`
    #[must_use]
    pub fn targets(&self, area: &str) -> bool {
        self.muscle_groups
            .iter()
            .any(|group| tags_overlap(group, area))
    }

    /// Whether any targeted muscle group overlaps any of `areas`
    #[must_use]
    pub fn targets_any<S: AsRef<str>>(&self, areas: &[S]) -> bool {
        areas.iter().any(|area| self.targets(area.as_ref()))
    }

    /// Whether the workout is described as compound / whole-body
    #[must_use]
    pub fn targets_multiple(&self) -> bool {
        self.muscle_groups
            .iter()
            .any(|group| mentions_any(group, keywords::MULTI_MUSCLE))
    }

    /// Whether the workout needs gym-bound heavy equipment
    #[must_use]
    pub fn requires_heavy_equipment(&self) -> bool {
        self.equipment
            .as_deref()
            .is_some_and(|equipment| mentions_any(equipment, keywords::HEAVY_EQUIPMENT))
    }

    /// Whether the workout needs no equipment at all
    #[must_use]
    pub fn is_bodyweight(&self) -> bool {
        self.equipment.as_deref().is_none_or(|equipment| {
            normalize_tag(equipment).is_empty() || mentions_any(equipment, keywords::BODYWEIGHT)
        })
    }

    /// Whether the equipment allows gradual load progression
    #[must_use]
    pub fn has_progressive_equipment(&self) -> bool {
        self.equipment
            .as_deref()
            .is_some_and(|equipment| mentions_any(equipment, keywords::PROGRESSIVE_EQUIPMENT))
    }

    /// Whether the goal tag mentions any of the given keywords
    #[must_use]
    pub fn goal_mentions(&self, goal_keywords: &[&str]) -> bool {
        self.goal
            .as_deref()
            .is_some_and(|goal| mentions_any(goal, goal_keywords))
    }
}
