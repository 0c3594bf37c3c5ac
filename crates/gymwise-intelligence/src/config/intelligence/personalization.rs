// ABOUTME: Personalization scorer configuration for factor blending
// ABOUTME: Configures factor weights, reporting thresholds, and parallel fan-out size
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Personalization Scorer Configuration
//!
//! Weights for the seven factor scores and the thresholds that turn factor
//! values into reasons, warnings, modifications and priorities.

use serde::{Deserialize, Serialize};

/// Personalization scorer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalizationConfig {
    /// Blend weights for the factor scores
    pub weights: FactorWeights,
    /// Thresholds for explanations and priority tiers
    pub thresholds: PersonalizationThresholds,
    /// Catalog size from which batch scoring fans out across threads
    pub parallel_threshold: usize,
}

/// Weights for the seven factor scores; must sum to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    /// Weight of the fitness level factor
    pub fitness_level: f64,
    /// Weight of the goal alignment factor
    pub goal_alignment: f64,
    /// Weight of the safety factor
    pub safety: f64,
    /// Weight of the age appropriateness factor
    pub age_appropriateness: f64,
    /// Weight of the equipment availability factor
    pub equipment_availability: f64,
    /// Weight of the time efficiency factor
    pub time_efficiency: f64,
    /// Weight of the progression potential factor
    pub progression_potential: f64,
}

impl FactorWeights {
    /// Sum of all weights
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.fitness_level
            + self.goal_alignment
            + self.safety
            + self.age_appropriateness
            + self.equipment_availability
            + self.time_efficiency
            + self.progression_potential
    }

    /// All weights in declaration order
    #[must_use]
    pub const fn as_array(&self) -> [f64; 7] {
        [
            self.fitness_level,
            self.goal_alignment,
            self.safety,
            self.age_appropriateness,
            self.equipment_availability,
            self.time_efficiency,
            self.progression_potential,
        ]
    }
}

/// Thresholds that convert factor scores into explanations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalizationThresholds {
    /// A factor above this value yields a positive reason
    pub strong_factor: f64,
    /// A safety factor below this value yields a clearance warning
    pub safety_warning: f64,
    /// An age factor below this value yields an age-modification warning
    pub age_warning: f64,
    /// Members older than this get an intensity-reduction modification
    pub intensity_reduction_age: u32,
    /// A fitness factor below this value yields a start-lighter modification
    pub low_fitness: f64,
    /// A fitness factor above this value makes beginner workouts too easy
    pub high_fitness: f64,
    /// Final score at or above this is high priority
    pub high_priority: u8,
    /// Final score below this is low priority
    pub low_priority: u8,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            fitness_level: 0.20,
            goal_alignment: 0.25,
            safety: 0.25,
            age_appropriateness: 0.10,
            equipment_availability: 0.05,
            time_efficiency: 0.10,
            progression_potential: 0.05,
        }
    }
}

impl Default for PersonalizationThresholds {
    fn default() -> Self {
        Self {
            strong_factor: 80.0,
            safety_warning: 70.0,
            age_warning: 70.0,
            intensity_reduction_age: 50,
            low_fitness: 30.0,
            high_fitness: 70.0,
            high_priority: 80,
            low_priority: 50,
        }
    }
}

impl PersonalizationConfig {
    /// Default catalog size for parallel scoring
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;
}

impl Default for PersonalizationConfig {
    fn default() -> Self {
        Self {
            weights: FactorWeights::default(),
            thresholds: PersonalizationThresholds::default(),
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}
