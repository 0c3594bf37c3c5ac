// ABOUTME: Intelligence module configuration for workout scoring and adaptation
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration Module
//!
//! Configuration is organized into domain-specific modules:
//! - `personalization` - Factor weights and explanation thresholds
//! - `adaptive` - Context adjustments, progression, time/energy models, confidence
//! - `history` - Consistency scoring window and cadence target
//!
//! Values come from `Default` and may be overridden through `GYMWISE_*`
//! environment variables; the result is validated before use.

pub mod adaptive;
pub mod error;
pub mod history;
pub mod personalization;

pub use adaptive::{
    AdaptiveAdjustments, AdaptiveConfig, ConfidenceConfig, EnergyConfig, ProgressionConfig,
    TimeEstimateConfig,
};
pub use error::ConfigError;
pub use history::HistoryConfig;
pub use personalization::{FactorWeights, PersonalizationConfig, PersonalizationThresholds};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static INTELLIGENCE_CONFIG: OnceLock<IntelligenceConfig> = OnceLock::new();

/// Tolerance when checking that factor weights sum to 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Main intelligence configuration container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Configuration for the personalization scorer
    pub personalization: PersonalizationConfig,
    /// Configuration for the adaptive recommender
    pub adaptive: AdaptiveConfig,
    /// Configuration for progress history aggregates
    pub history: HistoryConfig,
}

impl Default for IntelligenceConfig {
    fn default() -> Self {
        Self {
            personalization: PersonalizationConfig::default(),
            adaptive: AdaptiveConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl IntelligenceConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        INTELLIGENCE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load intelligence config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from environment overrides on top of defaults
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistent value
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = &self.personalization.weights;
        if weights.as_array().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::InvalidWeights(
                "Factor weights must be non-negative finite numbers",
            ));
        }
        if (weights.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights("Factor weights must sum to 1.0"));
        }

        let thresholds = &self.personalization.thresholds;
        if thresholds.low_priority > thresholds.high_priority {
            return Err(ConfigError::InvalidRange(
                "low_priority must be <= high_priority",
            ));
        }
        if thresholds.low_fitness >= thresholds.high_fitness {
            return Err(ConfigError::InvalidRange("low_fitness must be < high_fitness"));
        }

        let progression = &self.adaptive.progression;
        if progression.window == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "progression window must be at least 1 record",
            ));
        }

        let energy = &self.adaptive.energy;
        if !(1.0..=10.0).contains(&energy.base) {
            return Err(ConfigError::ValueOutOfRange(
                "energy base must be between 1 and 10",
            ));
        }

        let time = &self.adaptive.time_estimate;
        if !(0.0..=1.0).contains(&time.under_budget_ratio) {
            return Err(ConfigError::ValueOutOfRange(
                "under_budget_ratio must be between 0 and 1",
            ));
        }

        let history = &self.history;
        if history.window_days < 7 {
            return Err(ConfigError::ValueOutOfRange(
                "history window must span at least 7 days",
            ));
        }
        if history.target_workouts_per_week <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "target_workouts_per_week must be positive",
            ));
        }
        if history.score_scale <= 0.0 {
            return Err(ConfigError::ValueOutOfRange("score_scale must be positive"));
        }

        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Factor weights
        let weights = &mut self.personalization.weights;
        Self::apply_env_var("GYMWISE_WEIGHT_FITNESS_LEVEL", &mut weights.fitness_level)?;
        Self::apply_env_var("GYMWISE_WEIGHT_GOAL_ALIGNMENT", &mut weights.goal_alignment)?;
        Self::apply_env_var("GYMWISE_WEIGHT_SAFETY", &mut weights.safety)?;
        Self::apply_env_var(
            "GYMWISE_WEIGHT_AGE_APPROPRIATENESS",
            &mut weights.age_appropriateness,
        )?;
        Self::apply_env_var(
            "GYMWISE_WEIGHT_EQUIPMENT_AVAILABILITY",
            &mut weights.equipment_availability,
        )?;
        Self::apply_env_var("GYMWISE_WEIGHT_TIME_EFFICIENCY", &mut weights.time_efficiency)?;
        Self::apply_env_var(
            "GYMWISE_WEIGHT_PROGRESSION_POTENTIAL",
            &mut weights.progression_potential,
        )?;

        Self::apply_env_var(
            "GYMWISE_PARALLEL_THRESHOLD",
            &mut self.personalization.parallel_threshold,
        )?;

        // Adaptive overrides
        Self::apply_env_var(
            "GYMWISE_PROGRESSION_WINDOW",
            &mut self.adaptive.progression.window,
        )?;
        Self::apply_env_var(
            "GYMWISE_MISSING_EQUIPMENT_PENALTY",
            &mut self.adaptive.adjustments.missing_equipment,
        )?;

        // History overrides
        Self::apply_env_var("GYMWISE_HISTORY_WINDOW_DAYS", &mut self.history.window_days)?;
        Self::apply_env_var(
            "GYMWISE_HISTORY_TARGET_PER_WEEK",
            &mut self.history.target_workouts_per_week,
        )?;
        Self::apply_env_var("GYMWISE_HISTORY_SCORE_SCALE", &mut self.history.score_scale)?;

        Ok(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = IntelligenceConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.personalization.weights.sum() - 1.0).abs() < 1e-9);
        assert_eq!(config.personalization.parallel_threshold, 64);
    }

    #[test]
    fn test_personalization_default_keeps_parallel_threshold() {
        let config = PersonalizationConfig::default();
        assert_eq!(
            config.parallel_threshold,
            PersonalizationConfig::DEFAULT_PARALLEL_THRESHOLD
        );
    }

    #[test]
    fn test_rejects_non_positive_consistency_scale() {
        let mut config = IntelligenceConfig::default();
        config.history.score_scale = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_rejects_unbalanced_weights() {
        let mut config = IntelligenceConfig::default();
        config.personalization.weights.safety = 0.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_rejects_short_history_window() {
        let mut config = IntelligenceConfig::default();
        config.history.window_days = 3;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_rejects_empty_progression_window() {
        let mut config = IntelligenceConfig::default();
        config.adaptive.progression.window = 0;
        assert!(config.validate().is_err());
    }
}
