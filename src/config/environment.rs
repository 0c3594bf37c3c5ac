// ABOUTME: Environment configuration management for the recommendation engine
// ABOUTME: Loads logging, intelligence tuning, and an optional rule base file from env vars
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-based configuration

use gymwise_core::errors::{AppError, AppResult};
use gymwise_intelligence::{IntelligenceConfig, SafetyRuleBase};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::logging::LoggingConfig;

/// Environment variable naming a JSON rule base replacing the built-in one
pub const RULE_BASE_PATH_ENV: &str = "GYMWISE_RULE_BASE_PATH";

/// Complete configuration for an engine deployment
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Scoring, adaptation and history tuning
    pub intelligence: IntelligenceConfig,
    /// Optional JSON rule base file
    pub rule_base_path: Option<PathBuf>,
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a `GYMWISE_*` override fails to parse or
    /// the resulting intelligence configuration is inconsistent.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let intelligence = IntelligenceConfig::load()?;
        let rule_base_path = env::var(RULE_BASE_PATH_ENV)
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            logging: LoggingConfig::from_env(),
            intelligence,
            rule_base_path,
        })
    }

    /// The configured rule base: the JSON file when set, otherwise the built-in tables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the file cannot be read and a
    /// serialization/validation error when its content is invalid.
    pub fn load_rule_base(&self) -> AppResult<Arc<SafetyRuleBase>> {
        let Some(path) = &self.rule_base_path else {
            return Ok(SafetyRuleBase::shared());
        };

        let json = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Cannot read rule base {}", path.display()))
                .with_resource_id(path.display().to_string())
                .with_source(e)
        })?;
        let rule_base = SafetyRuleBase::from_json(&json)?;
        info!(
            path = %path.display(),
            conditions = rule_base.conditions.len(),
            workouts = rule_base.workouts.len(),
            "Loaded safety rule base"
        );
        Ok(Arc::new(rule_base))
    }
}
