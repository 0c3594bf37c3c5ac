// ABOUTME: Safety assessment types and module wiring for contraindication checks
// ABOUTME: RiskLevel, PregnancyStatus, UserHealthProfile, and SafetyAssessment definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Safety assessment
//!
//! A declarative rule base ([`rules::SafetyRuleBase`]) maps medical conditions and
//! known workouts to risk metadata; [`assessor::SafetyAssessor`] interprets it for
//! one workout and one health profile at a time.

/// Pure interpreter over the rule base
pub mod assessor;
/// Declarative condition and workout risk tables
pub mod rules;

pub use assessor::SafetyAssessor;
pub use rules::{
    AlternativeCatalog, ConditionModification, ImpactLevel, LevelModification, MedicalCondition,
    SafetyRuleBase, WorkoutRiskProfile,
};

use chrono::NaiveDate;
use gymwise_core::errors::AppError;
use gymwise_core::models::{normalize_tag, FitnessLevel, UserProfile};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Risk level of a workout for a member, also used as condition severity
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// No elevated risk
    #[default]
    Low,
    /// Proceed with modifications
    Medium,
    /// Not safe without supervision
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

/// Pregnancy or postpartum status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PregnancyStatus {
    /// Not pregnant and not postpartum
    #[default]
    None,
    /// Weeks 1-13
    FirstTrimester,
    /// Weeks 14-27
    SecondTrimester,
    /// Weeks 28 onwards
    ThirdTrimester,
    /// Recovering after birth
    Postpartum,
}

impl PregnancyStatus {
    /// Whether pregnancy-specific precautions apply
    #[must_use]
    pub const fn requires_precautions(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl FromStr for PregnancyStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "" | "none" => Ok(Self::None),
            "first_trimester" => Ok(Self::FirstTrimester),
            "second_trimester" => Ok(Self::SecondTrimester),
            "third_trimester" => Ok(Self::ThirdTrimester),
            "postpartum" => Ok(Self::Postpartum),
            other => Err(AppError::invalid_input(format!(
                "Unknown pregnancy status: {other}"
            ))),
        }
    }
}

/// Health view of a member used for one safety assessment
///
/// Built fresh per call and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserHealthProfile {
    /// Training experience
    pub fitness_level: FitnessLevel,
    /// Age in whole years, if known
    #[serde(default)]
    pub age: Option<u32>,
    /// Ids of active conditions from the rule base
    #[serde(default)]
    pub active_conditions: Vec<String>,
    /// Past injuries by affected area (e.g. `left knee`)
    #[serde(default)]
    pub injuries: Vec<String>,
    /// Current medications
    #[serde(default)]
    pub medications: Vec<String>,
    /// Pregnancy or postpartum status
    #[serde(default)]
    pub pregnancy_status: PregnancyStatus,
}

impl UserHealthProfile {
    /// Health profile with no conditions, injuries or medications
    #[must_use]
    pub const fn new(fitness_level: FitnessLevel) -> Self {
        Self {
            fitness_level,
            age: None,
            active_conditions: Vec::new(),
            injuries: Vec::new(),
            medications: Vec::new(),
            pregnancy_status: PregnancyStatus::None,
        }
    }

    /// Derive a health profile from a member profile
    ///
    /// Conditions are detected in the free-text medical description through the
    /// rule base keywords. Missing experience is treated as intermediate so that
    /// no level-specific adjustment applies.
    #[must_use]
    pub fn from_profile(
        profile: &UserProfile,
        rule_base: &SafetyRuleBase,
        today: NaiveDate,
    ) -> Self {
        let active_conditions = profile
            .medical_conditions
            .as_deref()
            .map(|text| rule_base.detect_conditions(text))
            .unwrap_or_default();

        Self {
            fitness_level: profile
                .experience_level
                .unwrap_or(FitnessLevel::Intermediate),
            age: profile.age_on(today),
            active_conditions,
            ..Self::new(FitnessLevel::Intermediate)
        }
    }

    /// Set the age
    #[must_use]
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Add an active condition by rule-base id
    #[must_use]
    pub fn with_condition(mut self, condition_id: impl Into<String>) -> Self {
        self.active_conditions.push(condition_id.into());
        self
    }

    /// Add a past injury
    #[must_use]
    pub fn with_injury(mut self, injury: impl Into<String>) -> Self {
        self.injuries.push(injury.into());
        self
    }

    /// Add a current medication
    #[must_use]
    pub fn with_medication(mut self, medication: impl Into<String>) -> Self {
        self.medications.push(medication.into());
        self
    }

    /// Set the pregnancy status
    #[must_use]
    pub fn with_pregnancy_status(mut self, status: PregnancyStatus) -> Self {
        self.pregnancy_status = status;
        self
    }
}

/// Verdict of one safety assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyAssessment {
    /// False once the risk level reaches high
    pub is_safe: bool,
    /// Highest severity among overlapping conditions
    pub risk_level: RiskLevel,
    /// Human-readable warnings
    pub warnings: Vec<String>,
    /// Suggested modifications
    pub modifications: Vec<String>,
    /// Contraindicated movements relevant to this workout
    pub contraindications: Vec<String>,
    /// Whether a medical professional must sign off first
    pub requires_medical_clearance: bool,
    /// Suggested difficulty shift in [-2, 2]
    pub difficulty_adjustment: i8,
    /// Safer alternative workouts
    pub alternative_workouts: Vec<String>,
}

impl Default for SafetyAssessment {
    fn default() -> Self {
        Self {
            is_safe: true,
            risk_level: RiskLevel::Low,
            warnings: Vec::new(),
            modifications: Vec::new(),
            contraindications: Vec::new(),
            requires_medical_clearance: false,
            difficulty_adjustment: 0,
            alternative_workouts: Vec::new(),
        }
    }
}

/// Append `item` unless already present, preserving first-appearance order
pub(crate) fn push_unique(items: &mut Vec<String>, item: impl Into<String>) {
    let item = item.into();
    if !items.contains(&item) {
        items.push(item);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert_eq!(RiskLevel::default(), RiskLevel::Low);
    }

    #[test]
    fn test_pregnancy_status_parsing() {
        assert_eq!(
            "Second Trimester".parse::<PregnancyStatus>().unwrap(),
            PregnancyStatus::SecondTrimester
        );
        assert_eq!("none".parse::<PregnancyStatus>().unwrap(), PregnancyStatus::None);
        assert!(!PregnancyStatus::None.requires_precautions());
        assert!(PregnancyStatus::Postpartum.requires_precautions());
        assert!("fourth_trimester".parse::<PregnancyStatus>().is_err());
    }

    #[test]
    fn test_from_profile_detects_conditions() {
        let profile = UserProfile {
            medical_conditions: Some("Chronic lower back pain, mild asthma".into()),
            experience_level: Some(FitnessLevel::Beginner),
            date_of_birth: NaiveDate::from_ymd_opt(1960, 3, 1),
            ..UserProfile::new("u1")
        };
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let health =
            UserHealthProfile::from_profile(&profile, SafetyRuleBase::shared().as_ref(), today);

        assert_eq!(health.fitness_level, FitnessLevel::Beginner);
        assert_eq!(health.age, Some(65));
        assert!(health.active_conditions.contains(&"back_pain".to_owned()));
        assert!(health.active_conditions.contains(&"asthma".to_owned()));
        assert_eq!(health.pregnancy_status, PregnancyStatus::None);
    }

    #[test]
    fn test_push_unique_keeps_order() {
        let mut items = vec!["a".to_owned()];
        push_unique(&mut items, "b");
        push_unique(&mut items, "a");
        assert_eq!(items, vec!["a".to_owned(), "b".to_owned()]);
    }
}
