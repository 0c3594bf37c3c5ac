// ABOUTME: User profile model with activity and experience enumerations
// ABOUTME: UserProfile validation, age derivation, and BMI calculation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::normalize_tag;
use crate::constants::body_composition::MAX_BODY_FAT_PERCENT;
use crate::errors::{AppError, AppResult};

/// Self-reported day-to-day activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days a week
    Light,
    /// Moderate exercise 3-5 days a week
    Moderate,
    /// Hard exercise 6-7 days a week
    Active,
    /// Very hard exercise or a physical job
    VeryActive,
}

impl ActivityLevel {
    /// Snake-case identifier used in serialized form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            "very_active" => Ok(Self::VeryActive),
            other => Err(AppError::invalid_input(format!(
                "Unknown activity level: {other}"
            ))),
        }
    }
}

/// Training experience of a user, or difficulty of a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    /// New to structured training
    Beginner,
    /// Regular training with sound technique
    Intermediate,
    /// Experienced, handles high volume and load
    Advanced,
}

impl FitnessLevel {
    /// Snake-case identifier used in serialized form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitnessLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(AppError::invalid_input(format!(
                "Unknown fitness level: {other}"
            ))),
        }
    }
}

/// Health and fitness profile of a gym member
///
/// Supplied by the external profile service; read-only for the engine. Every
/// field except the identity key is optional and factor computations fall back
/// to neutral values when a field is absent.
///
/// # Examples
///
/// ```rust
/// use gymwise_core::models::{ActivityLevel, FitnessLevel, UserProfile};
///
/// let profile = UserProfile {
///     activity_level: Some(ActivityLevel::Moderate),
///     experience_level: Some(FitnessLevel::Intermediate),
///     fitness_goal: Some("muscle_gain".into()),
///     ..UserProfile::new("member-42")
/// };
/// assert!(profile.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque identity key
    pub user_id: String,
    /// Date of birth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    /// Gender as entered by the member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Height in centimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Body fat percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_percent: Option<f64>,
    /// Day-to-day activity level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    /// Free-form fitness goal tag (e.g. `weight_loss`, `muscle_gain`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<String>,
    /// Free-text description of medical conditions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_conditions: Option<String>,
    /// Training experience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<FitnessLevel>,
    /// Availability hint (e.g. "busy weekdays")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    /// Equipment the member can access (e.g. "home dumbbells", "full gym")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_access: Option<String>,
}

impl UserProfile {
    /// Create an otherwise empty profile for the given identity key
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Age in whole years on the given date
    ///
    /// Returns `None` without a date of birth or when the date of birth lies
    /// after `today`.
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let dob = self.date_of_birth?;
        if dob > today {
            return None;
        }
        let mut years = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }

    /// Body mass index, when both height and weight are known
    #[must_use]
    pub fn bmi(&self) -> Option<f64> {
        let height_m = self.height_cm? / 100.0;
        let weight = self.weight_kg?;
        if height_m <= 0.0 || weight <= 0.0 {
            return None;
        }
        Some(weight / (height_m * height_m))
    }

    /// Validate numeric fields
    ///
    /// # Errors
    ///
    /// Returns a `ValueOutOfRange` error when height, weight or body fat is
    /// present but not a positive finite number (body fat must also be below
    /// 100), and `InvalidInput` when the date of birth lies after `today`.
    pub fn validate_on(&self, today: NaiveDate) -> AppResult<()> {
        Self::validate_positive("height_cm", self.height_cm)?;
        Self::validate_positive("weight_kg", self.weight_kg)?;
        Self::validate_positive("body_fat_percent", self.body_fat_percent)?;

        if let Some(body_fat) = self.body_fat_percent {
            if body_fat >= MAX_BODY_FAT_PERCENT {
                return Err(AppError::value_out_of_range(
                    "body_fat_percent",
                    format!("body_fat_percent must be below {MAX_BODY_FAT_PERCENT}, got {body_fat}"),
                )
                .with_user_id(self.user_id.clone()));
            }
        }

        if let Some(dob) = self.date_of_birth {
            if dob > today {
                return Err(AppError::invalid_input(format!(
                    "date_of_birth {dob} lies in the future"
                ))
                .with_resource_id("date_of_birth")
                .with_user_id(self.user_id.clone()));
            }
        }

        Ok(())
    }

    /// Validate numeric fields against today's date
    ///
    /// # Errors
    ///
    /// See [`UserProfile::validate_on`].
    pub fn validate(&self) -> AppResult<()> {
        self.validate_on(Utc::now().date_naive())
    }

    fn validate_positive(field: &str, value: Option<f64>) -> AppResult<()> {
        match value {
            Some(v) if !v.is_finite() || v <= 0.0 => Err(AppError::value_out_of_range(
                field,
                format!("{field} must be a positive finite number, got {v}"),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_on_before_and_after_birthday() {
        let profile = UserProfile {
            date_of_birth: Some(date(1990, 6, 15)),
            ..UserProfile::new("u1")
        };
        assert_eq!(profile.age_on(date(2025, 6, 14)), Some(34));
        assert_eq!(profile.age_on(date(2025, 6, 15)), Some(35));
        assert_eq!(profile.age_on(date(1980, 1, 1)), None);
        assert_eq!(UserProfile::new("u2").age_on(date(2025, 1, 1)), None);
    }

    #[test]
    fn test_bmi_requires_height_and_weight() {
        let profile = UserProfile {
            height_cm: Some(180.0),
            weight_kg: Some(81.0),
            ..UserProfile::new("u1")
        };
        let bmi = profile.bmi().unwrap();
        assert!((bmi - 25.0).abs() < 1e-9);

        let partial = UserProfile {
            height_cm: Some(180.0),
            ..UserProfile::new("u2")
        };
        assert!(partial.bmi().is_none());
    }

    #[test]
    fn test_validate_rejects_negative_height() {
        let profile = UserProfile {
            height_cm: Some(-170.0),
            weight_kg: Some(70.0),
            ..UserProfile::new("u1")
        };
        let error = profile.validate_on(date(2025, 1, 1)).unwrap_err();
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
        assert_eq!(error.context.resource_id.as_deref(), Some("height_cm"));
    }

    #[test]
    fn test_validate_rejects_nan_weight_and_full_body_fat() {
        let nan_weight = UserProfile {
            weight_kg: Some(f64::NAN),
            ..UserProfile::new("u1")
        };
        assert!(nan_weight.validate_on(date(2025, 1, 1)).is_err());

        let body_fat = UserProfile {
            body_fat_percent: Some(100.0),
            ..UserProfile::new("u1")
        };
        assert!(body_fat.validate_on(date(2025, 1, 1)).is_err());
    }

    #[test]
    fn test_validate_accepts_missing_fields() {
        assert!(UserProfile::new("u1").validate_on(date(2025, 1, 1)).is_ok());
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!(
            "Very Active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::VeryActive
        );
        assert_eq!(
            "advanced".parse::<FitnessLevel>().unwrap(),
            FitnessLevel::Advanced
        );
        assert!("elite".parse::<FitnessLevel>().is_err());
        assert!(FitnessLevel::Beginner < FitnessLevel::Advanced);
    }
}
