// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Physiological brackets, rating scales, and keyword tables used by the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Values that describe the problem domain rather than tuning knobs. Tunable
//! weights and score deltas live in the intelligence crate's configuration.

/// Age bracket boundaries (inclusive upper bounds, whole years)
pub mod age_brackets {
    /// Ages strictly below this are treated as teenagers
    pub const ADULT_MIN_AGE: u32 = 18;
    /// Last age of the young-adult bracket
    pub const YOUNG_ADULT_MAX_AGE: u32 = 29;
    /// Last age of the adult bracket
    pub const ADULT_MAX_AGE: u32 = 50;
    /// Last age of the middle-aged bracket; anything above is senior
    pub const MIDDLE_AGED_MAX_AGE: u32 = 65;
}

/// Body mass index thresholds (kg/m²)
pub mod bmi {
    /// Below this BMI is considered severely underweight
    pub const SEVERELY_UNDERWEIGHT: f64 = 16.0;
    /// Below this BMI is considered underweight
    pub const UNDERWEIGHT: f64 = 18.5;
    /// Above this BMI is considered obese
    pub const OBESE: f64 = 30.0;
    /// Above this BMI is considered severely obese
    pub const SEVERELY_OBESE: f64 = 35.0;
}

/// Self-reported performance rating scale
pub mod ratings {
    /// Lowest accepted difficulty/form rating
    pub const MIN_RATING: u8 = 1;
    /// Highest accepted difficulty/form rating
    pub const MAX_RATING: u8 = 10;
}

/// Score scale shared by every factor and blended score
pub mod scores {
    /// Lower bound of every score
    pub const MIN_SCORE: f64 = 0.0;
    /// Upper bound of every score
    pub const MAX_SCORE: f64 = 100.0;
}

/// Upper bound on body fat percentage
pub mod body_composition {
    /// Body fat percentages must be strictly below this value
    pub const MAX_BODY_FAT_PERCENT: f64 = 100.0;
}

/// Keyword tables for free-form workout and profile tags
pub mod keywords {
    /// Equipment names considered heavy/gym-bound
    pub const HEAVY_EQUIPMENT: &[&str] = &["barbell", "dumbbell", "machine"];
    /// Equipment descriptions meaning no equipment is needed
    pub const BODYWEIGHT: &[&str] = &["bodyweight", "body_weight", "none"];
    /// Equipment descriptions that allow load progression
    pub const PROGRESSIVE_EQUIPMENT: &[&str] = &["adjustable", "progressive"];
    /// Muscle-group descriptions for compound, whole-body work
    pub const MULTI_MUSCLE: &[&str] = &["multiple", "full_body"];
    /// Availability descriptions signalling a tight schedule
    pub const BUSY_SCHEDULE: &[&str] = &["busy", "limited"];
    /// Equipment-access descriptions implying a full gym
    pub const GYM_ACCESS: &[&str] = &["gym", "full_access", "all_equipment"];
}
