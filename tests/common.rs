// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging setup plus profile, workout, and record builders
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `gymwise`

use std::env;
use std::sync::Once;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use gymwise::models::{
    FitnessLevel, PerformanceMetrics, UserProfile, UserProgressRecord, WorkoutDefinition,
};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        // another test binary helper may already have installed one
        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Fixed "today" so that ages are stable
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

/// Fixed "now" matching [`reference_date`]
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Date of birth giving `years` of age on [`reference_date`]
pub fn born_years_ago(years: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025 - years, 1, 15).unwrap()
}

/// Intermediate member with no other details
pub fn intermediate_profile(user_id: &str) -> UserProfile {
    UserProfile {
        experience_level: Some(FitnessLevel::Intermediate),
        ..UserProfile::new(user_id)
    }
}

/// Workout with muscle groups, goal and equipment
pub fn workout(
    name: &str,
    difficulty: FitnessLevel,
    muscle_groups: &[&str],
    goal: Option<&str>,
    equipment: Option<&str>,
) -> WorkoutDefinition {
    WorkoutDefinition {
        muscle_groups: muscle_groups.iter().map(|g| (*g).to_owned()).collect(),
        goal: goal.map(str::to_owned),
        equipment: equipment.map(str::to_owned),
        ..WorkoutDefinition::new(name, difficulty, 3, 10)
    }
}

/// Small mixed catalog used across tests
pub fn sample_catalog() -> Vec<WorkoutDefinition> {
    vec![
        workout(
            "Push-ups",
            FitnessLevel::Beginner,
            &["chest", "triceps", "shoulders"],
            Some("strength"),
            Some("bodyweight"),
        ),
        workout(
            "Deadlifts",
            FitnessLevel::Advanced,
            &["lower_back", "hamstrings", "glutes"],
            Some("strength"),
            Some("barbell"),
        ),
        workout(
            "Goblet Squats",
            FitnessLevel::Intermediate,
            &["quadriceps", "glutes"],
            Some("muscle_gain"),
            Some("dumbbell"),
        ),
        workout(
            "Running",
            FitnessLevel::Intermediate,
            &["legs", "cardio"],
            Some("cardio"),
            None,
        ),
        workout(
            "Yoga Flow",
            FitnessLevel::Beginner,
            &["full_body"],
            Some("flexibility"),
            Some("mat"),
        ),
    ]
}

/// Completed workout `days_ago` days before [`reference_now`]
pub fn record(
    user_id: &str,
    workout_name: &str,
    difficulty: u8,
    form: u8,
    days_ago: i64,
) -> UserProgressRecord {
    UserProgressRecord::new(
        user_id,
        workout_name,
        reference_now() - Duration::days(days_ago),
        PerformanceMetrics {
            sets: 3,
            reps: 10,
            weight_kg: None,
            duration_minutes: Some(30),
            difficulty,
            form,
        },
    )
}

/// Completed workout logged right now
pub fn record_now(user_id: &str, difficulty: u8, form: u8) -> UserProgressRecord {
    UserProgressRecord::new(
        user_id,
        "Push-ups",
        Utc::now(),
        PerformanceMetrics {
            sets: 3,
            reps: 10,
            weight_kg: None,
            duration_minutes: None,
            difficulty,
            form,
        },
    )
}
