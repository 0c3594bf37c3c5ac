// ABOUTME: Assess command for gymwise-cli
// ABOUTME: Prints the safety verdict for one workout and one member
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, Utc};
use gymwise::engine::RecommendationEngine;
use gymwise::intelligence::{SafetyRuleBase, UserHealthProfile};
use gymwise::models::{UserProfile, WorkoutDefinition};

use crate::helpers::display::print_json;
use crate::helpers::input::read_json;

/// Assess the workout against an explicit or derived health profile
pub fn run(
    engine: &RecommendationEngine,
    workout_path: &Path,
    health_path: Option<&Path>,
    profile_path: Option<&Path>,
    today: Option<NaiveDate>,
) -> Result<()> {
    let workout: WorkoutDefinition = read_json(workout_path)?;
    let health: UserHealthProfile = match (health_path, profile_path) {
        (Some(path), _) => read_json(path)?,
        (None, Some(path)) => {
            let profile: UserProfile = read_json(path)?;
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            profile.validate_on(today)?;
            UserHealthProfile::from_profile(&profile, SafetyRuleBase::shared().as_ref(), today)
        }
        (None, None) => return Err(anyhow!("Either --health or --profile is required")),
    };

    print_json(&engine.assess(&workout, &health))?;
    Ok(())
}
