// ABOUTME: Score command for gymwise-cli
// ABOUTME: Ranks a workout catalog for one member profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use anyhow::Result;
use gymwise::engine::RecommendationEngine;
use gymwise::models::{UserProfile, WorkoutDefinition};
use tracing::info;

use crate::helpers::display::print_json;
use crate::helpers::input::read_json;

/// Rank the catalog and print the recommendations
pub fn run(
    engine: &RecommendationEngine,
    profile_path: &Path,
    catalog_path: &Path,
    top: Option<usize>,
) -> Result<()> {
    let profile: UserProfile = read_json(profile_path)?;
    let catalog: Vec<WorkoutDefinition> = read_json(catalog_path)?;

    let mut recommendations = engine.score_all(&catalog, &profile)?;
    if let Some(top) = top {
        recommendations.truncate(top);
    }
    info!(
        user_id = %profile.user_id,
        scored = catalog.len(),
        returned = recommendations.len(),
        "Scored catalog"
    );
    print_json(&recommendations)?;
    Ok(())
}
