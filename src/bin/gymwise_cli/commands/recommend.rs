// ABOUTME: Recommend command for gymwise-cli
// ABOUTME: Seeds history from a records file and prints adaptive recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use anyhow::Result;
use gymwise::engine::RecommendationEngine;
use gymwise::intelligence::RecommendationContext;
use gymwise::models::{UserProgressRecord, WorkoutDefinition};
use tracing::info;

use crate::helpers::display::print_json;
use crate::helpers::input::read_json;

/// Replay history, then rank the catalog for the session context
pub fn run(
    engine: &RecommendationEngine,
    context_path: &Path,
    catalog_path: &Path,
    history_path: Option<&Path>,
) -> Result<()> {
    let context: RecommendationContext = read_json(context_path)?;
    let catalog: Vec<WorkoutDefinition> = read_json(catalog_path)?;

    if let Some(path) = history_path {
        let records: Vec<UserProgressRecord> = read_json(path)?;
        let replayed = records.len();
        for record in records {
            engine.record_completion(record)?;
        }
        info!(records = replayed, "Replayed workout history");
    }

    let recommendations = engine.generate(&catalog, &context)?;
    print_json(&recommendations)?;
    Ok(())
}
