// ABOUTME: JSON input loading helpers for gymwise-cli
// ABOUTME: Reads and deserializes profile, catalog, context, and history files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::Path;

use gymwise::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Read and deserialize a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    debug!(path = %path.display(), "Reading input file");
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::invalid_input(format!("Cannot read {}", path.display()))
            .with_resource_id(path.display().to_string())
            .with_source(e)
    })?;
    serde_json::from_str(&content).map_err(|e| {
        AppError::serialization(format!("Invalid JSON in {}: {e}", path.display()))
            .with_resource_id(path.display().to_string())
            .with_source(e)
    })
}
