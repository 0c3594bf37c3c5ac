// ABOUTME: Core data models for the Gymwise recommendation engine
// ABOUTME: Re-exports profile, workout, and progress types plus tag normalization helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain models shared by every engine component.
//!
//! Free-form tags (goals, muscle groups, equipment) arrive from the catalog and
//! profile forms in inconsistent spellings. All comparisons go through
//! [`normalize_tag`] so that `"Full Body"`, `"full-body"` and `"full_body"` match.

mod profile;
mod progress;
mod workout;

pub use profile::{ActivityLevel, FitnessLevel, UserProfile};
pub use progress::{PerformanceMetrics, UserProgressRecord, WorkoutHistory};
pub use workout::WorkoutDefinition;

/// Normalize a free-form tag: lowercase, trimmed, spaces and dashes as underscores
#[must_use]
pub fn normalize_tag(tag: &str) -> String {
    tag.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Textual overlap between two tags: either normalized tag contains the other
#[must_use]
pub fn tags_overlap(left: &str, right: &str) -> bool {
    let left = normalize_tag(left);
    let right = normalize_tag(right);
    if left.is_empty() || right.is_empty() {
        return false;
    }
    left.contains(&right) || right.contains(&left)
}

/// Whether a normalized tag mentions any of the given keywords
#[must_use]
pub fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    let text = normalize_tag(text);
    keywords.iter().any(|keyword| text.contains(keyword))
}
