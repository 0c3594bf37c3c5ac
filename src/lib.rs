// ABOUTME: Main library entry point for the Gymwise recommendation engine
// ABOUTME: Re-exports the engine crates and provides the facade, logging, and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Gymwise
//!
//! Safety-aware, personalized, adaptive workout recommendations for a
//! gym-management application.
//!
//! Given a member profile, a workout catalog, the member's progress history and
//! the momentary context (time, energy, recovery, equipment), the engine
//! returns a ranked, explained and safety-checked list of workouts.
//!
//! ## Architecture
//!
//! - **`gymwise-core`**: errors, constants and domain models
//! - **`gymwise-intelligence`**: safety rules, scoring, history and adaptation
//! - **this crate**: the [`engine::RecommendationEngine`] facade, logging,
//!   environment configuration and the `gymwise-cli` binary

/// Recommendation engine facade
pub mod engine;

/// Environment configuration
pub mod config;

/// Structured logging setup
pub mod logging;

/// Unified error handling (re-exported from `gymwise-core`)
pub use gymwise_core::errors;

/// Domain constants (re-exported from `gymwise-core`)
pub use gymwise_core::constants;

/// Domain models (re-exported from `gymwise-core`)
pub use gymwise_core::models;

/// Recommendation algorithms (re-exported from `gymwise-intelligence`)
pub use gymwise_intelligence as intelligence;
