// ABOUTME: Core types and constants for the Gymwise workout recommendation engine
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Gymwise Core
//!
//! Foundation crate providing shared types and constants for the Gymwise
//! recommendation engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Scoring and physiological constants organized by domain
//! - **models**: User profiles, workout definitions, and progress records

/// Unified error handling system with standard error codes
pub mod errors;

/// Scoring and physiological constants organized by domain
pub mod constants;

/// Core data models (profiles, workouts, progress history)
pub mod models;
