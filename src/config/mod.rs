// ABOUTME: Configuration management module for engine and binary settings
// ABOUTME: Bundles logging, intelligence tuning, and rule base location from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for Gymwise
//!
//! Configuration is environment-only. Tuning values for scoring, adaptation and
//! history live in `gymwise_intelligence::config`; this module bundles them with
//! logging settings for binaries.

/// Environment configuration for binaries and embedding services
pub mod environment;

pub use environment::EngineConfig;
