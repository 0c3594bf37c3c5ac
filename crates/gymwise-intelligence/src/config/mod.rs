// ABOUTME: Configuration module for gymwise-intelligence crate
// ABOUTME: Re-exports intelligence configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Intelligence module configuration (personalization, adaptive scoring, history)
pub mod intelligence;

pub use intelligence::IntelligenceConfig;
