// ABOUTME: Re-exports command modules for gymwise-cli
// ABOUTME: Provides access to score, assess, and recommend commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod assess;
pub mod recommend;
pub mod score;
