// ABOUTME: Output formatting helpers for gymwise-cli
// ABOUTME: Prints command results as pretty JSON on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gymwise::errors::AppResult;
use serde::Serialize;

/// Print a result as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
