// ABOUTME: Integration tests for gymwise-cli binary
// ABOUTME: Tests command structure, JSON output, and error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Integration tests for the gymwise-cli binary.
//!
//! These tests run the compiled binary against JSON fixtures written to a
//! temporary directory and parse its stdout.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::{json, Value};
use tempfile::TempDir;

/// Helper to run CLI command and capture output
fn run_cli(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_gymwise-cli"))
        .args(args)
        .env_remove("GYMWISE_RULE_BASE_PATH")
        .env("RUST_LOG", "warn")
        .output()
        .unwrap();

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn catalog() -> Value {
    json!([
        {
            "name": "Push-ups",
            "muscle_groups": ["chest", "triceps"],
            "goal": "strength",
            "difficulty": "beginner",
            "equipment": "bodyweight",
            "sets": 3,
            "reps": 12
        },
        {
            "name": "Deadlifts",
            "muscle_groups": ["lower_back", "hamstrings"],
            "goal": "strength",
            "difficulty": "advanced",
            "equipment": "barbell",
            "sets": 5,
            "reps": 5
        },
        {
            "name": "Running",
            "muscle_groups": ["legs", "cardio"],
            "goal": "cardio",
            "difficulty": "intermediate",
            "sets": 1,
            "reps": 1
        }
    ])
}

fn profile() -> Value {
    json!({
        "user_id": "cli-member",
        "date_of_birth": "1990-04-12",
        "experience_level": "intermediate",
        "activity_level": "moderate",
        "fitness_goal": "strength",
        "medical_conditions": "occasional lower back pain"
    })
}

#[test]
fn test_cli_help_shows_commands() {
    let (exit_code, stdout, _stderr) = run_cli(&["--help"]);

    assert_eq!(exit_code, 0, "CLI help should exit with 0");
    for command in ["score", "assess", "recommend"] {
        assert!(stdout.contains(command), "Help should mention '{command}'");
    }
}

#[test]
fn test_cli_score_prints_ranked_json() {
    let dir = TempDir::new().unwrap();
    let profile = write_json(dir.path(), "profile.json", &profile());
    let catalog = write_json(dir.path(), "catalog.json", &catalog());

    let (exit_code, stdout, stderr) = run_cli(&[
        "score",
        "--profile",
        profile.to_str().unwrap(),
        "--catalog",
        catalog.to_str().unwrap(),
        "--today",
        "2025-06-01",
    ]);
    assert_eq!(exit_code, 0, "stderr: {stderr}");

    let ranked: Vec<Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(ranked.len(), 3);
    let scores: Vec<u64> = ranked.iter().map(|r| r["score"].as_u64().unwrap()).collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    assert!(ranked.iter().all(|r| r["priority"].is_string()));
}

#[test]
fn test_cli_score_top_limits_output() {
    let dir = TempDir::new().unwrap();
    let profile = write_json(dir.path(), "profile.json", &profile());
    let catalog = write_json(dir.path(), "catalog.json", &catalog());

    let (exit_code, stdout, _stderr) = run_cli(&[
        "score",
        "--profile",
        profile.to_str().unwrap(),
        "--catalog",
        catalog.to_str().unwrap(),
        "--top",
        "1",
    ]);
    assert_eq!(exit_code, 0);
    let ranked: Vec<Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(ranked.len(), 1);
}

#[test]
fn test_cli_assess_with_health_profile() {
    let dir = TempDir::new().unwrap();
    let workout = write_json(dir.path(), "workout.json", &catalog()[1]);
    let health = write_json(
        dir.path(),
        "health.json",
        &json!({
            "fitness_level": "intermediate",
            "active_conditions": ["back_pain"],
            "pregnancy_status": "none"
        }),
    );

    let (exit_code, stdout, stderr) = run_cli(&[
        "assess",
        "--workout",
        workout.to_str().unwrap(),
        "--health",
        health.to_str().unwrap(),
    ]);
    assert_eq!(exit_code, 0, "stderr: {stderr}");

    let assessment: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(assessment["risk_level"], "medium");
    assert_eq!(assessment["requires_medical_clearance"], false);
}

#[test]
fn test_cli_assess_derives_health_from_profile() {
    let dir = TempDir::new().unwrap();
    let workout = write_json(dir.path(), "workout.json", &catalog()[1]);
    let profile = write_json(dir.path(), "profile.json", &profile());

    let (exit_code, stdout, _stderr) = run_cli(&[
        "assess",
        "--workout",
        workout.to_str().unwrap(),
        "--profile",
        profile.to_str().unwrap(),
        "--today",
        "2025-06-01",
    ]);
    assert_eq!(exit_code, 0);
    let assessment: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(assessment["risk_level"], "medium");
}

#[test]
fn test_cli_recommend_replays_history() {
    let dir = TempDir::new().unwrap();
    let catalog = write_json(dir.path(), "catalog.json", &catalog());
    let context = write_json(
        dir.path(),
        "context.json",
        &json!({
            "profile": profile(),
            "time_available_minutes": 45,
            "energy_level": 7,
            "recovery_status": "fresh",
            "equipment_available": ["barbell"]
        }),
    );
    let record = |difficulty: u8, form: u8| {
        json!({
            "user_id": "cli-member",
            "workout_name": "Push-ups",
            "completed_at": "2025-05-30T08:00:00Z",
            "performance": { "sets": 3, "reps": 12, "difficulty": difficulty, "form": form }
        })
    };
    let history = write_json(
        dir.path(),
        "history.json",
        &json!([record(5, 9), record(5, 9), record(6, 8)]),
    );

    let (exit_code, stdout, stderr) = run_cli(&[
        "recommend",
        "--context",
        context.to_str().unwrap(),
        "--catalog",
        catalog.to_str().unwrap(),
        "--history",
        history.to_str().unwrap(),
    ]);
    assert_eq!(exit_code, 0, "stderr: {stderr}");

    let recommendations: Vec<Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(recommendations.len(), 3);
    assert!(recommendations
        .iter()
        .all(|r| r["progression"] == "increase"));
    assert!(recommendations.iter().all(|r| r["workout"]["name"].is_string()));
}

#[test]
fn test_cli_reports_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let catalog = write_json(dir.path(), "catalog.json", &catalog());
    let absent = dir.path().join("absent.json");

    let (exit_code, stdout, stderr) = run_cli(&[
        "score",
        "--profile",
        absent.to_str().unwrap(),
        "--catalog",
        catalog.to_str().unwrap(),
    ]);
    assert_ne!(exit_code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Cannot read"));
}

#[test]
fn test_cli_assess_requires_health_or_profile() {
    let dir = TempDir::new().unwrap();
    let workout = write_json(dir.path(), "workout.json", &catalog()[0]);

    let (exit_code, _stdout, _stderr) =
        run_cli(&["assess", "--workout", workout.to_str().unwrap()]);
    assert_ne!(exit_code, 0);
}
