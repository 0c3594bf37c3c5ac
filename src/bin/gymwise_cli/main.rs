// ABOUTME: Gymwise CLI - JSON-file driven front end for the recommendation engine
// ABOUTME: Scores catalogs, assesses workout safety, and generates adaptive recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Rank a catalog for a member profile
//! gymwise-cli score --profile profile.json --catalog catalog.json
//!
//! # Safety verdict for one workout
//! gymwise-cli assess --workout workout.json --health health.json
//!
//! # Adaptive recommendations with history and session context
//! gymwise-cli recommend --context context.json --catalog catalog.json --history records.json
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr.

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gymwise::config::EngineConfig;
use gymwise::engine::RecommendationEngine;
use gymwise::logging::LogOutput;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "gymwise-cli",
    about = "Gymwise workout recommendation CLI",
    long_about = "Command-line front end for the Gymwise safety-aware adaptive workout recommendation engine."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Reference date for age calculations (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Score every catalog workout for a member profile
    Score {
        /// Member profile JSON file
        #[arg(long)]
        profile: PathBuf,

        /// Workout catalog JSON file (array of workouts)
        #[arg(long)]
        catalog: PathBuf,

        /// Only print the best N recommendations
        #[arg(long)]
        top: Option<usize>,
    },

    /// Assess the safety of one workout
    Assess {
        /// Workout JSON file
        #[arg(long)]
        workout: PathBuf,

        /// Health profile JSON file
        #[arg(long, conflicts_with = "profile", required_unless_present = "profile")]
        health: Option<PathBuf>,

        /// Member profile JSON file (health profile is derived from it)
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// Generate adaptive recommendations for a session
    Recommend {
        /// Recommendation context JSON file
        #[arg(long)]
        context: PathBuf,

        /// Workout catalog JSON file (array of workouts)
        #[arg(long)]
        catalog: PathBuf,

        /// Completed workout records JSON file (array of records)
        #[arg(long)]
        history: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = EngineConfig::from_env()?;
    let mut logging = config.logging.clone().with_output(LogOutput::Stderr);
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    info!("Gymwise CLI");

    let rule_base = config.load_rule_base()?;
    let mut engine =
        RecommendationEngine::with_config(config.intelligence.clone()).with_rule_base(rule_base);
    if let Some(date) = cli.today {
        engine = engine.with_reference_date(date);
    }

    match cli.command {
        Command::Score {
            profile,
            catalog,
            top,
        } => commands::score::run(&engine, &profile, &catalog, top),
        Command::Assess {
            workout,
            health,
            profile,
        } => commands::assess::run(
            &engine,
            &workout,
            health.as_deref(),
            profile.as_deref(),
            cli.today,
        ),
        Command::Recommend {
            context,
            catalog,
            history,
        } => commands::recommend::run(&engine, &context, &catalog, history.as_deref()),
    }
}
