// ABOUTME: TransFit safety CLI for classifying queries and evaluating profiles offline
// ABOUTME: Prints classifier results, safety contexts, the rule catalog, and crisis resources as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TransFit
//!
//! Usage:
//! ```bash
//! # Classify a query
//! transfit-safety classify "how much T should I take" --with-resources
//!
//! # Evaluate a profile against an exercise library
//! transfit-safety evaluate --profile profile.json --exercises library.json
//!
//! # Evaluate as of a fixed date
//! transfit-safety evaluate --profile profile.json --exercises library.json --now 2025-06-01T00:00:00Z
//!
//! # List the rule catalog
//! transfit-safety catalog
//!
//! # Show crisis resources
//! transfit-safety resources
//! ```

mod commands;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use transfit_safety::logging::LoggingConfig;
use transfit_safety::safety::ensure_catalog_compiled;

#[derive(Parser)]
#[command(
    name = "transfit-safety",
    about = "TransFit Safety Adjudication CLI",
    long_about = "Classify user queries for red flags and evaluate safety profiles against the exercise safety rule catalog."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Classify a free-text query
    Classify {
        /// Query text
        text: String,

        /// Include crisis resources for the detected category
        #[arg(long)]
        with_resources: bool,
    },

    /// Evaluate a safety profile against an exercise library
    Evaluate {
        /// Path to a JSON safety profile
        #[arg(long)]
        profile: PathBuf,

        /// Path to a JSON array of exercises
        #[arg(long)]
        exercises: PathBuf,

        /// Evaluation timestamp (RFC 3339); defaults to now
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },

    /// List rules in the default catalog
    Catalog,

    /// Show the crisis resource registry
    Resources,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = if cli.verbose {
        LoggingConfig::from_env().with_level("debug")
    } else {
        LoggingConfig::from_env().with_level("warn")
    };
    logging.init()?;
    ensure_catalog_compiled().context("red flag pattern catalog is broken")?;

    match cli.command {
        Command::Classify {
            text,
            with_resources,
        } => commands::classify(&text, with_resources),
        Command::Evaluate {
            profile,
            exercises,
            now,
        } => commands::evaluate(&profile, &exercises, now).await,
        Command::Catalog => commands::catalog(),
        Command::Resources => commands::resources(),
    }
}
