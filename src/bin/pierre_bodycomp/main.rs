// ABOUTME: Pierre body-composition CLI for calculations, goal classification and protocol listing
// ABOUTME: Reads JSON requests from a file or stdin and prints JSON results or error responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # List the protocol catalogue
//! pierre-bodycomp protocols
//!
//! # Protocols usable for a 17 year old woman
//! pierre-bodycomp protocols --gender F --age 17
//!
//! # Body composition from a request file
//! pierre-bodycomp composition --input avaliacao.json
//!
//! # Goal classification from stdin, with the score breakdown
//! cat anamnese.json | pierre-bodycomp goal --input - --explain
//! ```

mod commands;

use clap::{Parser, Subcommand};
use pierre_bodycomp::errors::{AppError, ErrorResponse};
use pierre_bodycomp::intelligence::{BodyCompositionConfig, CompositionEngine};
use pierre_bodycomp::logging::LoggingConfig;
use std::process::ExitCode;
use tracing::{debug, error};

#[derive(Parser)]
#[command(
    name = "pierre-bodycomp",
    about = "Pierre body-composition and goal classification CLI",
    long_about = "Skinfold body-composition calculation and anamnese goal classification. \
                  Requests and results are JSON."
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
    /// List supported protocols
    Protocols {
        /// Only protocols usable for this gender (M/F)
        #[arg(long)]
        gender: Option<String>,

        /// Only protocols usable at this age (requires --gender)
        #[arg(long, requires = "gender")]
        age: Option<u32>,
    },

    /// Calculate body composition from skinfold measurements
    Composition {
        /// Request file, or `-` for stdin
        #[arg(long, short = 'i', default_value = "-")]
        input: String,
    },

    /// Classify the client's objective from an anamnese
    Goal {
        /// Request file, or `-` for stdin
        #[arg(long, short = 'i', default_value = "-")]
        input: String,

        /// Print per-category scores and the tie resolution
        #[arg(long)]
        explain: bool,
    },
}

fn run(cli: Cli) -> anyhow::Result<serde_json::Value> {
    let config = BodyCompositionConfig::load().map_err(AppError::from)?;
    let engine = CompositionEngine::with_config(config);
    debug!(protocols = engine.registry().len(), "engine ready");

    match cli.command {
        Command::Protocols { gender, age } => {
            commands::protocols::list(&engine, gender.as_deref(), age)
        }
        Command::Composition { input } => commands::composition::calculate(&engine, &input),
        Command::Goal { input, explain } => commands::goal::classify(&engine, &input, explain),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    if let Err(e) = logging.init() {
        eprintln!("warning: {e}");
    }

    match run(cli) {
        Ok(output) => {
            println!("{output:#}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let app_error = match e.downcast::<AppError>() {
                Ok(app_error) => app_error,
                Err(other) => AppError::internal(format!("{other:#}")),
            };
            error!(code = ?app_error.code, message = %app_error.message, "command failed");
            let response = ErrorResponse::from(app_error);
            match serde_json::to_string_pretty(&response) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("failed to encode error response: {e}"),
            }
            ExitCode::FAILURE
        }
    }
}
