// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Goal classification command reading an anamnese request
// ABOUTME: Prints the objective label, or the full score breakdown with --explain

use super::read_input;
use anyhow::Result;
use pierre_bodycomp::api::anamnesis::{self, AnamnesisRequestDto};
use pierre_bodycomp::api::parse_body;
use pierre_bodycomp::errors::AppError;
use pierre_bodycomp::intelligence::CompositionEngine;
use serde_json::Value;

pub fn classify(engine: &CompositionEngine, input: &str, explain: bool) -> Result<Value> {
    let body = read_input(input)?;
    let request: AnamnesisRequestDto = parse_body(&body)?;
    let scorer = engine.goal_scorer();

    let output = if explain {
        serde_json::to_value(anamnesis::explain(scorer, request)?)
    } else {
        serde_json::to_value(anamnesis::classify(scorer, request)?)
    };
    Ok(output.map_err(AppError::from)?)
}
