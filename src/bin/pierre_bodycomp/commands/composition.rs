// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Body-composition command reading a calculation request
// ABOUTME: Prints the Portuguese-named result fields as JSON

use super::read_input;
use anyhow::Result;
use pierre_bodycomp::api::composition::calculate_json;
use pierre_bodycomp::errors::AppError;
use pierre_bodycomp::intelligence::CompositionEngine;
use serde_json::Value;

pub fn calculate(engine: &CompositionEngine, input: &str) -> Result<Value> {
    let body = read_input(input)?;
    let response = calculate_json(engine, &body)?;
    Ok(serde_json::to_value(response).map_err(AppError::from)?)
}
