// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Protocol catalogue listing, optionally filtered by subject eligibility
// ABOUTME: Prints site lists, age ranges and references as JSON

use anyhow::Result;
use pierre_bodycomp::errors::AppError;
use pierre_bodycomp::intelligence::{CompositionEngine, Protocol};
use pierre_bodycomp::models::{Gender, Subject};
use serde_json::Value;

/// Weight only matters for subject validation when filtering by age
const FILTER_WEIGHT_KG: f64 = 70.0;

pub fn list(engine: &CompositionEngine, gender: Option<&str>, age: Option<u32>) -> Result<Value> {
    let registry = engine.registry();

    let protocols: Vec<&Protocol> = match (gender, age) {
        (Some(code), Some(age)) => {
            let gender: Gender = code.parse().map_err(AppError::from)?;
            let subject = Subject::new(gender, age, FILTER_WEIGHT_KG).map_err(AppError::from)?;
            registry.eligible_for(&subject)
        }
        (Some(code), None) => {
            let gender: Gender = code.parse().map_err(AppError::from)?;
            registry
                .protocols()
                .filter(|protocol| protocol.sites_for(gender).is_some())
                .collect()
        }
        (None, _) => registry.protocols().collect(),
    };

    Ok(serde_json::to_value(protocols).map_err(AppError::from)?)
}
