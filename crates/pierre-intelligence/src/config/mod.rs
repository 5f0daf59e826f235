// ABOUTME: Configuration module for pierre-intelligence crate
// ABOUTME: Re-exports body-composition engine configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Engine configuration (measurement bounds, plausibility, muscle, goal weights)
pub mod intelligence;

pub use intelligence::{BodyCompositionConfig, ConfigError};
