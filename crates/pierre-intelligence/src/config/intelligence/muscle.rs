// ABOUTME: Muscle mass estimation configuration (fractions of lean mass)
// ABOUTME: Gender-specific defaults derived from whole-body MRI reference data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Muscle Estimation Configuration
//!
//! # Scientific References
//!
//! - Janssen, I., et al. (2000). Skeletal muscle mass and distribution in 468 men and women
//!   aged 18-88 yr. *Journal of Applied Physiology*, 89(1), 81-88.
//!   <https://doi.org/10.1152/jappl.2000.89.1.81>

use serde::{Deserialize, Serialize};

/// Fractions of lean mass attributed to muscle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MuscleEstimationConfig {
    /// Total muscle mass / lean mass, men
    pub male_muscle_fraction: f64,
    /// Total muscle mass / lean mass, women
    pub female_muscle_fraction: f64,
    /// Skeletal muscle mass / lean mass, men
    pub male_skeletal_fraction: f64,
    /// Skeletal muscle mass / lean mass, women
    pub female_skeletal_fraction: f64,
}

impl Default for MuscleEstimationConfig {
    fn default() -> Self {
        Self {
            male_muscle_fraction: 0.54,
            female_muscle_fraction: 0.49,
            male_skeletal_fraction: 0.48,
            female_skeletal_fraction: 0.43,
        }
    }
}
