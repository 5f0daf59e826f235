// ABOUTME: Muscle mass estimation from lean body mass
// ABOUTME: Pluggable estimator trait with a gender-specific lean-fraction default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Muscle Mass Estimation
//!
//! Skinfolds only give fat and lean mass. Total and skeletal muscle are
//! estimated as fixed fractions of lean mass.
//!
//! # Scientific References
//!
//! - Janssen, I. et al. (2000). Skeletal muscle mass and distribution in 468 men and
//!   women aged 18-88 yr. *Journal of Applied Physiology*, 89(1), 81-88.
//!   <https://doi.org/10.1152/jappl.2000.89.1.81>

use crate::config::intelligence::MuscleEstimationConfig;
use pierre_core::models::Gender;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Muscle estimate in kilograms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MuscleEstimate {
    /// Total muscle mass (kg)
    pub muscle_mass_kg: f64,
    /// Skeletal muscle mass (kg), when the estimator provides one
    pub skeletal_muscle_kg: Option<f64>,
}

/// Estimates muscle from lean mass
pub trait MuscleEstimator: fmt::Debug + Send + Sync {
    /// Estimate muscle for a lean mass and gender
    ///
    /// Implementations must return non-negative values with
    /// `skeletal_muscle_kg <= muscle_mass_kg <= lean_mass_kg`. Estimators
    /// without a skeletal-muscle model return `None` for it.
    fn estimate(&self, lean_mass_kg: f64, gender: Gender) -> MuscleEstimate;
}

/// Fixed lean-mass fractions per gender
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeanFractionEstimator {
    config: MuscleEstimationConfig,
}

impl LeanFractionEstimator {
    /// Create an estimator from validated fractions
    #[must_use]
    pub const fn new(config: MuscleEstimationConfig) -> Self {
        Self { config }
    }

    const fn fractions(&self, gender: Gender) -> (f64, f64) {
        match gender {
            Gender::Male => (
                self.config.male_muscle_fraction,
                self.config.male_skeletal_fraction,
            ),
            Gender::Female => (
                self.config.female_muscle_fraction,
                self.config.female_skeletal_fraction,
            ),
        }
    }
}

impl Default for LeanFractionEstimator {
    fn default() -> Self {
        Self::new(MuscleEstimationConfig::default())
    }
}

impl MuscleEstimator for LeanFractionEstimator {
    fn estimate(&self, lean_mass_kg: f64, gender: Gender) -> MuscleEstimate {
        let lean = lean_mass_kg.max(0.0);
        let (muscle_fraction, skeletal_fraction) = self.fractions(gender);
        MuscleEstimate {
            muscle_mass_kg: lean * muscle_fraction,
            skeletal_muscle_kg: Some(lean * skeletal_fraction.min(muscle_fraction)),
        }
    }
}
