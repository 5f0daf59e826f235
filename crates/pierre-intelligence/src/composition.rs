// ABOUTME: Derives body-fat percentage and mass split from body density
// ABOUTME: Siri conversion with a plausibility guard, then fat, lean and muscle masses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Composition Derivation
//!
//! # Scientific References
//!
//! - Siri, W.E. (1961). Body composition from fluid spaces and density: analysis of
//!   methods. In: Brozek, J. & Henschel, A. (Eds.), *Techniques for Measuring Body
//!   Composition*, 223-244. National Academy of Sciences.

use crate::algorithms::muscle::{LeanFractionEstimator, MuscleEstimator};
use crate::config::intelligence::PlausibilityConfig;
use pierre_core::constants::anthropometry::{SIRI_NUMERATOR, SIRI_OFFSET};
use pierre_core::errors::CompositionError;
use pierre_core::models::Subject;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Masses and percentages derived from one density value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedComposition {
    /// Body density (g/cm³)
    pub density_g_cm3: f64,
    /// Body fat after clamping (%)
    pub percent_body_fat: f64,
    /// Fat mass (kg)
    pub fat_mass_kg: f64,
    /// Weight minus fat mass (kg)
    pub lean_mass_kg: f64,
    /// Estimated total muscle (kg)
    pub muscle_mass_kg: f64,
    /// Estimated skeletal muscle (kg)
    pub skeletal_muscle_kg: Option<f64>,
    /// Sum of the protocol's sites (mm)
    pub sum_of_skinfolds_mm: f64,
}

impl DerivedComposition {
    /// Attach the protocol and classification label
    #[must_use]
    pub fn classified(
        self,
        protocol_id: impl Into<String>,
        classification: impl Into<String>,
    ) -> CompositionResult {
        CompositionResult {
            protocol_id: protocol_id.into(),
            density_g_cm3: self.density_g_cm3,
            percent_body_fat: self.percent_body_fat,
            fat_mass_kg: self.fat_mass_kg,
            lean_mass_kg: self.lean_mass_kg,
            muscle_mass_kg: self.muscle_mass_kg,
            skeletal_muscle_kg: self.skeletal_muscle_kg,
            classification: classification.into(),
            sum_of_skinfolds_mm: self.sum_of_skinfolds_mm,
        }
    }
}

/// Full result of a body-composition calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionResult {
    /// Protocol used (normalized identifier)
    pub protocol_id: String,
    /// Body density (g/cm³)
    pub density_g_cm3: f64,
    /// Body fat (%)
    pub percent_body_fat: f64,
    /// Fat mass (kg)
    pub fat_mass_kg: f64,
    /// Lean mass (kg)
    pub lean_mass_kg: f64,
    /// Total muscle (kg)
    pub muscle_mass_kg: f64,
    /// Skeletal muscle (kg), when estimated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skeletal_muscle_kg: Option<f64>,
    /// Classification band label
    pub classification: String,
    /// Sum of the protocol's sites (mm)
    pub sum_of_skinfolds_mm: f64,
}

/// Siri equation: body fat percentage from density
#[must_use]
pub fn siri_percent_fat(density_g_cm3: f64) -> f64 {
    SIRI_NUMERATOR / density_g_cm3 - SIRI_OFFSET
}

/// Converts density into a composition breakdown
#[derive(Debug, Clone)]
pub struct CompositionDeriver {
    plausibility: PlausibilityConfig,
    muscle: Arc<dyn MuscleEstimator>,
}

impl Default for CompositionDeriver {
    fn default() -> Self {
        Self::new(PlausibilityConfig::default(), Arc::new(LeanFractionEstimator::default()))
    }
}

impl CompositionDeriver {
    /// Create a deriver with a plausibility guard and muscle estimator
    #[must_use]
    pub fn new(plausibility: PlausibilityConfig, muscle: Arc<dyn MuscleEstimator>) -> Self {
        Self {
            plausibility,
            muscle,
        }
    }

    /// Derive percentages and masses
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::ImplausibleResult` if density is not a positive finite
    /// number or the raw Siri percentage falls outside the plausible range
    pub fn derive(
        &self,
        density_g_cm3: f64,
        subject: &Subject,
        sum_of_skinfolds_mm: f64,
    ) -> Result<DerivedComposition, CompositionError> {
        if !density_g_cm3.is_finite() || density_g_cm3 <= 0.0 {
            error!(
                density = density_g_cm3,
                gender = %subject.gender,
                age = subject.age,
                "Formula table produced a non-positive density"
            );
            return Err(CompositionError::ImplausibleResult {
                value: density_g_cm3,
                detail: format!("body density {density_g_cm3} is not a positive number"),
            });
        }

        let raw_percent = siri_percent_fat(density_g_cm3);
        let guard = &self.plausibility;
        if !(guard.raw_min_percent..=guard.raw_max_percent).contains(&raw_percent) {
            error!(
                density = density_g_cm3,
                raw_percent,
                sum_of_skinfolds_mm,
                "Siri body fat outside plausible range"
            );
            return Err(CompositionError::ImplausibleResult {
                value: raw_percent,
                detail: format!(
                    "body fat {raw_percent:.2}% outside plausible range {}..{}%",
                    guard.raw_min_percent, guard.raw_max_percent
                ),
            });
        }

        let percent_body_fat = raw_percent.clamp(guard.clamp_min_percent, guard.clamp_max_percent);
        let fat_mass_kg = subject.weight_kg * percent_body_fat / 100.0;
        let lean_mass_kg = subject.weight_kg - fat_mass_kg;
        let muscle = self.muscle.estimate(lean_mass_kg, subject.gender);

        Ok(DerivedComposition {
            density_g_cm3,
            percent_body_fat,
            fat_mass_kg,
            lean_mass_kg,
            muscle_mass_kg: muscle.muscle_mass_kg,
            skeletal_muscle_kg: muscle.skeletal_muscle_kg,
            sum_of_skinfolds_mm,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use pierre_core::models::Gender;

    fn subject() -> Subject {
        Subject::new(Gender::Male, 30, 80.0).unwrap()
    }

    #[test]
    fn test_masses_add_up_to_weight() {
        let result = CompositionDeriver::default()
            .derive(1.06, &subject(), 60.0)
            .unwrap();
        assert!((result.fat_mass_kg + result.lean_mass_kg - 80.0).abs() < 1e-9);
        assert!((result.percent_body_fat - siri_percent_fat(1.06)).abs() < 1e-12);
    }

    #[test]
    fn test_slightly_negative_percent_is_clamped() {
        // 495 / 1.105 - 450 = -2.04%
        let result = CompositionDeriver::default()
            .derive(1.105, &subject(), 9.0)
            .unwrap();
        assert!(result.percent_body_fat.abs() < f64::EPSILON);
        assert!((result.lean_mass_kg - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_implausible_density_rejected() {
        let deriver = CompositionDeriver::default();
        for density in [0.0, -1.0, f64::NAN, 1.2, 0.8] {
            assert!(matches!(
                deriver.derive(density, &subject(), 30.0),
                Err(CompositionError::ImplausibleResult { .. })
            ));
        }
    }
}
