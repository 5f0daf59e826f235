// ABOUTME: Body-composition engine configuration with validation and env overrides
// ABOUTME: Orchestrates measurement, plausibility, muscle and goal scoring settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine Configuration Module
//!
//! Configuration is organized into domain-specific modules:
//! - `measurement` - Caliper bounds and Siri plausibility guard
//! - `muscle` - Lean-mass fractions for muscle estimation
//! - `goals` - Anamnese scoring weights
//!
//! Configuration is loaded once (defaults, then environment overrides, then
//! validation) and passed to the engine explicitly.

/// Configuration error types
pub mod error;
/// Anamnese goal scoring weights
pub mod goals;
/// Caliper bounds and body-fat plausibility ranges
pub mod measurement;
/// Lean-mass fractions for muscle estimation
pub mod muscle;

pub use error::ConfigError;
pub use goals::GoalScoringWeights;
pub use measurement::{MeasurementBoundsConfig, PlausibilityConfig};
pub use muscle::MuscleEstimationConfig;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::debug;

/// Main engine configuration container
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyCompositionConfig {
    /// Accepted skinfold range
    pub measurement: MeasurementBoundsConfig,
    /// Siri output guard and clamp
    pub plausibility: PlausibilityConfig,
    /// Muscle estimator fractions
    pub muscle: MuscleEstimationConfig,
    /// Anamnese scoring weights
    pub goals: GoalScoringWeights,
}

impl BodyCompositionConfig {
    /// Load configuration from defaults and environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        debug!(
            min_skinfold_mm = config.measurement.min_skinfold_mm,
            max_skinfold_mm = config.measurement.max_skinfold_mm,
            "body composition config loaded"
        );
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistent setting
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_measurement()?;
        self.validate_plausibility()?;
        self.validate_muscle()?;

        if self.goals.declared_objective == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "declared objective weight must be positive",
            ));
        }

        Ok(())
    }

    fn validate_measurement(&self) -> Result<(), ConfigError> {
        let bounds = &self.measurement;
        if !bounds.min_skinfold_mm.is_finite() || !bounds.max_skinfold_mm.is_finite() {
            return Err(ConfigError::ValueOutOfRange(
                "skinfold bounds must be finite",
            ));
        }
        if bounds.min_skinfold_mm <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "min_skinfold_mm must be positive",
            ));
        }
        if bounds.min_skinfold_mm >= bounds.max_skinfold_mm {
            return Err(ConfigError::InvalidRange(
                "min_skinfold_mm must be < max_skinfold_mm",
            ));
        }
        Ok(())
    }

    fn validate_plausibility(&self) -> Result<(), ConfigError> {
        let guard = &self.plausibility;
        if guard.raw_min_percent >= guard.raw_max_percent {
            return Err(ConfigError::InvalidRange(
                "raw_min_percent must be < raw_max_percent",
            ));
        }
        if guard.clamp_min_percent >= guard.clamp_max_percent {
            return Err(ConfigError::InvalidRange(
                "clamp_min_percent must be < clamp_max_percent",
            ));
        }
        if guard.clamp_min_percent < 0.0 || guard.clamp_max_percent > 100.0 {
            return Err(ConfigError::ValueOutOfRange(
                "clamp range must lie within 0-100%",
            ));
        }
        if guard.clamp_min_percent < guard.raw_min_percent
            || guard.clamp_max_percent > guard.raw_max_percent
        {
            return Err(ConfigError::InvalidRange(
                "clamp range must lie within the raw plausibility range",
            ));
        }
        Ok(())
    }

    fn validate_muscle(&self) -> Result<(), ConfigError> {
        let muscle = &self.muscle;
        let fractions = [
            muscle.male_muscle_fraction,
            muscle.female_muscle_fraction,
            muscle.male_skeletal_fraction,
            muscle.female_skeletal_fraction,
        ];
        if fractions.iter().any(|f| !(*f > 0.0 && *f < 1.0)) {
            return Err(ConfigError::ValueOutOfRange(
                "muscle fractions must be between 0 and 1",
            ));
        }
        if muscle.male_skeletal_fraction > muscle.male_muscle_fraction
            || muscle.female_skeletal_fraction > muscle.female_muscle_fraction
        {
            return Err(ConfigError::InvalidRange(
                "skeletal muscle fraction must not exceed total muscle fraction",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        let val = match env::var(env_var_name) {
            Ok(val) => val,
            Err(env::VarError::NotPresent) => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        *target = val
            .trim()
            .parse()
            .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var(
            "PIERRE_BODYCOMP_MIN_SKINFOLD_MM",
            &mut self.measurement.min_skinfold_mm,
        )?;
        Self::apply_env_var(
            "PIERRE_BODYCOMP_MAX_SKINFOLD_MM",
            &mut self.measurement.max_skinfold_mm,
        )?;

        Self::apply_env_var(
            "PIERRE_BODYCOMP_RAW_MIN_PERCENT",
            &mut self.plausibility.raw_min_percent,
        )?;
        Self::apply_env_var(
            "PIERRE_BODYCOMP_RAW_MAX_PERCENT",
            &mut self.plausibility.raw_max_percent,
        )?;
        Self::apply_env_var(
            "PIERRE_BODYCOMP_CLAMP_MIN_PERCENT",
            &mut self.plausibility.clamp_min_percent,
        )?;
        Self::apply_env_var(
            "PIERRE_BODYCOMP_CLAMP_MAX_PERCENT",
            &mut self.plausibility.clamp_max_percent,
        )?;

        Self::apply_env_var(
            "PIERRE_BODYCOMP_MALE_MUSCLE_FRACTION",
            &mut self.muscle.male_muscle_fraction,
        )?;
        Self::apply_env_var(
            "PIERRE_BODYCOMP_FEMALE_MUSCLE_FRACTION",
            &mut self.muscle.female_muscle_fraction,
        )?;
        Self::apply_env_var(
            "PIERRE_BODYCOMP_MALE_SKELETAL_FRACTION",
            &mut self.muscle.male_skeletal_fraction,
        )?;
        Self::apply_env_var(
            "PIERRE_BODYCOMP_FEMALE_SKELETAL_FRACTION",
            &mut self.muscle.female_skeletal_fraction,
        )?;

        Self::apply_env_var(
            "PIERRE_BODYCOMP_OBJECTIVE_WEIGHT",
            &mut self.goals.declared_objective,
        )?;

        Ok(self)
    }
}
