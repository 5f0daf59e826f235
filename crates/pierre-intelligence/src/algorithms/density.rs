// ABOUTME: Body density prediction equations from skinfold thickness
// ABOUTME: Jackson-Pollock 3/7, Faulkner, Guedes and the nine-site athlete equation behind a pluggable table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Body Density Equations
//!
//! # Scientific References
//!
//! - Jackson, A.S. & Pollock, M.L. (1978). Generalized equations for predicting body
//!   density of men. *British Journal of Nutrition*, 40(3), 497-504.
//!   <https://doi.org/10.1079/BJN19780152>
//! - Jackson, A.S., Pollock, M.L. & Ward, A. (1980). Generalized equations for predicting
//!   body density of women. *Medicine and Science in Sports and Exercise*, 12(3), 175-181.
//! - Faulkner, J.A. (1968). Physiology of swimming and diving. In: Falls, H. (Ed.),
//!   *Exercise Physiology*. Academic Press.
//! - Guedes, D.P. (1985). *Estudo da gordura corporal através da mensuração dos valores
//!   de densidade corporal e da espessura de dobras cutâneas em universitários*. UFSM.
//! - Parrillo, J. & Greenwood-Robinson, M. (1993). *High-Performance Body-Building*.

use crate::protocols::{normalize_protocol_id, protocol_ids};
use pierre_core::constants::anthropometry::{SIRI_NUMERATOR, SIRI_OFFSET};
use pierre_core::constants::units::POUNDS_PER_KG;
use pierre_core::errors::{CompositionError, MeasurementIssueReason};
use pierre_core::models::{Gender, MeasurementSet, SkinfoldSite};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Everything a density equation may consume
#[derive(Debug, Clone, Copy)]
pub struct FormulaInput<'a> {
    /// Ordered sites required by the protocol for this gender
    pub sites: &'a [SkinfoldSite],
    /// Submitted measurements
    pub measurements: &'a MeasurementSet,
    /// Subject gender
    pub gender: Gender,
    /// Subject age (years)
    pub age: u32,
    /// Subject weight (kg)
    pub weight_kg: f64,
}

impl FormulaInput<'_> {
    /// Sum of the required sites (mm)
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::InvalidMeasurement` if a required site is missing
    pub fn sum_of_skinfolds(&self) -> Result<f64, CompositionError> {
        self.sites.iter().try_fold(0.0, |total, site| {
            self.measurements
                .get(*site)
                .map(|value| total + value)
                .ok_or(CompositionError::InvalidMeasurement {
                    site: *site,
                    reason: MeasurementIssueReason::Missing,
                })
        })
    }
}

/// A body density prediction equation
pub trait DensityFormula: fmt::Debug + Send + Sync {
    /// Predict body density (g/cm³)
    ///
    /// # Errors
    ///
    /// Returns an error if an input the equation needs is missing
    fn density(&self, input: &FormulaInput<'_>) -> Result<f64, CompositionError>;

    /// Short identifier for logging
    fn name(&self) -> &str;

    /// Largest sum of skinfolds (mm) for which the equation stays at or below
    /// `max_percent_fat`, when the equation's domain is narrower than the caliper range
    fn max_sum_of_skinfolds(
        &self,
        _input: &FormulaInput<'_>,
        _max_percent_fat: f64,
    ) -> Option<f64> {
        None
    }
}

/// Built-in density equations
///
/// - `JacksonPollock3Male`: chest, abdominal, thigh (18-61 years)
/// - `JacksonPollock3Female`: triceps, suprailiac, thigh (18-55 years)
/// - `JacksonPollock7Male` / `JacksonPollock7Female`: seven-site sum
/// - `Faulkner`: four-site linear %fat, converted to density
/// - `GuedesMale` / `GuedesFemale`: log-sum equations for Brazilian adults
/// - `Parrillo9`: nine-site %fat per pound of body weight, converted to density
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DensityAlgorithm {
    /// Db = 1.10938 - 0.0008267·S + 0.0000016·S² - 0.0002574·age
    JacksonPollock3Male,
    /// Db = 1.0994921 - 0.0009929·S + 0.0000023·S² - 0.0001392·age
    JacksonPollock3Female,
    /// Db = 1.112 - 0.00043499·S + 0.00000055·S² - 0.00028826·age
    JacksonPollock7Male,
    /// Db = 1.097 - 0.00046971·S + 0.00000056·S² - 0.00012828·age
    JacksonPollock7Female,
    /// %fat = 0.153·S + 5.783
    Faulkner,
    /// Db = 1.17136 - 0.06706·log10(S)
    GuedesMale,
    /// Db = 1.16650 - 0.07063·log10(S)
    GuedesFemale,
    /// %fat = 27·S / weight(lb)
    Parrillo9,
}

const FAULKNER_SLOPE: f64 = 0.153;
const FAULKNER_INTERCEPT: f64 = 5.783;
const PARRILLO_FACTOR: f64 = 27.0;

/// Quadratic sum-of-skinfolds equation with an age term
fn quadratic_density(
    intercept: f64,
    linear: f64,
    quadratic: f64,
    age_coef: f64,
    sum: f64,
    age: f64,
) -> f64 {
    let base = quadratic.mul_add(sum * sum, linear.mul_add(-sum, intercept));
    age_coef.mul_add(-age, base)
}

/// Invert Siri so equations that predict %fat share the density contract
fn density_from_percent(percent_fat: f64) -> f64 {
    SIRI_NUMERATOR / (percent_fat + SIRI_OFFSET)
}

impl DensityAlgorithm {
    /// Predict density for the given input
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::InvalidMeasurement` if a required site is missing
    pub fn compute(&self, input: &FormulaInput<'_>) -> Result<f64, CompositionError> {
        let sum = input.sum_of_skinfolds()?;
        let age = f64::from(input.age);

        let density = match self {
            Self::JacksonPollock3Male => {
                quadratic_density(1.109_38, 0.000_826_7, 0.000_001_6, 0.000_257_4, sum, age)
            }
            Self::JacksonPollock3Female => {
                quadratic_density(1.099_492_1, 0.000_992_9, 0.000_002_3, 0.000_139_2, sum, age)
            }
            Self::JacksonPollock7Male => {
                quadratic_density(1.112, 0.000_434_99, 0.000_000_55, 0.000_288_26, sum, age)
            }
            Self::JacksonPollock7Female => {
                quadratic_density(1.097, 0.000_469_71, 0.000_000_56, 0.000_128_28, sum, age)
            }
            Self::Faulkner => density_from_percent(FAULKNER_SLOPE.mul_add(sum, FAULKNER_INTERCEPT)),
            Self::GuedesMale => 0.067_06f64.mul_add(-sum.log10(), 1.171_36),
            Self::GuedesFemale => 0.070_63f64.mul_add(-sum.log10(), 1.166_50),
            Self::Parrillo9 => {
                density_from_percent(PARRILLO_FACTOR * sum / (input.weight_kg * POUNDS_PER_KG))
            }
        };

        Ok(density)
    }

    /// Get algorithm name for logging and debugging
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::JacksonPollock3Male => "jackson_pollock_3_male",
            Self::JacksonPollock3Female => "jackson_pollock_3_female",
            Self::JacksonPollock7Male => "jackson_pollock_7_male",
            Self::JacksonPollock7Female => "jackson_pollock_7_female",
            Self::Faulkner => "faulkner",
            Self::GuedesMale => "guedes_male",
            Self::GuedesFemale => "guedes_female",
            Self::Parrillo9 => "parrillo_9",
        }
    }

    /// Largest sum of skinfolds (mm) the equation supports for this input
    ///
    /// Equations that predict %fat directly are bounded by the sum at which they
    /// reach `max_percent_fat`. Parrillo's bound scales with body weight.
    #[must_use]
    pub fn max_sum_of_skinfolds(
        &self,
        input: &FormulaInput<'_>,
        max_percent_fat: f64,
    ) -> Option<f64> {
        match self {
            Self::Faulkner => Some((max_percent_fat - FAULKNER_INTERCEPT) / FAULKNER_SLOPE),
            Self::Parrillo9 => {
                Some(max_percent_fat * input.weight_kg * POUNDS_PER_KG / PARRILLO_FACTOR)
            }
            _ => None,
        }
    }
}

impl DensityFormula for DensityAlgorithm {
    fn density(&self, input: &FormulaInput<'_>) -> Result<f64, CompositionError> {
        self.compute(input)
    }

    fn max_sum_of_skinfolds(
        &self,
        input: &FormulaInput<'_>,
        max_percent_fat: f64,
    ) -> Option<f64> {
        Self::max_sum_of_skinfolds(self, input, max_percent_fat)
    }

    fn name(&self) -> &str {
        Self::name(self)
    }
}

/// Density equations keyed by `(protocol, gender)`
#[derive(Debug, Clone, Default)]
pub struct DensityFormulaTable {
    entries: BTreeMap<(String, Gender), Arc<dyn DensityFormula>>,
}

impl DensityFormulaTable {
    /// Empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard table covering every protocol in the standard registry
    #[must_use]
    pub fn standard() -> Self {
        use protocol_ids::{FAULKNER, GUEDES, POLLOCK_3, POLLOCK_7, POLLOCK_9};

        Self::new()
            .with_uniform(FAULKNER, DensityAlgorithm::Faulkner)
            .with_formula(POLLOCK_3, Gender::Male, DensityAlgorithm::JacksonPollock3Male)
            .with_formula(POLLOCK_3, Gender::Female, DensityAlgorithm::JacksonPollock3Female)
            .with_formula(POLLOCK_7, Gender::Male, DensityAlgorithm::JacksonPollock7Male)
            .with_formula(POLLOCK_7, Gender::Female, DensityAlgorithm::JacksonPollock7Female)
            .with_uniform(POLLOCK_9, DensityAlgorithm::Parrillo9)
            .with_formula(GUEDES, Gender::Male, DensityAlgorithm::GuedesMale)
            .with_formula(GUEDES, Gender::Female, DensityAlgorithm::GuedesFemale)
    }

    /// Register (or replace) the equation for one protocol and gender
    #[must_use]
    pub fn with_formula(
        mut self,
        protocol_id: &str,
        gender: Gender,
        formula: impl DensityFormula + 'static,
    ) -> Self {
        self.entries
            .insert((normalize_protocol_id(protocol_id), gender), Arc::new(formula));
        self
    }

    /// Register the same equation for both genders
    #[must_use]
    pub fn with_uniform(
        self,
        protocol_id: &str,
        formula: impl DensityFormula + Clone + 'static,
    ) -> Self {
        self.with_formula(protocol_id, Gender::Male, formula.clone())
            .with_formula(protocol_id, Gender::Female, formula)
    }

    /// Equation for a protocol and gender
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::UnknownProtocol` if the protocol has no entry at all,
    /// or `CompositionError::UnsupportedGender` if only the other gender is covered
    pub fn formula_for(
        &self,
        protocol_id: &str,
        gender: Gender,
    ) -> Result<&dyn DensityFormula, CompositionError> {
        let key = normalize_protocol_id(protocol_id);
        if let Some(formula) = self.entries.get(&(key.clone(), gender)) {
            return Ok(formula.as_ref());
        }
        if Gender::ALL
            .iter()
            .any(|other| self.entries.contains_key(&(key.clone(), *other)))
        {
            return Err(CompositionError::UnsupportedGender {
                protocol_id: key,
                gender,
            });
        }
        Err(CompositionError::unknown_protocol(protocol_id))
    }

    /// Predict body density for a protocol
    ///
    /// # Errors
    ///
    /// Propagates lookup errors from [`Self::formula_for`] and input errors from the equation
    pub fn compute_density(
        &self,
        protocol_id: &str,
        input: &FormulaInput<'_>,
    ) -> Result<f64, CompositionError> {
        self.formula_for(protocol_id, input.gender)?.density(input)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use SkinfoldSite::{Abdominal, Chest, Thigh};

    fn input<'a>(sites: &'a [SkinfoldSite], set: &'a MeasurementSet, age: u32) -> FormulaInput<'a> {
        FormulaInput {
            sites,
            measurements: set,
            gender: Gender::Male,
            age,
            weight_kg: 80.0,
        }
    }

    #[test]
    fn test_jackson_pollock_3_male_reference_row() {
        // S = 60 mm, age 30:
        // 1.10938 - 0.0008267*60 + 0.0000016*3600 - 0.0002574*30 = 1.057816
        let sites = [Chest, Abdominal, Thigh];
        let set = MeasurementSet::new()
            .with(Chest, 15.0)
            .with(Abdominal, 25.0)
            .with(Thigh, 20.0);

        let density = DensityAlgorithm::JacksonPollock3Male
            .compute(&input(&sites, &set, 30))
            .unwrap();
        assert!((density - 1.057_816).abs() < 1e-9);
    }

    #[test]
    fn test_faulkner_round_trips_through_siri() {
        let sites = [Chest];
        let set = MeasurementSet::new().with(Chest, 40.0);

        let density = DensityAlgorithm::Faulkner
            .compute(&input(&sites, &set, 30))
            .unwrap();
        let percent = SIRI_NUMERATOR / density - SIRI_OFFSET;
        assert!((percent - 0.153f64.mul_add(40.0, 5.783)).abs() < 1e-9);
    }

    #[test]
    fn test_parrillo_domain_scales_with_weight() {
        let sites = [Chest];
        let set = MeasurementSet::new().with(Chest, 40.0);
        let light = FormulaInput {
            weight_kg: 45.0,
            ..input(&sites, &set, 30)
        };
        let heavy = input(&sites, &set, 30);

        let light_max = DensityAlgorithm::Parrillo9
            .max_sum_of_skinfolds(&light, 80.0)
            .unwrap();
        let heavy_max = DensityAlgorithm::Parrillo9
            .max_sum_of_skinfolds(&heavy, 80.0)
            .unwrap();
        assert!(light_max < 9.0 * 35.0);
        assert!(heavy_max > light_max);

        // At the bound the equation yields exactly the limit
        let at_bound = MeasurementSet::new().with(Chest, light_max);
        let density = DensityAlgorithm::Parrillo9
            .compute(&FormulaInput {
                measurements: &at_bound,
                ..light
            })
            .unwrap();
        assert!((SIRI_NUMERATOR / density - SIRI_OFFSET - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_coefficient_equations_have_no_domain_bound() {
        let sites = [Chest];
        let set = MeasurementSet::new().with(Chest, 40.0);

        assert!(DensityAlgorithm::JacksonPollock7Male
            .max_sum_of_skinfolds(&input(&sites, &set, 30), 80.0)
            .is_none());
        let faulkner_max = DensityAlgorithm::Faulkner
            .max_sum_of_skinfolds(&input(&sites, &set, 30), 80.0)
            .unwrap();
        assert!(faulkner_max > 4.0 * 50.0);
    }

    #[test]
    fn test_missing_site_is_reported() {
        let sites = [Chest, Thigh];
        let set = MeasurementSet::new().with(Chest, 10.0);

        let result = DensityAlgorithm::JacksonPollock7Male.compute(&input(&sites, &set, 30));
        assert!(matches!(
            result,
            Err(CompositionError::InvalidMeasurement { site: Thigh, .. })
        ));
    }

    #[test]
    fn test_table_lookup_errors() {
        let table = DensityFormulaTable::new().with_formula(
            "custom",
            Gender::Female,
            DensityAlgorithm::GuedesFemale,
        );

        assert!(table.formula_for("custom", Gender::Female).is_ok());
        assert!(matches!(
            table.formula_for("custom", Gender::Male),
            Err(CompositionError::UnsupportedGender { .. })
        ));
        assert!(matches!(
            table.formula_for("other", Gender::Male),
            Err(CompositionError::UnknownProtocol { .. })
        ));
    }
}
