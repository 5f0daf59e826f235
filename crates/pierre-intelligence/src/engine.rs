// ABOUTME: Body-composition engine facade wiring registry, validator, formulas and classifier
// ABOUTME: Snapshot handle allows atomic replacement of the table set while calls are in flight
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::algorithms::density::{DensityFormulaTable, FormulaInput};
use crate::algorithms::muscle::{LeanFractionEstimator, MuscleEstimator};
use crate::classification::{ClassificationTable, CompositionClassifier};
use crate::composition::{CompositionDeriver, CompositionResult};
use crate::config::intelligence::BodyCompositionConfig;
use crate::goal_scorer::GoalScorer;
use crate::protocols::ProtocolRegistry;
use crate::validation::{MeasurementValidator, ValidationReport};
use pierre_core::errors::{CompositionError, ValidationIssue};
use pierre_core::models::{MeasurementSet, Subject};
use rayon::prelude::*;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// One calculation request
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionRequest {
    /// Protocol identifier
    pub protocol_id: String,
    /// Person assessed
    pub subject: Subject,
    /// Skinfold measurements
    pub measurements: MeasurementSet,
}

/// Read-only engine combining every table a calculation needs
#[derive(Debug, Clone)]
pub struct CompositionEngine {
    config: BodyCompositionConfig,
    registry: ProtocolRegistry,
    formulas: DensityFormulaTable,
    deriver: CompositionDeriver,
    classifier: CompositionClassifier,
    goals: GoalScorer,
}

impl Default for CompositionEngine {
    fn default() -> Self {
        Self::with_config(BodyCompositionConfig::default())
    }
}

impl CompositionEngine {
    /// Standard tables with the given configuration
    #[must_use]
    pub fn with_config(config: BodyCompositionConfig) -> Self {
        Self::builder(config).build()
    }

    /// Start from the standard tables and replace parts as needed
    #[must_use]
    pub fn builder(config: BodyCompositionConfig) -> CompositionEngineBuilder {
        CompositionEngineBuilder {
            registry: ProtocolRegistry::standard(),
            formulas: DensityFormulaTable::standard(),
            classification: ClassificationTable::ace(),
            muscle: Arc::new(LeanFractionEstimator::new(config.muscle)),
            config,
        }
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &BodyCompositionConfig {
        &self.config
    }

    /// Protocol catalogue
    #[must_use]
    pub const fn registry(&self) -> &ProtocolRegistry {
        &self.registry
    }

    /// Classifier
    #[must_use]
    pub const fn classifier(&self) -> &CompositionClassifier {
        &self.classifier
    }

    /// Anamnese goal scorer
    #[must_use]
    pub const fn goal_scorer(&self) -> &GoalScorer {
        &self.goals
    }

    /// Validate measurements without calculating
    ///
    /// Once every site is in range, the sum is also checked against the density
    /// equation's domain for this subject.
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::UnknownProtocol` or `CompositionError::UnsupportedGender`
    pub fn validate(
        &self,
        protocol_id: &str,
        subject: &Subject,
        measurements: &MeasurementSet,
    ) -> Result<ValidationReport, CompositionError> {
        let mut report = MeasurementValidator::new(&self.registry, &self.config.measurement)
            .validate(protocol_id, subject, measurements)?;

        if report.issues.iter().all(|issue| issue.site().is_none()) {
            if let Some(issue) = self.formula_domain_issue(&report, subject, measurements) {
                report.issues.push(issue);
            }
        }
        Ok(report)
    }

    fn formula_domain_issue(
        &self,
        report: &ValidationReport,
        subject: &Subject,
        measurements: &MeasurementSet,
    ) -> Option<ValidationIssue> {
        let formula = self
            .formulas
            .formula_for(&report.protocol_id, subject.gender)
            .ok()?;
        let input = FormulaInput {
            sites: &report.required_sites,
            measurements,
            gender: subject.gender,
            age: subject.age,
            weight_kg: subject.weight_kg,
        };
        let max_sum_mm =
            formula.max_sum_of_skinfolds(&input, self.config.plausibility.raw_max_percent)?;
        let sum_mm = input.sum_of_skinfolds().ok()?;

        (sum_mm > max_sum_mm).then_some(ValidationIssue::SkinfoldSumOutOfRange {
            sum_mm,
            max_sum_mm,
        })
    }

    /// Run the full pipeline for one subject
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::Validation` with every issue found, a lookup error for
    /// unknown protocols or genders, `InvalidInput` for an out-of-range subject, or
    /// `ImplausibleResult` if the formula produced an impossible value
    pub fn calculate(
        &self,
        protocol_id: &str,
        subject: &Subject,
        measurements: &MeasurementSet,
    ) -> Result<CompositionResult, CompositionError> {
        subject.validate()?;

        let report = self.validate(protocol_id, subject, measurements)?;
        let normalized_id = report.protocol_id.clone();
        if !report.is_valid() {
            warn!(
                protocol = %normalized_id,
                issues = report.issues.len(),
                "Measurement validation failed"
            );
        }
        let sites = report.into_result()?;

        let input = FormulaInput {
            sites: &sites,
            measurements,
            gender: subject.gender,
            age: subject.age,
            weight_kg: subject.weight_kg,
        };
        let sum_of_skinfolds_mm = input.sum_of_skinfolds()?;
        let density = self.formulas.compute_density(&normalized_id, &input)?;

        debug!(
            protocol = %normalized_id,
            gender = %subject.gender,
            sum_of_skinfolds_mm,
            density,
            "density computed"
        );

        let derived = self.deriver.derive(density, subject, sum_of_skinfolds_mm)?;
        let label = self
            .classifier
            .classify(derived.percent_body_fat, subject.gender, Some(subject.age))?
            .to_owned();

        Ok(derived.classified(normalized_id, label))
    }

    /// Run many independent calculations in parallel
    ///
    /// Results keep the order of `requests`.
    #[must_use]
    pub fn calculate_batch(
        &self,
        requests: &[CompositionRequest],
    ) -> Vec<Result<CompositionResult, CompositionError>> {
        requests
            .par_iter()
            .map(|request| {
                self.calculate(&request.protocol_id, &request.subject, &request.measurements)
            })
            .collect()
    }
}

/// Assembles a [`CompositionEngine`] from custom parts
#[derive(Debug)]
pub struct CompositionEngineBuilder {
    config: BodyCompositionConfig,
    registry: ProtocolRegistry,
    formulas: DensityFormulaTable,
    classification: ClassificationTable,
    muscle: Arc<dyn MuscleEstimator>,
}

impl CompositionEngineBuilder {
    /// Use a custom protocol catalogue
    #[must_use]
    pub fn registry(mut self, registry: ProtocolRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Use a custom density formula table
    #[must_use]
    pub fn formulas(mut self, formulas: DensityFormulaTable) -> Self {
        self.formulas = formulas;
        self
    }

    /// Use a custom classification table
    #[must_use]
    pub fn classification(mut self, classification: ClassificationTable) -> Self {
        self.classification = classification;
        self
    }

    /// Use a custom muscle estimator
    #[must_use]
    pub fn muscle_estimator(mut self, muscle: Arc<dyn MuscleEstimator>) -> Self {
        self.muscle = muscle;
        self
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> CompositionEngine {
        CompositionEngine {
            deriver: CompositionDeriver::new(self.config.plausibility, self.muscle),
            classifier: CompositionClassifier::new(self.classification),
            goals: GoalScorer::new(self.config.goals),
            registry: self.registry,
            formulas: self.formulas,
            config: self.config,
        }
    }
}

/// Shared pointer to the current engine, replaceable at runtime
#[derive(Debug, Clone)]
pub struct EngineHandle {
    current: Arc<RwLock<Arc<CompositionEngine>>>,
}

impl EngineHandle {
    /// Wrap an engine
    #[must_use]
    pub fn new(engine: CompositionEngine) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(engine))),
        }
    }

    /// Current engine; stays consistent for the caller even if replaced afterwards
    #[must_use]
    pub fn snapshot(&self) -> Arc<CompositionEngine> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a new engine, returning the previous one
    pub fn replace(&self, engine: CompositionEngine) -> Arc<CompositionEngine> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(engine))
    }
}

impl Default for EngineHandle {
    fn default() -> Self {
        Self::new(CompositionEngine::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use pierre_core::models::{Gender, SkinfoldSite};

    #[test]
    fn test_snapshot_survives_replace() {
        let handle = EngineHandle::default();
        let before = handle.snapshot();

        let mut config = BodyCompositionConfig::default();
        config.measurement.max_skinfold_mm = 60.0;
        let previous = handle.replace(CompositionEngine::with_config(config));

        assert!(Arc::ptr_eq(&before, &previous));
        assert!((before.config().measurement.max_skinfold_mm - 50.0).abs() < f64::EPSILON);
        assert!(
            (handle.snapshot().config().measurement.max_skinfold_mm - 60.0).abs() < f64::EPSILON
        );
    }

    #[test]
    fn test_unsupported_gender_in_formula_table() {
        let formulas = DensityFormulaTable::new().with_formula(
            "faulkner",
            Gender::Female,
            crate::algorithms::density::DensityAlgorithm::Faulkner,
        );
        let engine = CompositionEngine::builder(BodyCompositionConfig::default())
            .formulas(formulas)
            .build();
        let measurements = MeasurementSet::new()
            .with(SkinfoldSite::Subscapular, 12.0)
            .with(SkinfoldSite::Triceps, 10.0)
            .with(SkinfoldSite::Abdominal, 20.0)
            .with(SkinfoldSite::Suprailiac, 14.0);
        let subject = Subject::new(Gender::Male, 30, 80.0).unwrap();

        assert!(matches!(
            engine.calculate("faulkner", &subject, &measurements),
            Err(CompositionError::UnsupportedGender { .. })
        ));
    }
}
