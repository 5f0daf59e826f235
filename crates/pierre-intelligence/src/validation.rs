// ABOUTME: Measurement validation against a protocol's required sites and caliper bounds
// ABOUTME: Accumulates every problem in one pass instead of stopping at the first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::intelligence::MeasurementBoundsConfig;
use crate::protocols::ProtocolRegistry;
use pierre_core::errors::{CompositionError, MeasurementIssueReason, ValidationIssue};
use pierre_core::models::{MeasurementSet, SkinfoldSite, Subject};
use serde::Serialize;

/// Outcome of validating a measurement set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Normalized protocol identifier
    pub protocol_id: String,
    /// Sites the protocol requires for the subject's gender, in order
    pub required_sites: Vec<SkinfoldSite>,
    /// Every problem found; empty means valid
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Whether no issue was found
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Convert into a `Result`, carrying all issues on failure
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::Validation` with every issue when invalid
    pub fn into_result(self) -> Result<Vec<SkinfoldSite>, CompositionError> {
        if self.issues.is_empty() {
            Ok(self.required_sites)
        } else {
            Err(CompositionError::Validation(self.issues))
        }
    }
}

/// Checks measurement sets against protocol requirements
#[derive(Debug, Clone, Copy)]
pub struct MeasurementValidator<'a> {
    registry: &'a ProtocolRegistry,
    bounds: &'a MeasurementBoundsConfig,
}

impl<'a> MeasurementValidator<'a> {
    /// Create a validator over a registry and caliper bounds
    #[must_use]
    pub const fn new(registry: &'a ProtocolRegistry, bounds: &'a MeasurementBoundsConfig) -> Self {
        Self { registry, bounds }
    }

    /// Validate a subject's measurements for a protocol
    ///
    /// Age eligibility and every required site are checked; nothing
    /// short-circuits, so the report lists all problems at once.
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::UnknownProtocol` or
    /// `CompositionError::UnsupportedGender` when the protocol cannot be resolved
    pub fn validate(
        &self,
        protocol_id: &str,
        subject: &Subject,
        measurements: &MeasurementSet,
    ) -> Result<ValidationReport, CompositionError> {
        let protocol = self.registry.describe(protocol_id)?;
        let required = self
            .registry
            .resolve_required_sites(protocol_id, subject.gender)?;

        let mut issues = Vec::new();

        if let Some(range) = protocol.age_eligibility {
            if !range.contains(subject.age) {
                issues.push(ValidationIssue::AgeNotEligible {
                    min: range.min,
                    max: range.max,
                    actual: subject.age,
                });
            }
        }

        issues.extend(
            required
                .iter()
                .filter_map(|site| self.check_site(*site, measurements.get(*site))),
        );

        Ok(ValidationReport {
            protocol_id: protocol.id.clone(),
            required_sites: required.to_vec(),
            issues,
        })
    }

    fn check_site(&self, site: SkinfoldSite, value: Option<f64>) -> Option<ValidationIssue> {
        let reason = match value {
            None => MeasurementIssueReason::Missing,
            Some(mm) if !mm.is_finite() => MeasurementIssueReason::NotFinite,
            Some(mm) if self.bounds.contains(mm) => return None,
            Some(mm) if mm < self.bounds.min_skinfold_mm => MeasurementIssueReason::BelowMinimum {
                min_mm: self.bounds.min_skinfold_mm,
            },
            Some(_) => MeasurementIssueReason::AboveMaximum {
                max_mm: self.bounds.max_skinfold_mm,
            },
        };

        Some(ValidationIssue::InvalidMeasurement {
            site,
            reason,
            value,
        })
    }
}
