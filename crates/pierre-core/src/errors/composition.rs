// ABOUTME: Domain error types for body-composition calculation and anamnese scoring
// ABOUTME: Accumulated validation issues with field-level detail and AppError conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Composition Error Types
//!
//! - [`ValidationIssue`] - one problem found while validating a measurement set
//! - [`CompositionError`] - every failure the engine can report
//! - Conversion into [`AppError`] so transport layers get a stable code and
//!   a per-field `details` array

use super::{AppError, ErrorCode};
use crate::models::{Gender, SkinfoldSite};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

/// Why a single skinfold measurement was rejected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum MeasurementIssueReason {
    /// The protocol requires the site but no value was supplied
    Missing,
    /// The value is NaN or infinite
    NotFinite,
    /// The value is below the accepted minimum
    BelowMinimum {
        /// Minimum accepted value (mm)
        min_mm: f64,
    },
    /// The value is above the accepted maximum
    AboveMaximum {
        /// Maximum accepted value (mm)
        max_mm: f64,
    },
}

impl MeasurementIssueReason {
    /// Machine-readable reason code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::NotFinite => "not_finite",
            Self::BelowMinimum { .. } => "below_minimum",
            Self::AboveMaximum { .. } => "above_maximum",
        }
    }
}

impl fmt::Display for MeasurementIssueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "measurement is required by the protocol"),
            Self::NotFinite => write!(f, "measurement must be a finite number"),
            Self::BelowMinimum { min_mm } => write!(f, "measurement must be at least {min_mm} mm"),
            Self::AboveMaximum { max_mm } => write!(f, "measurement must be at most {max_mm} mm"),
        }
    }
}

/// A single problem found while validating a measurement set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// Subject age is outside the protocol's eligibility range
    AgeNotEligible {
        /// Minimum eligible age (inclusive)
        min: u32,
        /// Maximum eligible age (inclusive)
        max: u32,
        /// Subject age
        actual: u32,
    },
    /// A required site is missing or out of bounds
    InvalidMeasurement {
        /// Offending site
        site: SkinfoldSite,
        /// Why it was rejected
        reason: MeasurementIssueReason,
        /// Submitted value, if any
        value: Option<f64>,
    },
    /// Every site is in range but their sum is outside the density equation's domain
    SkinfoldSumOutOfRange {
        /// Sum of the protocol's sites (mm)
        sum_mm: f64,
        /// Largest sum the equation supports for this subject (mm)
        max_sum_mm: f64,
    },
}

impl ValidationIssue {
    /// The offending site, when the issue concerns a measurement
    #[must_use]
    pub const fn site(&self) -> Option<SkinfoldSite> {
        match self {
            Self::AgeNotEligible { .. } | Self::SkinfoldSumOutOfRange { .. } => None,
            Self::InvalidMeasurement { site, .. } => Some(*site),
        }
    }

    /// Machine-readable reason code
    #[must_use]
    pub const fn reason_code(&self) -> &'static str {
        match self {
            Self::AgeNotEligible { .. } => "age_not_eligible",
            Self::InvalidMeasurement { reason, .. } => reason.code(),
            Self::SkinfoldSumOutOfRange { .. } => "sum_out_of_range",
        }
    }

    /// `{ site?, reason, message }` entry for error responses
    #[must_use]
    pub fn to_detail(&self) -> serde_json::Value {
        match self.site() {
            Some(site) => json!({
                "site": site.as_str(),
                "reason": self.reason_code(),
                "message": self.to_string(),
            }),
            None => json!({
                "reason": self.reason_code(),
                "message": self.to_string(),
            }),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AgeNotEligible { min, max, actual } => {
                write!(f, "age {actual} is outside the eligible range {min}-{max}")
            }
            Self::InvalidMeasurement {
                site,
                reason,
                value: Some(value),
            } => write!(f, "{site}: {value} mm rejected, {reason}"),
            Self::InvalidMeasurement {
                site,
                reason,
                value: None,
            } => write!(f, "{site}: {reason}"),
            Self::SkinfoldSumOutOfRange { sum_mm, max_sum_mm } => write!(
                f,
                "sum of skinfolds {sum_mm} mm exceeds the supported {max_sum_mm:.1} mm"
            ),
        }
    }
}

/// Errors produced by the body-composition and goal classification engine
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompositionError {
    /// The protocol identifier is not registered
    #[error("Unknown protocol '{protocol_id}'")]
    UnknownProtocol {
        /// Identifier that was requested
        protocol_id: String,
    },

    /// The protocol's site set is gender-keyed and has no entry for this gender
    #[error("Protocol '{protocol_id}' does not support gender {gender}")]
    UnsupportedGender {
        /// Protocol identifier
        protocol_id: String,
        /// Subject gender
        gender: Gender,
    },

    /// Subject age is outside the protocol's eligibility range
    #[error("Age {actual} is not eligible, protocol requires {min}-{max}")]
    AgeNotEligible {
        /// Minimum eligible age (inclusive)
        min: u32,
        /// Maximum eligible age (inclusive)
        max: u32,
        /// Subject age
        actual: u32,
    },

    /// A single measurement is invalid
    #[error("Invalid measurement for {site}: {reason}")]
    InvalidMeasurement {
        /// Offending site
        site: SkinfoldSite,
        /// Why it was rejected
        reason: MeasurementIssueReason,
    },

    /// Validation found one or more problems; all of them are listed
    #[error("Validation failed with {} issue(s)", .0.len())]
    Validation(Vec<ValidationIssue>),

    /// The formula pipeline produced a physiologically impossible value
    #[error("Implausible result: {detail}")]
    ImplausibleResult {
        /// Offending value
        value: f64,
        /// What was out of range
        detail: String,
    },

    /// Malformed or missing input field
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput {
        /// Field name as seen by the caller
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

impl CompositionError {
    /// Create an "invalid input" error
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an "unknown protocol" error
    #[must_use]
    pub fn unknown_protocol(protocol_id: impl Into<String>) -> Self {
        Self::UnknownProtocol {
            protocol_id: protocol_id.into(),
        }
    }

    /// The validation issues carried by this error, if any
    #[must_use]
    pub fn issues(&self) -> Vec<ValidationIssue> {
        match self {
            Self::Validation(issues) => issues.clone(),
            Self::AgeNotEligible { min, max, actual } => vec![ValidationIssue::AgeNotEligible {
                min: *min,
                max: *max,
                actual: *actual,
            }],
            Self::InvalidMeasurement { site, reason } => {
                vec![ValidationIssue::InvalidMeasurement {
                    site: *site,
                    reason: *reason,
                    value: None,
                }]
            }
            _ => Vec::new(),
        }
    }

    /// Stable error code for this error
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnknownProtocol { .. } => ErrorCode::ResourceNotFound,
            Self::UnsupportedGender { .. } => ErrorCode::UnsupportedGender,
            Self::AgeNotEligible { .. } => ErrorCode::AgeNotEligible,
            Self::InvalidMeasurement { .. } => ErrorCode::ValueOutOfRange,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::ImplausibleResult { .. } => ErrorCode::ImplausibleResult,
            Self::InvalidInput { .. } => ErrorCode::InvalidInput,
        }
    }
}

impl From<CompositionError> for AppError {
    fn from(error: CompositionError) -> Self {
        let details = match &error {
            CompositionError::InvalidInput { field, reason } => {
                json!([{ "field": field, "reason": reason }])
            }
            CompositionError::UnknownProtocol { protocol_id } => {
                json!([{ "field": "protocol", "reason": "unknown_protocol", "value": protocol_id }])
            }
            CompositionError::UnsupportedGender { gender, .. } => {
                json!([{
                    "field": "gender",
                    "reason": "unsupported_gender",
                    "value": gender.as_str(),
                }])
            }
            CompositionError::ImplausibleResult { value, detail } => {
                json!([{ "reason": "implausible_result", "value": value, "message": detail }])
            }
            other => serde_json::Value::Array(
                other.issues().iter().map(ValidationIssue::to_detail).collect(),
            ),
        };

        Self::new(error.error_code(), error.to_string()).with_details(details)
    }
}
