// ABOUTME: Body-composition and goal-classification engine for Pierre
// ABOUTME: Protocol registry, measurement validation, density formulas, classification and anamnese scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Intelligence
//!
//! Deterministic engine turning skinfold measurements into a body-composition
//! breakdown, and anamnese answers into a client objective.
//!
//! ## Pipeline
//!
//! 1. **protocols**: resolve the sites a protocol requires for the subject
//! 2. **validation**: check age eligibility and every required site
//! 3. **algorithms**: predict body density from the skinfold sum
//! 4. **composition**: Siri conversion, fat/lean split and muscle estimate
//! 5. **classification**: label the body-fat percentage
//!
//! **`goal_scorer`** runs independently on anamnese answers.
//!
//! All tables are immutable once built and injected into [`CompositionEngine`];
//! [`EngineHandle`] replaces the whole set atomically.

/// Density equations and muscle estimators
pub mod algorithms;

/// Body-fat classification bands
pub mod classification;

/// Siri conversion and mass derivation
pub mod composition;

/// Engine configuration
pub mod config;

/// Engine facade and snapshot handle
pub mod engine;

/// Anamnese goal scoring
pub mod goal_scorer;

/// Skinfold protocol catalogue
pub mod protocols;

/// Measurement validation
pub mod validation;

pub use algorithms::{
    DensityAlgorithm, DensityFormula, DensityFormulaTable, FormulaInput, LeanFractionEstimator,
    MuscleEstimate, MuscleEstimator,
};
pub use classification::{
    AgeBracket, ClassificationBand, ClassificationTable, CompositionClassifier, GenderBands,
};
pub use composition::{siri_percent_fat, CompositionDeriver, CompositionResult, DerivedComposition};
pub use config::{BodyCompositionConfig, ConfigError};
pub use engine::{CompositionEngine, CompositionEngineBuilder, CompositionRequest, EngineHandle};
pub use goal_scorer::{GoalScorer, Resolution, ScoreBreakdown};
pub use protocols::{AgeEligibility, Protocol, ProtocolRegistry, RequiredSites};
pub use validation::{MeasurementValidator, ValidationReport};
