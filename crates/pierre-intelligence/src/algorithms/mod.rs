// ABOUTME: Body-composition prediction algorithms
// ABOUTME: Density equations and muscle estimators used by the composition deriver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Skinfold body density equations and the `(protocol, gender)` formula table
pub mod density;

/// Muscle mass estimation from lean body mass
pub mod muscle;

pub use density::{DensityAlgorithm, DensityFormula, DensityFormulaTable, FormulaInput};
pub use muscle::{LeanFractionEstimator, MuscleEstimate, MuscleEstimator};
