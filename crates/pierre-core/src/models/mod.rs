// ABOUTME: Core value objects for body-composition assessment and anamnese scoring
// ABOUTME: Subject, skinfold sites, measurement sets and questionnaire answers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Value objects constructed per request from caller-supplied data.

/// Anamnese answers and goal categories
pub mod anamnesis;
/// Skinfold sites and measurement sets
pub mod skinfold;
/// Assessed subject (gender, age, weight)
pub mod subject;

pub use anamnesis::{
    ActivityFrequency, AnamnesisAnswers, DeclaredObjective, GoalCategory, HealthHistory,
    Lifestyle, PhysicalActivity, StressLevel,
};
pub use skinfold::{MeasurementSet, SkinfoldSite};
pub use subject::{Gender, Subject};
