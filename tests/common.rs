// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging setup, standard subjects, measurement sets and anamnese answers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::too_many_arguments
)]
//! Shared test utilities for `pierre_bodycomp`

use pierre_bodycomp::models::{
    ActivityFrequency, AnamnesisAnswers, DeclaredObjective, Gender, HealthHistory, Lifestyle,
    MeasurementSet, PhysicalActivity, SkinfoldSite, StressLevel, Subject,
};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

pub fn male(age: u32, weight_kg: f64) -> Subject {
    Subject::new(Gender::Male, age, weight_kg).unwrap()
}

pub fn female(age: u32, weight_kg: f64) -> Subject {
    Subject::new(Gender::Female, age, weight_kg).unwrap()
}

/// Every catalogue site set to the same value
pub fn all_sites(millimetres: f64) -> MeasurementSet {
    SkinfoldSite::ALL
        .iter()
        .map(|site| (*site, millimetres))
        .collect()
}

/// Pollock-3 male sites: chest, abdominal, thigh
pub fn pollock3_male(chest: f64, abdominal: f64, thigh: f64) -> MeasurementSet {
    MeasurementSet::new()
        .with(SkinfoldSite::Chest, chest)
        .with(SkinfoldSite::Abdominal, abdominal)
        .with(SkinfoldSite::Thigh, thigh)
}

/// Faulkner sites: subscapular, triceps, abdominal, suprailiac
pub fn faulkner(subscapular: f64, triceps: f64, abdominal: f64, suprailiac: f64) -> MeasurementSet {
    MeasurementSet::new()
        .with(SkinfoldSite::Subscapular, subscapular)
        .with(SkinfoldSite::Triceps, triceps)
        .with(SkinfoldSite::Abdominal, abdominal)
        .with(SkinfoldSite::Suprailiac, suprailiac)
}

/// Anamnese answers from flat values, in block order
#[allow(clippy::fn_params_excessive_bools)]
pub fn answers(
    diagnosed_disease: bool,
    continuous_medication: bool,
    recent_surgery: bool,
    practices_activity: bool,
    frequency: Option<ActivityFrequency>,
    objective: DeclaredObjective,
    sleep_quality: u8,
    stress_level: StressLevel,
) -> AnamnesisAnswers {
    AnamnesisAnswers {
        health_history: HealthHistory {
            diagnosed_disease,
            continuous_medication,
            recent_surgery,
        },
        physical_activity: PhysicalActivity {
            practices_activity,
            frequency,
        },
        objective,
        lifestyle: Lifestyle {
            sleep_quality,
            stress_level,
        },
    }
}
