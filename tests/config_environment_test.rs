// ABOUTME: Tests for engine and logging configuration loaded from the environment
// ABOUTME: Overrides, parse failures, validation failures and their error codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_bodycomp::errors::{AppError, ErrorCode};
use pierre_bodycomp::intelligence::{BodyCompositionConfig, ConfigError};
use pierre_bodycomp::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;

const ENGINE_VARS: [&str; 11] = [
    "PIERRE_BODYCOMP_MIN_SKINFOLD_MM",
    "PIERRE_BODYCOMP_MAX_SKINFOLD_MM",
    "PIERRE_BODYCOMP_RAW_MIN_PERCENT",
    "PIERRE_BODYCOMP_RAW_MAX_PERCENT",
    "PIERRE_BODYCOMP_CLAMP_MIN_PERCENT",
    "PIERRE_BODYCOMP_CLAMP_MAX_PERCENT",
    "PIERRE_BODYCOMP_MALE_MUSCLE_FRACTION",
    "PIERRE_BODYCOMP_FEMALE_MUSCLE_FRACTION",
    "PIERRE_BODYCOMP_MALE_SKELETAL_FRACTION",
    "PIERRE_BODYCOMP_FEMALE_SKELETAL_FRACTION",
    "PIERRE_BODYCOMP_OBJECTIVE_WEIGHT",
];

const LOGGING_VARS: [&str; 5] = [
    "RUST_LOG",
    "LOG_FORMAT",
    "LOG_INCLUDE_LOCATION",
    "LOG_INCLUDE_THREAD",
    "SERVICE_NAME",
];

fn clear(vars: &[&str]) {
    for var in vars {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear(&ENGINE_VARS);

    let config = BodyCompositionConfig::load().unwrap();

    assert_eq!(config, BodyCompositionConfig::default());
    assert!((config.measurement.min_skinfold_mm - 3.0).abs() < f64::EPSILON);
    assert!((config.measurement.max_skinfold_mm - 50.0).abs() < f64::EPSILON);
    assert!((config.plausibility.raw_min_percent + 10.0).abs() < f64::EPSILON);
    assert!((config.plausibility.clamp_max_percent - 70.0).abs() < f64::EPSILON);
    assert_eq!(config.goals.declared_objective, 10);
}

#[test]
#[serial]
fn test_overrides_applied() {
    clear(&ENGINE_VARS);
    env::set_var("PIERRE_BODYCOMP_MAX_SKINFOLD_MM", "60");
    env::set_var("PIERRE_BODYCOMP_MALE_MUSCLE_FRACTION", " 0.56 ");
    env::set_var("PIERRE_BODYCOMP_OBJECTIVE_WEIGHT", "12");

    let config = BodyCompositionConfig::load();
    clear(&ENGINE_VARS);
    let config = config.unwrap();

    assert!((config.measurement.max_skinfold_mm - 60.0).abs() < f64::EPSILON);
    assert!((config.muscle.male_muscle_fraction - 0.56).abs() < f64::EPSILON);
    assert_eq!(config.goals.declared_objective, 12);
}

#[test]
#[serial]
fn test_unparseable_value_rejected() {
    clear(&ENGINE_VARS);
    env::set_var("PIERRE_BODYCOMP_MIN_SKINFOLD_MM", "three");

    let result = BodyCompositionConfig::load();
    clear(&ENGINE_VARS);

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Parse(ref msg) if msg.contains("PIERRE_BODYCOMP_MIN_SKINFOLD_MM")
    ));
    assert_eq!(AppError::from(err).code, ErrorCode::ConfigError);
}

#[test]
#[serial]
fn test_inconsistent_override_fails_validation() {
    clear(&ENGINE_VARS);
    env::set_var("PIERRE_BODYCOMP_MIN_SKINFOLD_MM", "55");

    let result = BodyCompositionConfig::load();
    clear(&ENGINE_VARS);

    let err = result.unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRange(_)));
    assert_eq!(AppError::from(err).code, ErrorCode::ConfigInvalid);
}

#[test]
#[serial]
fn test_zero_objective_weight_rejected() {
    clear(&ENGINE_VARS);
    env::set_var("PIERRE_BODYCOMP_OBJECTIVE_WEIGHT", "0");

    let result = BodyCompositionConfig::load();
    clear(&ENGINE_VARS);

    assert!(matches!(result, Err(ConfigError::ValueOutOfRange(_))));
}

#[test]
#[serial]
fn test_negative_weight_is_parse_error() {
    clear(&ENGINE_VARS);
    env::set_var("PIERRE_BODYCOMP_OBJECTIVE_WEIGHT", "-1");

    let result = BodyCompositionConfig::load();
    clear(&ENGINE_VARS);

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_config_round_trips_through_json() {
    let config = BodyCompositionConfig::default();
    let json = serde_json::to_value(config).unwrap();

    assert_eq!(json["measurement"]["max_skinfold_mm"], 50.0);
    let decoded: BodyCompositionConfig = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, config);
}

#[test]
#[serial]
fn test_logging_defaults() {
    clear(&LOGGING_VARS);

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "warn");
    assert_eq!(config.format, LogFormat::Compact);
    assert!(!config.include_location);
    assert!(!config.include_thread);
    assert_eq!(config.service_name, "pierre-bodycomp");
}

#[test]
#[serial]
fn test_logging_from_environment() {
    clear(&LOGGING_VARS);
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "JSON");
    env::set_var("LOG_INCLUDE_LOCATION", "1");
    env::set_var("SERVICE_NAME", "bodycomp-worker");

    let config = LoggingConfig::from_env();
    clear(&LOGGING_VARS);

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    assert!(!config.include_thread);
    assert_eq!(config.service_name, "bodycomp-worker");
}

#[test]
fn test_logging_filter_names_workspace_crates() {
    let filter = LoggingConfig::default().with_level("info").env_filter();
    let rendered = filter.to_string().to_lowercase();

    assert!(rendered.contains("pierre_intelligence=info"));
    assert!(rendered.contains("pierre_bodycomp=info"));
}

#[test]
fn test_pretty_format_installs_subscriber() {
    let config = LoggingConfig {
        format: LogFormat::Pretty,
        include_location: true,
        include_thread: true,
        ..LoggingConfig::default()
    };

    assert!(config.init().is_ok());
    tracing::info!(target: "pierre_bodycomp", "pretty subscriber installed");
}
