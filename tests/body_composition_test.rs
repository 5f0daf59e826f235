// ABOUTME: Integration tests for the body-composition pipeline
// ABOUTME: Reference values per equation, monotonicity, mass conservation, batching and plausibility guards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use pierre_bodycomp::errors::CompositionError;
use pierre_bodycomp::intelligence::{
    BodyCompositionConfig, CompositionEngine, CompositionRequest, DensityAlgorithm,
    DensityFormula, DensityFormulaTable, EngineHandle, FormulaInput, MuscleEstimate,
    MuscleEstimator,
};
use pierre_bodycomp::models::{Gender, MeasurementSet, SkinfoldSite, Subject};
use std::sync::Arc;

const TOLERANCE: f64 = 1e-6;

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "{what}: expected {expected}, got {actual}"
    );
}

fn engine() -> CompositionEngine {
    common::init_test_logging();
    CompositionEngine::default()
}

#[test]
fn test_pollock3_male_reference() {
    let result = engine()
        .calculate(
            "pollock3",
            &common::male(30, 80.0),
            &common::pollock3_male(20.0, 25.0, 15.0),
        )
        .unwrap();

    // D = 1.10938 - 0.0008267*60 + 0.0000016*60² - 0.0002574*30
    assert_close(result.density_g_cm3, 1.057_816, "density");
    assert_close(result.percent_body_fat, 17.945_275_927, "percent fat");
    assert_close(result.sum_of_skinfolds_mm, 60.0, "sum");
    assert_close(result.fat_mass_kg, 80.0 * 17.945_275_927 / 100.0, "fat mass");
    assert_close(result.muscle_mass_kg, result.lean_mass_kg * 0.54, "muscle");
    assert_close(
        result.skeletal_muscle_kg.unwrap(),
        result.lean_mass_kg * 0.48,
        "skeletal muscle",
    );
    assert_eq!(result.protocol_id, "pollock3");
    assert_eq!(result.classification, "Fitness");
}

#[test]
fn test_pollock3_female_reference() {
    let measurements = MeasurementSet::new()
        .with(SkinfoldSite::Triceps, 15.0)
        .with(SkinfoldSite::Suprailiac, 18.0)
        .with(SkinfoldSite::Thigh, 22.0);
    let result = engine()
        .calculate("Pollock-3", &common::female(25, 60.0), &measurements)
        .unwrap();

    assert_close(result.density_g_cm3, 1.048_360_1, "density");
    assert_close(result.percent_body_fat, 22.166_004_792, "percent fat");
    assert_close(result.muscle_mass_kg, result.lean_mass_kg * 0.49, "muscle");
    assert_eq!(result.protocol_id, "pollock3");
    assert_eq!(result.classification, "Fitness");
}

#[test]
fn test_pollock7_male_reference() {
    let measurements: MeasurementSet = [
        SkinfoldSite::Triceps,
        SkinfoldSite::Subscapular,
        SkinfoldSite::Suprailiac,
        SkinfoldSite::Abdominal,
        SkinfoldSite::Chest,
        SkinfoldSite::Midaxillary,
        SkinfoldSite::Thigh,
    ]
    .into_iter()
    .map(|site| (site, 10.0))
    .collect();
    let result = engine()
        .calculate("pollock7", &common::male(40, 80.0), &measurements)
        .unwrap();

    assert_close(result.density_g_cm3, 1.072_715_3, "density");
    assert_close(result.percent_body_fat, 11.445_828_171, "percent fat");
    assert_eq!(result.classification, "Athletes");
}

#[test]
fn test_faulkner_reference() {
    let result = engine()
        .calculate(
            "faulkner",
            &common::male(45, 90.0),
            &common::faulkner(12.0, 10.0, 20.0, 14.0),
        )
        .unwrap();

    // %G = 0.153 * 56 + 5.783
    assert_close(result.percent_body_fat, 14.351, "percent fat");
    assert_close(result.sum_of_skinfolds_mm, 56.0, "sum");
    assert_eq!(result.classification, "Fitness");
}

#[test]
fn test_guedes_female_reference() {
    let measurements = MeasurementSet::new()
        .with(SkinfoldSite::Subscapular, 14.0)
        .with(SkinfoldSite::Suprailiac, 16.0)
        .with(SkinfoldSite::Thigh, 24.0);
    let result = engine()
        .calculate("guedes", &common::female(30, 62.0), &measurements)
        .unwrap();

    assert_close(result.density_g_cm3, 1.044_141_029, "density");
    assert_close(result.percent_body_fat, 24.073_890_761, "percent fat");
    assert_eq!(result.classification, "Fitness");
}

#[test]
fn test_pollock9_reference() {
    let result = engine()
        .calculate("pollock9", &common::male(25, 80.0), &common::all_sites(10.0))
        .unwrap();

    // 27 * 90 mm / 176.37 lb
    assert_close(result.percent_body_fat, 13.777_868_239, "percent fat");
    assert_close(result.sum_of_skinfolds_mm, 90.0, "sum");
    assert_eq!(result.classification, "Athletes");
}

#[test]
fn test_sum_only_counts_required_sites() {
    let result = engine()
        .calculate("pollock3", &common::male(30, 80.0), &common::all_sites(10.0))
        .unwrap();

    assert_close(result.sum_of_skinfolds_mm, 30.0, "sum");
}

#[test]
fn test_calculation_is_deterministic() {
    let engine = engine();
    let subject = common::female(33, 64.5);
    let measurements = common::all_sites(17.3);

    for protocol in ["faulkner", "pollock3", "pollock7", "pollock9", "guedes"] {
        let first = engine.calculate(protocol, &subject, &measurements).unwrap();
        let second = engine.calculate(protocol, &subject, &measurements).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.percent_body_fat.to_bits(),
            second.percent_body_fat.to_bits()
        );
    }
}

#[test]
fn test_percent_fat_monotonic_in_each_site() {
    let engine = engine();
    let registry = engine.registry().clone();

    for protocol in registry.protocols() {
        for gender in Gender::ALL {
            let subject = Subject::new(gender, 30, 80.0).unwrap();
            let sites = protocol.sites_for(gender).unwrap();
            for site in sites {
                let mut previous = f64::NEG_INFINITY;
                let mut millimetres = 3.0;
                while millimetres <= 50.0 {
                    let mut measurements = common::all_sites(15.0);
                    measurements.insert(*site, millimetres);
                    let result = engine
                        .calculate(&protocol.id, &subject, &measurements)
                        .unwrap();
                    assert!(
                        result.percent_body_fat >= previous,
                        "{} {gender} {site}: {} mm gave {} after {}",
                        protocol.id,
                        millimetres,
                        result.percent_body_fat,
                        previous
                    );
                    previous = result.percent_body_fat;
                    millimetres += 0.5;
                }
            }
        }
    }
}

#[test]
fn test_light_subject_outside_nine_site_domain_fails_validation() {
    let engine = engine();
    let subject = common::female(28, 45.0);

    let err = engine
        .calculate("pollock9", &subject, &common::all_sites(35.0))
        .unwrap_err();

    let CompositionError::Validation(issues) = &err else {
        panic!("expected Validation, got {err:?}");
    };
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].reason_code(), "sum_out_of_range");
    assert_eq!(issues[0].site(), None);

    let report = engine
        .validate("pollock9", &subject, &common::all_sites(35.0))
        .unwrap();
    assert!(!report.is_valid());
    assert!(engine
        .calculate("pollock9", &common::female(28, 75.0), &common::all_sites(35.0))
        .is_ok());
}

#[test]
fn test_valid_measurements_never_yield_implausible_result() {
    let engine = engine();

    for protocol in ["faulkner", "pollock3", "pollock7", "pollock9", "guedes"] {
        for gender in Gender::ALL {
            for weight in (20..=200).step_by(5) {
                let subject = Subject::new(gender, 30, f64::from(weight)).unwrap();
                for millimetres in 3..=50 {
                    let measurements = common::all_sites(f64::from(millimetres));
                    match engine.calculate(protocol, &subject, &measurements) {
                        Ok(result) => {
                            assert!((0.0..=70.0).contains(&result.percent_body_fat));
                        }
                        Err(CompositionError::Validation(issues)) => {
                            assert!(
                                issues
                                    .iter()
                                    .all(|issue| issue.reason_code() == "sum_out_of_range"),
                                "{protocol} {gender} {weight} kg {millimetres} mm: {issues:?}"
                            );
                        }
                        Err(other) => {
                            panic!("{protocol} {gender} {weight} kg {millimetres} mm: {other:?}")
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_masses_add_up_to_weight() {
    let engine = engine();

    for protocol in ["faulkner", "pollock3", "pollock7", "pollock9", "guedes"] {
        for (gender, weight) in [(Gender::Male, 92.4), (Gender::Female, 51.7)] {
            let subject = Subject::new(gender, 40, weight).unwrap();
            let result = engine
                .calculate(protocol, &subject, &common::all_sites(21.0))
                .unwrap();

            assert!(
                (result.fat_mass_kg + result.lean_mass_kg - weight).abs() < 1e-9,
                "{protocol} {gender}"
            );
            assert!(result.muscle_mass_kg <= result.lean_mass_kg);
            assert!(result.skeletal_muscle_kg.unwrap() <= result.muscle_mass_kg);
            assert!((0.0..=70.0).contains(&result.percent_body_fat));
        }
    }
}

#[test]
fn test_batch_keeps_request_order() {
    let requests = vec![
        CompositionRequest {
            protocol_id: "pollock3".into(),
            subject: common::male(30, 80.0),
            measurements: common::pollock3_male(20.0, 25.0, 15.0),
        },
        CompositionRequest {
            protocol_id: "pollock3".into(),
            subject: common::male(30, 80.0),
            measurements: MeasurementSet::new(),
        },
        CompositionRequest {
            protocol_id: "faulkner".into(),
            subject: common::female(50, 70.0),
            measurements: common::faulkner(12.0, 10.0, 20.0, 14.0),
        },
    ];

    let results = engine().calculate_batch(&requests);

    assert_eq!(results.len(), 3);
    assert_close(
        results[0].as_ref().unwrap().percent_body_fat,
        17.945_275_927,
        "first",
    );
    assert!(matches!(
        results[1],
        Err(CompositionError::Validation(ref issues)) if issues.len() == 3
    ));
    assert_close(results[2].as_ref().unwrap().percent_body_fat, 14.351, "third");
}

#[derive(Debug, Clone)]
struct FixedDensity(f64);

impl DensityFormula for FixedDensity {
    fn density(&self, _input: &FormulaInput<'_>) -> Result<f64, CompositionError> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

#[test]
fn test_implausible_formula_output_rejected() {
    let formulas = DensityFormulaTable::standard().with_uniform("faulkner", FixedDensity(0.9));
    let engine = CompositionEngine::builder(BodyCompositionConfig::default())
        .formulas(formulas)
        .build();

    let err = engine
        .calculate(
            "faulkner",
            &common::male(30, 80.0),
            &common::faulkner(12.0, 10.0, 20.0, 14.0),
        )
        .unwrap_err();

    assert!(matches!(err, CompositionError::ImplausibleResult { .. }));
}

#[test]
fn test_custom_formula_replaces_builtin() {
    let formulas = DensityFormulaTable::standard()
        .with_formula("pollock3", Gender::Male, DensityAlgorithm::GuedesMale);
    let engine = CompositionEngine::builder(BodyCompositionConfig::default())
        .formulas(formulas)
        .build();

    let result = engine
        .calculate(
            "pollock3",
            &common::male(30, 80.0),
            &common::pollock3_male(20.0, 25.0, 15.0),
        )
        .unwrap();

    assert_close(
        result.density_g_cm3,
        0.067_06f64.mul_add(-60f64.log10(), 1.171_36),
        "density",
    );
}

#[derive(Debug)]
struct TotalMuscleOnly;

impl MuscleEstimator for TotalMuscleOnly {
    fn estimate(&self, lean_mass_kg: f64, _gender: Gender) -> MuscleEstimate {
        MuscleEstimate {
            muscle_mass_kg: lean_mass_kg * 0.5,
            skeletal_muscle_kg: None,
        }
    }
}

#[test]
fn test_skeletal_muscle_is_optional() {
    let engine = CompositionEngine::builder(BodyCompositionConfig::default())
        .muscle_estimator(Arc::new(TotalMuscleOnly))
        .build();

    let result = engine
        .calculate(
            "faulkner",
            &common::female(30, 60.0),
            &common::faulkner(12.0, 10.0, 20.0, 14.0),
        )
        .unwrap();

    assert_close(result.muscle_mass_kg, result.lean_mass_kg * 0.5, "muscle");
    assert!(result.skeletal_muscle_kg.is_none());
}

#[test]
fn test_snapshots_stay_consistent_across_replace() {
    let handle = EngineHandle::default();
    let subject = common::male(30, 80.0);
    let measurements = common::pollock3_male(20.0, 25.0, 15.0);
    let measurements = &measurements;

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let handle = handle.clone();
            scope.spawn(move || {
                for _ in 0..50 {
                    let engine = handle.snapshot();
                    let result = engine
                        .calculate("pollock3", &subject, &measurements)
                        .unwrap();
                    let expected = engine.config().muscle.male_muscle_fraction;
                    assert_close(
                        result.muscle_mass_kg,
                        result.lean_mass_kg * expected,
                        "muscle",
                    );
                }
            });
        }

        let mut config = BodyCompositionConfig::default();
        config.muscle.male_muscle_fraction = 0.6;
        handle.replace(CompositionEngine::with_config(config));
    });

    let current = handle.snapshot();
    assert_close(current.config().muscle.male_muscle_fraction, 0.6, "fraction");
}
