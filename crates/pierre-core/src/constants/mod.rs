// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Anthropometric limits, Siri coefficients, unit conversions and anamnese literals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Anthropometric limits and conversion equations
pub mod anthropometry {
    /// Siri (1961) numerator: %fat = 495 / density - 450
    pub const SIRI_NUMERATOR: f64 = 495.0;

    /// Siri (1961) offset: %fat = 495 / density - 450
    pub const SIRI_OFFSET: f64 = 450.0;

    /// Smallest skinfold a standard caliper reading accepts (mm)
    pub const MIN_SKINFOLD_MM: f64 = 3.0;

    /// Largest skinfold a standard caliper reading accepts (mm)
    pub const MAX_SKINFOLD_MM: f64 = 50.0;

    /// Raw Siri output below this is treated as a formula failure (%)
    pub const RAW_BODY_FAT_MIN_PERCENT: f64 = -10.0;

    /// Raw Siri output above this is treated as a formula failure (%)
    pub const RAW_BODY_FAT_MAX_PERCENT: f64 = 80.0;

    /// Lower clamp applied to a plausible body-fat percentage
    pub const BODY_FAT_CLAMP_MIN_PERCENT: f64 = 0.0;

    /// Upper clamp applied to a plausible body-fat percentage
    pub const BODY_FAT_CLAMP_MAX_PERCENT: f64 = 70.0;

    /// Youngest accepted subject age (years)
    pub const MIN_AGE_YEARS: u32 = 1;

    /// Oldest accepted subject age (years)
    pub const MAX_AGE_YEARS: u32 = 120;

    /// Heaviest accepted subject weight (kg)
    pub const MAX_WEIGHT_KG: f64 = 350.0;
}

/// Unit conversion constants
pub mod units {
    /// Pounds per kilogram
    pub const POUNDS_PER_KG: f64 = 2.204_622_621_8;
}

/// Anamnese questionnaire literals
pub mod anamnesis {
    /// Declared objective literal for disease control
    pub const DISEASE_CONTROL_OBJECTIVE: &str =
        "Controlar ou tratar uma doença ou condição de saúde";

    /// Declared objective literal for health and wellbeing
    pub const WELLBEING_OBJECTIVE: &str =
        "Melhorar minha disposição, qualidade de vida e envelhecer com saúde";

    /// Declared objective literal for aesthetics and hypertrophy
    pub const AESTHETICS_OBJECTIVE: &str =
        "Reduzir gordura corporal, ganhar massa muscular e melhorar a estética";

    /// Leading clause identifying the disease control objective
    pub const DISEASE_CONTROL_OBJECTIVE_PREFIX: &str = "Controlar ou tratar";

    /// Leading clause identifying the wellbeing objective
    pub const WELLBEING_OBJECTIVE_PREFIX: &str = "Melhorar minha disposição";

    /// Leading clause identifying the aesthetics objective
    pub const AESTHETICS_OBJECTIVE_PREFIX: &str = "Reduzir gordura corporal";

    /// Lowest sleep quality answer
    pub const MIN_SLEEP_QUALITY: u8 = 1;

    /// Highest sleep quality answer
    pub const MAX_SLEEP_QUALITY: u8 = 5;
}

/// Service identity used in structured logs
pub mod service_names {
    /// Default service name
    pub const PIERRE_BODYCOMP: &str = "pierre-bodycomp";
}
