// ABOUTME: Measurement bounds and result plausibility configuration
// ABOUTME: Caliper range per site and the Siri output guard/clamp ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::constants::anthropometry::{
    BODY_FAT_CLAMP_MAX_PERCENT, BODY_FAT_CLAMP_MIN_PERCENT, MAX_SKINFOLD_MM, MIN_SKINFOLD_MM,
    RAW_BODY_FAT_MAX_PERCENT, RAW_BODY_FAT_MIN_PERCENT,
};
use serde::{Deserialize, Serialize};

/// Accepted skinfold range, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementBoundsConfig {
    /// Minimum accepted skinfold (mm)
    pub min_skinfold_mm: f64,
    /// Maximum accepted skinfold (mm)
    pub max_skinfold_mm: f64,
}

impl Default for MeasurementBoundsConfig {
    fn default() -> Self {
        Self {
            min_skinfold_mm: MIN_SKINFOLD_MM,
            max_skinfold_mm: MAX_SKINFOLD_MM,
        }
    }
}

impl MeasurementBoundsConfig {
    /// Whether a value lies within the accepted range
    #[must_use]
    pub fn contains(&self, millimetres: f64) -> bool {
        (self.min_skinfold_mm..=self.max_skinfold_mm).contains(&millimetres)
    }
}

/// Guard and clamp applied to the Siri body-fat percentage
///
/// A raw value outside `raw_min..=raw_max` means the formula table or its
/// inputs are broken; a value inside is clamped to `clamp_min..=clamp_max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlausibilityConfig {
    /// Lowest raw percentage treated as plausible
    pub raw_min_percent: f64,
    /// Highest raw percentage treated as plausible
    pub raw_max_percent: f64,
    /// Lower clamp for reported percentage
    pub clamp_min_percent: f64,
    /// Upper clamp for reported percentage
    pub clamp_max_percent: f64,
}

impl Default for PlausibilityConfig {
    fn default() -> Self {
        Self {
            raw_min_percent: RAW_BODY_FAT_MIN_PERCENT,
            raw_max_percent: RAW_BODY_FAT_MAX_PERCENT,
            clamp_min_percent: BODY_FAT_CLAMP_MIN_PERCENT,
            clamp_max_percent: BODY_FAT_CLAMP_MAX_PERCENT,
        }
    }
}
