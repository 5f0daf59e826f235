// ABOUTME: Maps body-fat percentage to a qualitative band per gender and optional age bracket
// ABOUTME: Band tables are checked for contiguous coverage of 0-100% when built
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Body-Fat Classification
//!
//! Bands are half-open `[lower, upper)` except the last, which includes
//! its upper bound. A table must cover `[0, 100]` without gaps or overlaps.
//!
//! # Scientific References
//!
//! - American Council on Exercise (2009). *ACE Personal Trainer Manual* (4th ed.),
//!   general body-fat percentage categories.

use pierre_core::errors::CompositionError;
use pierre_core::models::Gender;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const FULL_SCALE_PERCENT: f64 = 100.0;

/// One labelled body-fat band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationBand {
    /// Label returned for values in this band
    pub label: String,
    /// Inclusive lower bound (%)
    pub lower_percent: f64,
    /// Exclusive upper bound (%), inclusive for the last band
    pub upper_percent: f64,
}

impl ClassificationBand {
    /// Create a band
    #[must_use]
    pub fn new(label: impl Into<String>, lower_percent: f64, upper_percent: f64) -> Self {
        Self {
            label: label.into(),
            lower_percent,
            upper_percent,
        }
    }

    fn contains(&self, percent: f64, is_last: bool) -> bool {
        percent >= self.lower_percent
            && (percent < self.upper_percent || (is_last && percent <= self.upper_percent))
    }
}

/// Bands that apply to an inclusive age range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeBracket {
    /// Youngest age covered
    pub min_age: u32,
    /// Oldest age covered
    pub max_age: u32,
    /// Bands for this bracket
    pub bands: Vec<ClassificationBand>,
}

/// Bands for one gender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderBands {
    /// Bands used when no age bracket matches
    pub bands: Vec<ClassificationBand>,
    /// Age-specific bands, checked first
    #[serde(default)]
    pub age_brackets: Vec<AgeBracket>,
}

impl GenderBands {
    /// Age-independent bands only
    #[must_use]
    pub const fn uniform(bands: Vec<ClassificationBand>) -> Self {
        Self {
            bands,
            age_brackets: Vec::new(),
        }
    }

    fn bands_for(&self, age: Option<u32>) -> &[ClassificationBand] {
        age.and_then(|age| {
            self.age_brackets
                .iter()
                .find(|bracket| (bracket.min_age..=bracket.max_age).contains(&age))
        })
        .map_or(self.bands.as_slice(), |bracket| bracket.bands.as_slice())
    }
}

/// Validated band table for both genders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationTable {
    genders: BTreeMap<Gender, GenderBands>,
}

impl Default for ClassificationTable {
    fn default() -> Self {
        Self::ace()
    }
}

impl ClassificationTable {
    /// Build a table, checking coverage of every band list
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::InvalidInput` if a gender is missing, a band list does not
    /// start at 0 and end at 100, bands leave a gap or overlap, or age brackets overlap
    pub fn new(genders: BTreeMap<Gender, GenderBands>) -> Result<Self, CompositionError> {
        for gender in Gender::ALL {
            let entry = genders.get(&gender).ok_or_else(|| {
                CompositionError::invalid_input(
                    format!("classification.{gender}"),
                    "no bands defined for this gender",
                )
            })?;
            check_bands(&format!("classification.{gender}"), &entry.bands)?;
            check_brackets(gender, &entry.age_brackets)?;
        }
        Ok(Self { genders })
    }

    /// ACE general body-fat categories
    #[must_use]
    pub fn ace() -> Self {
        let bands = |cuts: [f64; 4]| {
            vec![
                ClassificationBand::new("Essential Fat", 0.0, cuts[0]),
                ClassificationBand::new("Athletes", cuts[0], cuts[1]),
                ClassificationBand::new("Fitness", cuts[1], cuts[2]),
                ClassificationBand::new("Average", cuts[2], cuts[3]),
                ClassificationBand::new("Obese", cuts[3], FULL_SCALE_PERCENT),
            ]
        };

        Self {
            genders: BTreeMap::from([
                (Gender::Male, GenderBands::uniform(bands([6.0, 14.0, 18.0, 25.0]))),
                (Gender::Female, GenderBands::uniform(bands([14.0, 21.0, 25.0, 32.0]))),
            ]),
        }
    }

    /// Bands that apply to a gender and age
    #[must_use]
    pub fn bands_for(&self, gender: Gender, age: Option<u32>) -> &[ClassificationBand] {
        self.genders
            .get(&gender)
            .map_or(&[], |entry| entry.bands_for(age))
    }
}

fn same_edge(a: f64, b: f64) -> bool {
    (a - b).abs() < f64::EPSILON
}

fn check_bands(context: &str, bands: &[ClassificationBand]) -> Result<(), CompositionError> {
    let invalid = |reason: String| CompositionError::invalid_input(context, reason);

    let (Some(first), Some(last)) = (bands.first(), bands.last()) else {
        return Err(invalid("at least one band is required".into()));
    };
    if !same_edge(first.lower_percent, 0.0) {
        return Err(invalid(format!(
            "first band '{}' must start at 0%, starts at {}%",
            first.label, first.lower_percent
        )));
    }
    if !same_edge(last.upper_percent, FULL_SCALE_PERCENT) {
        return Err(invalid(format!(
            "last band '{}' must end at 100%, ends at {}%",
            last.label, last.upper_percent
        )));
    }
    for band in bands {
        if !band.lower_percent.is_finite()
            || !band.upper_percent.is_finite()
            || band.lower_percent >= band.upper_percent
        {
            return Err(invalid(format!("band '{}' has an empty or inverted range", band.label)));
        }
    }
    for pair in bands.windows(2) {
        if !same_edge(pair[0].upper_percent, pair[1].lower_percent) {
            return Err(invalid(format!(
                "bands '{}' and '{}' leave a gap or overlap",
                pair[0].label, pair[1].label
            )));
        }
    }
    Ok(())
}

fn check_brackets(gender: Gender, brackets: &[AgeBracket]) -> Result<(), CompositionError> {
    let mut sorted: Vec<&AgeBracket> = brackets.iter().collect();
    sorted.sort_by_key(|bracket| bracket.min_age);

    for bracket in &sorted {
        let context = format!(
            "classification.{gender}.{}-{}",
            bracket.min_age, bracket.max_age
        );
        if bracket.min_age > bracket.max_age {
            return Err(CompositionError::invalid_input(
                context,
                "age bracket is inverted",
            ));
        }
        check_bands(&context, &bracket.bands)?;
    }
    for pair in sorted.windows(2) {
        if pair[1].min_age <= pair[0].max_age {
            return Err(CompositionError::invalid_input(
                format!("classification.{gender}"),
                format!(
                    "age brackets {}-{} and {}-{} overlap",
                    pair[0].min_age, pair[0].max_age, pair[1].min_age, pair[1].max_age
                ),
            ));
        }
    }
    Ok(())
}

/// Labels body-fat percentages using a validated table
#[derive(Debug, Clone, Default)]
pub struct CompositionClassifier {
    table: ClassificationTable,
}

impl CompositionClassifier {
    /// Create a classifier over a table
    #[must_use]
    pub const fn new(table: ClassificationTable) -> Self {
        Self { table }
    }

    /// Table in use
    #[must_use]
    pub const fn table(&self) -> &ClassificationTable {
        &self.table
    }

    /// Label for a body-fat percentage
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::InvalidInput` if the percentage is not within 0-100
    pub fn classify(
        &self,
        percent_body_fat: f64,
        gender: Gender,
        age: Option<u32>,
    ) -> Result<&str, CompositionError> {
        if !percent_body_fat.is_finite()
            || !(0.0..=FULL_SCALE_PERCENT).contains(&percent_body_fat)
        {
            return Err(CompositionError::invalid_input(
                "percentualGordura",
                format!("body fat must be between 0 and 100%, got {percent_body_fat}"),
            ));
        }

        let bands = self.table.bands_for(gender, age);
        let last_index = bands.len().saturating_sub(1);
        bands
            .iter()
            .enumerate()
            .find(|(index, band)| band.contains(percent_body_fat, *index == last_index))
            .map(|(_, band)| band.label.as_str())
            .ok_or_else(|| {
                CompositionError::invalid_input(
                    "percentualGordura",
                    format!("no band covers {percent_body_fat}% for {gender}"),
                )
            })
    }
}
