// ABOUTME: Subject model for anthropometric assessment (gender, age, body weight)
// ABOUTME: Gender parsing accepts wire codes (M/F) as well as English and Portuguese names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::anthropometry::{MAX_AGE_YEARS, MAX_WEIGHT_KG, MIN_AGE_YEARS};
use crate::errors::CompositionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biological sex used by sex-specific prediction equations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male equations and bands
    #[serde(alias = "M", alias = "m", alias = "masculino")]
    Male,
    /// Female equations and bands
    #[serde(alias = "F", alias = "f", alias = "feminino")]
    Female,
}

impl Gender {
    /// Both genders, in a stable order
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    /// Lowercase English name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Single-letter wire code (`M` / `F`)
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = CompositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" | "masculino" => Ok(Self::Male),
            "f" | "female" | "feminino" => Ok(Self::Female),
            other => Err(CompositionError::invalid_input(
                "genero",
                format!("unknown gender '{other}', expected M or F"),
            )),
        }
    }
}

/// The person being assessed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Subject {
    /// Biological sex
    pub gender: Gender,
    /// Age in whole years
    pub age: u32,
    /// Body weight in kilograms
    pub weight_kg: f64,
}

impl Subject {
    /// Create a validated subject
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::InvalidInput` if age or weight is out of range
    pub fn new(gender: Gender, age: u32, weight_kg: f64) -> Result<Self, CompositionError> {
        let subject = Self {
            gender,
            age,
            weight_kg,
        };
        subject.validate()?;
        Ok(subject)
    }

    /// Check age and weight bounds
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::InvalidInput` naming the offending field
    pub fn validate(&self) -> Result<(), CompositionError> {
        if !(MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&self.age) {
            return Err(CompositionError::invalid_input(
                "idade",
                format!(
                    "age must be between {MIN_AGE_YEARS} and {MAX_AGE_YEARS} years, got {}",
                    self.age
                ),
            ));
        }
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 || self.weight_kg > MAX_WEIGHT_KG {
            return Err(CompositionError::invalid_input(
                "peso",
                format!(
                    "weight must be greater than 0 and at most {MAX_WEIGHT_KG} kg, got {}",
                    self.weight_kg
                ),
            ));
        }
        Ok(())
    }
}
