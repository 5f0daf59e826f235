// ABOUTME: Anamnese questionnaire answers and the goal categories they classify into
// ABOUTME: Closed enums for frequency, stress and declared objective with wire-literal parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::anamnesis::{
    AESTHETICS_OBJECTIVE, AESTHETICS_OBJECTIVE_PREFIX, DISEASE_CONTROL_OBJECTIVE,
    DISEASE_CONTROL_OBJECTIVE_PREFIX, MAX_SLEEP_QUALITY, MIN_SLEEP_QUALITY, WELLBEING_OBJECTIVE,
    WELLBEING_OBJECTIVE_PREFIX,
};
use crate::errors::CompositionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Client objective inferred from the anamnese
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    /// Managing a disease or health condition
    DiseaseControl,
    /// General health, disposition and healthy ageing
    HealthAndWellbeing,
    /// Fat loss, muscle gain and appearance
    AestheticsHypertrophy,
}

impl GoalCategory {
    /// All categories in declaration order
    pub const ALL: [Self; 3] = [
        Self::DiseaseControl,
        Self::HealthAndWellbeing,
        Self::AestheticsHypertrophy,
    ];

    /// Stable identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DiseaseControl => "disease_control",
            Self::HealthAndWellbeing => "health_and_wellbeing",
            Self::AestheticsHypertrophy => "aesthetics_hypertrophy",
        }
    }

    /// Label shown to coaches and clients
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::DiseaseControl => "Controle de Doenças",
            Self::HealthAndWellbeing => "Saúde e Bem-estar",
            Self::AestheticsHypertrophy => "Estética e Hipertrofia",
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weekly training frequency (block 3)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActivityFrequency {
    /// One or two sessions per week
    #[serde(rename = "1-2x")]
    OneToTwo,
    /// Three or four sessions per week
    #[serde(rename = "3-4x")]
    ThreeToFour,
    /// Five or more sessions per week
    #[serde(rename = "5x+")]
    FiveOrMore,
}

impl ActivityFrequency {
    /// Wire literal
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneToTwo => "1-2x",
            Self::ThreeToFour => "3-4x",
            Self::FiveOrMore => "5x+",
        }
    }
}

impl FromStr for ActivityFrequency {
    type Err = CompositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1-2x" => Ok(Self::OneToTwo),
            "3-4x" => Ok(Self::ThreeToFour),
            "5x+" => Ok(Self::FiveOrMore),
            other => Err(CompositionError::invalid_input(
                "frequencia",
                format!("unknown frequency '{other}', expected one of 1-2x, 3-4x, 5x+"),
            )),
        }
    }
}

/// Self-reported stress level (block 5)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StressLevel {
    /// Low stress
    #[serde(rename = "Baixo", alias = "Low")]
    Low,
    /// Moderate stress
    #[serde(rename = "Moderado", alias = "Moderate")]
    Moderate,
    /// High stress
    #[serde(rename = "Alto", alias = "High")]
    High,
}

impl StressLevel {
    /// Wire literal
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Baixo",
            Self::Moderate => "Moderado",
            Self::High => "Alto",
        }
    }
}

impl FromStr for StressLevel {
    type Err = CompositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Baixo" | "Low" => Ok(Self::Low),
            "Moderado" | "Moderate" => Ok(Self::Moderate),
            "Alto" | "High" => Ok(Self::High),
            other => Err(CompositionError::invalid_input(
                "nivelEstresse",
                format!("unknown stress level '{other}', expected Baixo, Moderado or Alto"),
            )),
        }
    }
}

/// Objective the client declared directly (block 4)
///
/// Each literal maps to exactly one [`GoalCategory`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DeclaredObjective {
    /// Treat or control a disease
    #[serde(rename = "Controlar ou tratar uma doença ou condição de saúde")]
    ControlDisease,
    /// Improve disposition and quality of life
    #[serde(rename = "Melhorar minha disposição, qualidade de vida e envelhecer com saúde")]
    ImproveWellbeing,
    /// Reduce body fat and gain muscle
    #[serde(rename = "Reduzir gordura corporal, ganhar massa muscular e melhorar a estética")]
    ImproveAesthetics,
}

impl DeclaredObjective {
    /// Full wire literal
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ControlDisease => DISEASE_CONTROL_OBJECTIVE,
            Self::ImproveWellbeing => WELLBEING_OBJECTIVE,
            Self::ImproveAesthetics => AESTHETICS_OBJECTIVE,
        }
    }

    /// The category this objective scores for
    #[must_use]
    pub const fn category(&self) -> GoalCategory {
        match self {
            Self::ControlDisease => GoalCategory::DiseaseControl,
            Self::ImproveWellbeing => GoalCategory::HealthAndWellbeing,
            Self::ImproveAesthetics => GoalCategory::AestheticsHypertrophy,
        }
    }
}

impl FromStr for DeclaredObjective {
    type Err = CompositionError;

    /// Accepts the full literal or any text starting with its leading clause
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let candidates = [
            (DISEASE_CONTROL_OBJECTIVE_PREFIX, Self::ControlDisease),
            (WELLBEING_OBJECTIVE_PREFIX, Self::ImproveWellbeing),
            (AESTHETICS_OBJECTIVE_PREFIX, Self::ImproveAesthetics),
        ];

        candidates
            .into_iter()
            .find(|(prefix, _)| normalized.starts_with(&prefix.to_lowercase()))
            .map(|(_, objective)| objective)
            .ok_or_else(|| {
                CompositionError::invalid_input(
                    "objetivo",
                    format!("unknown objective '{}'", s.trim()),
                )
            })
    }
}

/// Block 2: clinical history
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HealthHistory {
    /// Has a diagnosed disease
    pub diagnosed_disease: bool,
    /// Takes continuous medication
    pub continuous_medication: bool,
    /// Had recent surgery
    pub recent_surgery: bool,
}

/// Block 3: current physical activity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PhysicalActivity {
    /// Currently practices physical activity
    pub practices_activity: bool,
    /// Weekly frequency, required when `practices_activity` is true
    pub frequency: Option<ActivityFrequency>,
}

/// Block 5: lifestyle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lifestyle {
    /// Sleep quality from 1 (poor) to 5 (excellent)
    pub sleep_quality: u8,
    /// Self-reported stress
    pub stress_level: StressLevel,
}

/// Complete anamnese answers used for goal classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnamnesisAnswers {
    /// Block 2
    pub health_history: HealthHistory,
    /// Block 3
    pub physical_activity: PhysicalActivity,
    /// Block 4
    pub objective: DeclaredObjective,
    /// Block 5
    pub lifestyle: Lifestyle,
}

impl AnamnesisAnswers {
    /// Check the fields the type system cannot enforce
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::InvalidInput` if sleep quality is outside 1-5
    /// or a practicing client has no frequency
    pub fn validate(&self) -> Result<(), CompositionError> {
        let sleep = self.lifestyle.sleep_quality;
        if !(MIN_SLEEP_QUALITY..=MAX_SLEEP_QUALITY).contains(&sleep) {
            return Err(CompositionError::invalid_input(
                "qualidadeSono",
                format!(
                    "sleep quality must be between {MIN_SLEEP_QUALITY} and {MAX_SLEEP_QUALITY}, got {sleep}"
                ),
            ));
        }
        if self.physical_activity.practices_activity && self.physical_activity.frequency.is_none()
        {
            return Err(CompositionError::invalid_input(
                "frequencia",
                "frequency is required when the client practices physical activity",
            ));
        }
        Ok(())
    }
}
