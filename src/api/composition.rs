// ABOUTME: Body-composition calculation DTOs (dadosPessoais, medidas, result fields)
// ABOUTME: Converts wire input into engine requests and engine results into wire output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::parse_body;
use pierre_core::errors::{AppError, CompositionError};
use pierre_core::models::{Gender, MeasurementSet, Subject};
use pierre_intelligence::{CompositionEngine, CompositionRequest, CompositionResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Personal data block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalData {
    /// `M` or `F` (English and Portuguese names accepted)
    pub genero: String,
    /// Age in whole years
    pub idade: i64,
    /// Weight in kilograms
    pub peso: f64,
}

/// Body-composition calculation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionRequestDto {
    /// Protocol identifier
    pub protocol: String,
    /// Subject data
    pub dados_pessoais: PersonalData,
    /// Site name to millimetres
    #[serde(default)]
    pub medidas: BTreeMap<String, f64>,
}

impl TryFrom<CompositionRequestDto> for CompositionRequest {
    type Error = CompositionError;

    fn try_from(dto: CompositionRequestDto) -> Result<Self, Self::Error> {
        let personal = dto.dados_pessoais;
        let gender: Gender = personal.genero.parse()?;
        let age = u32::try_from(personal.idade).map_err(|_| {
            CompositionError::invalid_input(
                "idade",
                format!("age must be a non-negative integer, got {}", personal.idade),
            )
        })?;
        let subject = Subject::new(gender, age, personal.peso)?;

        let (measurements, ignored) = MeasurementSet::from_named(dto.medidas)?;
        if !ignored.is_empty() {
            debug!(?ignored, "ignoring unrecognised measurement sites");
        }

        Ok(Self {
            protocol_id: dto.protocol,
            subject,
            measurements,
        })
    }
}

/// Body-composition calculation response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionResponseDto {
    /// Body fat (%)
    pub percentual_gordura: f64,
    /// Fat mass (kg)
    pub massa_gorda: f64,
    /// Lean mass (kg)
    pub massa_magra: f64,
    /// Total muscle (kg)
    pub massa_muscular: f64,
    /// Skeletal muscle (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub musculo_esqueletico: Option<f64>,
    /// Classification label
    pub classificacao: String,
    /// Body density (g/cm³)
    pub densidade: f64,
    /// Sum of the protocol's skinfolds (mm)
    pub soma_dobras: f64,
}

impl From<CompositionResult> for CompositionResponseDto {
    fn from(result: CompositionResult) -> Self {
        Self {
            percentual_gordura: result.percent_body_fat,
            massa_gorda: result.fat_mass_kg,
            massa_magra: result.lean_mass_kg,
            massa_muscular: result.muscle_mass_kg,
            musculo_esqueletico: result.skeletal_muscle_kg,
            classificacao: result.classification,
            densidade: result.density_g_cm3,
            soma_dobras: result.sum_of_skinfolds_mm,
        }
    }
}

/// Run a calculation from a decoded request
///
/// # Errors
///
/// Returns `AppError` carrying field-level details for invalid input or failed validation
pub fn calculate(
    engine: &CompositionEngine,
    dto: CompositionRequestDto,
) -> Result<CompositionResponseDto, AppError> {
    let request = CompositionRequest::try_from(dto)?;
    let result = engine.calculate(&request.protocol_id, &request.subject, &request.measurements)?;
    Ok(result.into())
}

/// Run a calculation from a JSON body
///
/// # Errors
///
/// Returns `AppError` for malformed JSON, invalid input or failed validation
pub fn calculate_json(
    engine: &CompositionEngine,
    body: &str,
) -> Result<CompositionResponseDto, AppError> {
    calculate(engine, parse_body(body)?)
}
