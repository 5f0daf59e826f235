// ABOUTME: Anamnese goal classification DTOs (bloco2..bloco5) and objective response
// ABOUTME: Raw string and optional fields are checked and named before scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::parse_body;
use pierre_core::errors::{AppError, CompositionError};
use pierre_core::models::{
    ActivityFrequency, AnamnesisAnswers, DeclaredObjective, GoalCategory, HealthHistory,
    Lifestyle, PhysicalActivity, StressLevel,
};
use pierre_intelligence::{GoalScorer, ScoreBreakdown};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Block 2: clinical history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalHistoryBlock {
    /// Has a diagnosed disease
    pub doenca_diagnosticada: Option<Value>,
    /// Takes continuous medication
    pub medicacao_continua: Option<Value>,
    /// Had recent surgery
    pub cirurgia_recente: Option<Value>,
}

/// Block 3: physical activity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityBlock {
    /// Currently practices activity
    pub pratica_atividade: Option<Value>,
    /// `1-2x`, `3-4x` or `5x+`
    pub frequencia: Option<Value>,
}

/// Block 4: declared objective
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveBlock {
    /// One of the three objective literals
    pub objetivo: Option<Value>,
}

/// Block 5: lifestyle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifestyleBlock {
    /// Sleep quality 1-5
    pub qualidade_sono: Option<Value>,
    /// `Baixo`, `Moderado` or `Alto`
    pub nivel_estresse: Option<Value>,
}

/// Anamnese as submitted by clients
///
/// Field values are kept as raw JSON and type-checked per field on conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnamnesisRequestDto {
    /// Clinical history
    pub bloco2: ClinicalHistoryBlock,
    /// Physical activity
    pub bloco3: ActivityBlock,
    /// Declared objective
    pub bloco4: ObjectiveBlock,
    /// Lifestyle
    pub bloco5: LifestyleBlock,
}

fn required(value: Option<Value>, field: &str) -> Result<Value, CompositionError> {
    value.ok_or_else(|| CompositionError::invalid_input(field, "field is required"))
}

fn wrong_type(field: &str, expected: &str, got: &Value) -> CompositionError {
    CompositionError::invalid_input(field, format!("expected {expected}, got {got}"))
}

fn required_bool(value: Option<Value>, field: &str) -> Result<bool, CompositionError> {
    match required(value, field)? {
        Value::Bool(flag) => Ok(flag),
        other => Err(wrong_type(field, "true or false", &other)),
    }
}

fn optional_string(
    value: Option<Value>,
    field: &str,
) -> Result<Option<String>, CompositionError> {
    match value {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(other) => Err(wrong_type(field, "a string", &other)),
    }
}

fn required_string(value: Option<Value>, field: &str) -> Result<String, CompositionError> {
    match required(value, field)? {
        Value::String(text) => Ok(text),
        other => Err(wrong_type(field, "a string", &other)),
    }
}

fn required_integer(value: Option<Value>, field: &str) -> Result<i64, CompositionError> {
    let value = required(value, field)?;
    value
        .as_i64()
        .ok_or_else(|| wrong_type(field, "an integer", &value))
}

impl TryFrom<AnamnesisRequestDto> for AnamnesisAnswers {
    type Error = CompositionError;

    fn try_from(dto: AnamnesisRequestDto) -> Result<Self, Self::Error> {
        let health_history = HealthHistory {
            diagnosed_disease: required_bool(
                dto.bloco2.doenca_diagnosticada,
                "doencaDiagnosticada",
            )?,
            continuous_medication: required_bool(
                dto.bloco2.medicacao_continua,
                "medicacaoContinua",
            )?,
            recent_surgery: required_bool(dto.bloco2.cirurgia_recente, "cirurgiaRecente")?,
        };

        let physical_activity = PhysicalActivity {
            practices_activity: required_bool(dto.bloco3.pratica_atividade, "praticaAtividade")?,
            frequency: optional_string(dto.bloco3.frequencia, "frequencia")?
                .as_deref()
                .map(str::parse::<ActivityFrequency>)
                .transpose()?,
        };

        let objective: DeclaredObjective =
            required_string(dto.bloco4.objetivo, "objetivo")?.parse()?;

        let sleep = required_integer(dto.bloco5.qualidade_sono, "qualidadeSono")?;
        let sleep_quality = u8::try_from(sleep).map_err(|_| {
            CompositionError::invalid_input(
                "qualidadeSono",
                format!("sleep quality must be between 1 and 5, got {sleep}"),
            )
        })?;
        let lifestyle = Lifestyle {
            sleep_quality,
            stress_level: required_string(dto.bloco5.nivel_estresse, "nivelEstresse")?
                .parse::<StressLevel>()?,
        };

        let answers = Self {
            health_history,
            physical_activity,
            objective,
            lifestyle,
        };
        answers.validate()?;
        Ok(answers)
    }
}

/// Goal classification response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalResponseDto {
    /// Category label
    pub objetivo: String,
}

impl From<GoalCategory> for GoalResponseDto {
    fn from(category: GoalCategory) -> Self {
        Self {
            objetivo: category.label().to_owned(),
        }
    }
}

/// Classify a decoded anamnese
///
/// # Errors
///
/// Returns `AppError` naming the first malformed or missing field
pub fn classify(
    scorer: &GoalScorer,
    dto: AnamnesisRequestDto,
) -> Result<GoalResponseDto, AppError> {
    let answers = AnamnesisAnswers::try_from(dto)?;
    Ok(scorer.score(&answers)?.into())
}

/// Full scoring detail for a decoded anamnese
///
/// # Errors
///
/// Returns `AppError` naming the first malformed or missing field
pub fn explain(scorer: &GoalScorer, dto: AnamnesisRequestDto) -> Result<ScoreBreakdown, AppError> {
    let answers = AnamnesisAnswers::try_from(dto)?;
    Ok(scorer.breakdown(&answers)?)
}

/// Classify an anamnese JSON body
///
/// # Errors
///
/// Returns `AppError` for malformed JSON or a malformed or missing field
pub fn classify_json(scorer: &GoalScorer, body: &str) -> Result<GoalResponseDto, AppError> {
    classify(scorer, parse_body(body)?)
}
