// ABOUTME: Wire contract for body-composition and goal classification requests
// ABOUTME: Portuguese-named JSON DTOs converted to and from engine types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Request/response DTOs
//!
//! Transport is out of scope; these types fix the JSON shapes an HTTP layer
//! or the CLI exchanges with the engine.

/// Anamnese goal classification request/response
pub mod anamnesis;

/// Body-composition calculation request/response
pub mod composition;

use pierre_core::errors::{AppError, ErrorCode};
use serde::de::DeserializeOwned;

/// Parse a JSON request body, reporting malformed JSON as `INVALID_FORMAT`
///
/// # Errors
///
/// Returns `AppError` with `ErrorCode::InvalidFormat` if the body is not valid JSON
/// for `T`
pub fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, AppError> {
    serde_json::from_str(body).map_err(|e| {
        AppError::new(ErrorCode::InvalidFormat, format!("Malformed request body: {e}"))
            .with_source(e)
    })
}
