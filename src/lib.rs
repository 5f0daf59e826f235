// ABOUTME: Main library entry point for the Pierre body-composition tools
// ABOUTME: Wire DTOs, logging setup and re-exports of the engine crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Body Composition
//!
//! Skinfold body-composition calculation and anamnese goal classification.
//!
//! ## Architecture
//!
//! - **`pierre-core`**: value types, constants and the unified error system
//! - **`pierre-intelligence`**: protocol registry, validation, density formulas,
//!   classification and goal scoring
//! - **api**: JSON request/response contract with Portuguese field names
//! - **logging**: `tracing` subscriber setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_bodycomp::api::composition::calculate_json;
//! use pierre_bodycomp::intelligence::CompositionEngine;
//!
//! let engine = CompositionEngine::default();
//! let body = r#"{
//!     "protocol": "pollock3",
//!     "dadosPessoais": { "genero": "M", "idade": 30, "peso": 80.0 },
//!     "medidas": { "peitoral": 12.0, "abdominal": 22.0, "coxa": 16.0 }
//! }"#;
//! let result = calculate_json(&engine, body)?;
//! println!("{}% body fat ({})", result.percentual_gordura, result.classificacao);
//! # Ok::<(), pierre_bodycomp::errors::AppError>(())
//! ```

/// JSON request/response contract
pub mod api;

/// Structured logging setup
pub mod logging;

/// Shared constants
pub use pierre_core::constants;

/// Unified error handling
pub use pierre_core::errors;

/// Value types
pub use pierre_core::models;

/// Body-composition engine
pub use pierre_intelligence as intelligence;
