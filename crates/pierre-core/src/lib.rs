// ABOUTME: Core types and constants for the Pierre body-composition engine
// ABOUTME: Foundation crate with error handling, anthropometric models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Core
//!
//! Foundation crate providing shared types and constants for the Pierre
//! body-composition engine. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `CompositionError`
//! - **constants**: Anthropometric limits and questionnaire literals
//! - **models**: Subject, skinfold measurements, and anamnese answers

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core value objects
pub mod models;
