// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Command implementations for pierre-bodycomp
// ABOUTME: Shared request reading for file and stdin inputs

pub mod composition;
pub mod goal;
pub mod protocols;

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};

/// Read a request body from a path, or stdin when the path is `-`
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut body = String::new();
        io::stdin()
            .read_to_string(&mut body)
            .context("failed to read request from stdin")?;
        Ok(body)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read request file {input}"))
    }
}
