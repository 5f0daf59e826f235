// ABOUTME: Anamnese goal scoring weights
// ABOUTME: Points awarded per answer to each goal category, declared objective dominant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Points awarded by each anamnese answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalScoringWeights {
    /// Diagnosed disease: disease control
    pub diagnosed_disease: u32,
    /// No diagnosed disease: health and wellbeing
    pub no_disease: u32,
    /// Continuous medication: disease control
    pub continuous_medication: u32,
    /// No continuous medication: health and wellbeing
    pub no_medication: u32,
    /// Recent surgery: disease control
    pub recent_surgery: u32,
    /// Not practicing activity: disease control
    pub inactive: u32,
    /// Practicing activity: health and wellbeing
    pub active: u32,
    /// 1-2x per week: health and wellbeing
    pub frequency_one_to_two: u32,
    /// 3-4x per week: aesthetics
    pub frequency_three_to_four: u32,
    /// 5x+ per week: aesthetics
    pub frequency_five_or_more: u32,
    /// Declared objective: its own category
    pub declared_objective: u32,
    /// Sleep quality signal (any band)
    pub sleep_signal: u32,
    /// Stress level signal (any level)
    pub stress_signal: u32,
}

impl Default for GoalScoringWeights {
    fn default() -> Self {
        Self {
            diagnosed_disease: 3,
            no_disease: 1,
            continuous_medication: 2,
            no_medication: 1,
            recent_surgery: 1,
            inactive: 2,
            active: 1,
            frequency_one_to_two: 1,
            frequency_three_to_four: 2,
            frequency_five_or_more: 3,
            declared_objective: 10,
            sleep_signal: 1,
            stress_signal: 1,
        }
    }
}
