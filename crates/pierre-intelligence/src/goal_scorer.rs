// ABOUTME: Weighted anamnese scoring that classifies a client's dominant objective
// ABOUTME: Ties are resolved by the declared objective after the full tied set is computed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Goal Scoring
//!
//! Every answer adds points to one goal category. The declared objective
//! carries the heaviest weight, so it usually decides on its own; when two
//! or more categories still share the top score the declared objective's
//! category is returned, even if it is not one of them.

use crate::config::intelligence::GoalScoringWeights;
use pierre_core::errors::CompositionError;
use pierre_core::models::{ActivityFrequency, AnamnesisAnswers, GoalCategory, StressLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Sleep quality at or below this points to disease control
const POOR_SLEEP_MAX: u8 = 2;
/// Sleep quality at or below this (and above poor) points to wellbeing
const FAIR_SLEEP_MAX: u8 = 4;

/// How the winning category was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// One category had the highest score
    UniqueMaximum,
    /// Several categories tied and the declared objective was among them
    DeclaredObjectiveInTie,
    /// Several categories tied and the declared objective overrode them
    DeclaredObjectiveOverride,
}

/// Scores, tied set and outcome of one scoring run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Points per category
    pub scores: BTreeMap<GoalCategory, u32>,
    /// Categories sharing the maximum score
    pub tied: Vec<GoalCategory>,
    /// Returned category
    pub category: GoalCategory,
    /// Why `category` was returned
    pub resolution: Resolution,
}

impl ScoreBreakdown {
    /// Score of a category
    #[must_use]
    pub fn score(&self, category: GoalCategory) -> u32 {
        self.scores.get(&category).copied().unwrap_or_default()
    }
}

/// Classifies anamnese answers into a goal category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoalScorer {
    weights: GoalScoringWeights,
}

impl GoalScorer {
    /// Create a scorer with custom weights
    #[must_use]
    pub const fn new(weights: GoalScoringWeights) -> Self {
        Self { weights }
    }

    /// Dominant goal category for the answers
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::InvalidInput` if the answers fail validation
    pub fn score(&self, answers: &AnamnesisAnswers) -> Result<GoalCategory, CompositionError> {
        Ok(self.breakdown(answers)?.category)
    }

    /// Full scoring detail for auditing
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::InvalidInput` if the answers fail validation
    pub fn breakdown(&self, answers: &AnamnesisAnswers) -> Result<ScoreBreakdown, CompositionError> {
        answers.validate()?;

        let scores = self.tally(answers);
        let max = scores.values().copied().max().unwrap_or_default();
        let tied: Vec<GoalCategory> = GoalCategory::ALL
            .into_iter()
            .filter(|category| scores.get(category) == Some(&max))
            .collect();

        let declared = answers.objective.category();
        let (category, resolution) = match tied.as_slice() {
            [single] => (*single, Resolution::UniqueMaximum),
            many if many.contains(&declared) => (declared, Resolution::DeclaredObjectiveInTie),
            _ => (declared, Resolution::DeclaredObjectiveOverride),
        };

        debug!(
            disease_control = scores
                .get(&GoalCategory::DiseaseControl)
                .copied()
                .unwrap_or_default(),
            health_and_wellbeing = scores
                .get(&GoalCategory::HealthAndWellbeing)
                .copied()
                .unwrap_or_default(),
            aesthetics_hypertrophy = scores
                .get(&GoalCategory::AestheticsHypertrophy)
                .copied()
                .unwrap_or_default(),
            category = category.as_str(),
            ?resolution,
            "anamnese scored"
        );

        Ok(ScoreBreakdown {
            scores,
            tied,
            category,
            resolution,
        })
    }

    fn tally(&self, answers: &AnamnesisAnswers) -> BTreeMap<GoalCategory, u32> {
        use GoalCategory::{AestheticsHypertrophy, DiseaseControl, HealthAndWellbeing};

        let w = &self.weights;
        let mut scores: BTreeMap<GoalCategory, u32> =
            GoalCategory::ALL.into_iter().map(|category| (category, 0)).collect();
        let mut award = |category: GoalCategory, points: u32| {
            *scores.entry(category).or_default() += points;
        };

        let history = &answers.health_history;
        if history.diagnosed_disease {
            award(DiseaseControl, w.diagnosed_disease);
        } else {
            award(HealthAndWellbeing, w.no_disease);
        }
        if history.continuous_medication {
            award(DiseaseControl, w.continuous_medication);
        } else {
            award(HealthAndWellbeing, w.no_medication);
        }
        if history.recent_surgery {
            award(DiseaseControl, w.recent_surgery);
        }

        let activity = &answers.physical_activity;
        if activity.practices_activity {
            award(HealthAndWellbeing, w.active);
            match activity.frequency {
                Some(ActivityFrequency::OneToTwo) => {
                    award(HealthAndWellbeing, w.frequency_one_to_two);
                }
                Some(ActivityFrequency::ThreeToFour) => {
                    award(AestheticsHypertrophy, w.frequency_three_to_four);
                }
                Some(ActivityFrequency::FiveOrMore) => {
                    award(AestheticsHypertrophy, w.frequency_five_or_more);
                }
                None => {}
            }
        } else {
            award(DiseaseControl, w.inactive);
        }

        award(answers.objective.category(), w.declared_objective);

        let sleep = answers.lifestyle.sleep_quality;
        let sleep_category = if sleep <= POOR_SLEEP_MAX {
            DiseaseControl
        } else if sleep <= FAIR_SLEEP_MAX {
            HealthAndWellbeing
        } else {
            AestheticsHypertrophy
        };
        award(sleep_category, w.sleep_signal);

        let stress_category = match answers.lifestyle.stress_level {
            StressLevel::High => DiseaseControl,
            StressLevel::Moderate => HealthAndWellbeing,
            StressLevel::Low => AestheticsHypertrophy,
        };
        award(stress_category, w.stress_signal);

        scores
    }
}
