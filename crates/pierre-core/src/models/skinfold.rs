// ABOUTME: Skinfold measurement sites and the per-request measurement set
// ABOUTME: Site names parse from English and Portuguese, unknown sites are ignored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::CompositionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Anatomical site of a caliper skinfold measurement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SkinfoldSite {
    /// Subscapular (diagonal fold below the scapula)
    Subscapular,
    /// Triceps (vertical fold, posterior upper arm)
    Triceps,
    /// Biceps (vertical fold, anterior upper arm)
    Biceps,
    /// Chest / pectoral (diagonal fold)
    Chest,
    /// Midaxillary (vertical fold on the midaxillary line)
    Midaxillary,
    /// Suprailiac (diagonal fold above the iliac crest)
    Suprailiac,
    /// Abdominal (vertical fold beside the umbilicus)
    Abdominal,
    /// Thigh (vertical fold, anterior midline)
    Thigh,
    /// Medial calf
    Calf,
}

impl SkinfoldSite {
    /// Every known site
    pub const ALL: [Self; 9] = [
        Self::Subscapular,
        Self::Triceps,
        Self::Biceps,
        Self::Chest,
        Self::Midaxillary,
        Self::Suprailiac,
        Self::Abdominal,
        Self::Thigh,
        Self::Calf,
    ];

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Subscapular => "subscapular",
            Self::Triceps => "triceps",
            Self::Biceps => "biceps",
            Self::Chest => "chest",
            Self::Midaxillary => "midaxillary",
            Self::Suprailiac => "suprailiac",
            Self::Abdominal => "abdominal",
            Self::Thigh => "thigh",
            Self::Calf => "calf",
        }
    }

    /// Resolve a site from an English or Portuguese name
    ///
    /// Matching ignores case, accents, spaces, dashes and underscores.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match normalize_site_name(name).as_str() {
            "subscapular" | "subescapular" => Some(Self::Subscapular),
            "triceps" | "tricipital" => Some(Self::Triceps),
            "biceps" | "bicipital" => Some(Self::Biceps),
            "chest" | "pectoral" | "peitoral" | "torax" | "toracica" => Some(Self::Chest),
            "midaxillary" | "axilarmedia" | "axilar" => Some(Self::Midaxillary),
            "suprailiac" | "suprailiaca" => Some(Self::Suprailiac),
            "abdominal" | "abdomen" => Some(Self::Abdominal),
            "thigh" | "coxa" => Some(Self::Thigh),
            "calf" | "panturrilha" | "perna" => Some(Self::Calf),
            _ => None,
        }
    }
}

fn normalize_site_name(name: &str) -> String {
    name.chars()
        .filter_map(|c| {
            let folded = match c.to_lowercase().next().unwrap_or(c) {
                'á' | 'à' | 'â' | 'ã' => 'a',
                'é' | 'ê' => 'e',
                'í' => 'i',
                'ó' | 'ô' | 'õ' => 'o',
                'ú' => 'u',
                'ç' => 'c',
                other => other,
            };
            folded.is_ascii_alphanumeric().then_some(folded)
        })
        .collect()
}

impl fmt::Display for SkinfoldSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkinfoldSite {
    type Err = CompositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            CompositionError::invalid_input("medidas", format!("unknown skinfold site '{s}'"))
        })
    }
}

/// Skinfold thickness per site, in millimetres
///
/// Only the sites required by the selected protocol are consulted; anything
/// else in the set is carried but ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementSet {
    values: BTreeMap<SkinfoldSite, f64>,
}

impl MeasurementSet {
    /// Create an empty measurement set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, site: SkinfoldSite, millimetres: f64) -> Self {
        self.values.insert(site, millimetres);
        self
    }

    /// Insert or replace a measurement, returning the previous value
    pub fn insert(&mut self, site: SkinfoldSite, millimetres: f64) -> Option<f64> {
        self.values.insert(site, millimetres)
    }

    /// Build a set from `(site name, mm)` pairs
    ///
    /// Unrecognised site names are skipped and returned so callers can log them.
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::InvalidInput` if two names (e.g. `chest` and
    /// `peitoral`) resolve to the same site with different values
    pub fn from_named<I, S>(pairs: I) -> Result<(Self, Vec<String>), CompositionError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        let mut ignored = Vec::new();

        for (name, value) in pairs {
            let name = name.as_ref();
            let Some(site) = SkinfoldSite::from_name(name) else {
                ignored.push(name.to_owned());
                continue;
            };
            if let Some(previous) = set.insert(site, value) {
                if previous.to_bits() != value.to_bits() {
                    return Err(CompositionError::invalid_input(
                        format!("medidas.{name}"),
                        format!(
                            "site {site} given twice with different values ({previous} and {value})"
                        ),
                    ));
                }
            }
        }

        Ok((set, ignored))
    }

    /// Measurement for a site
    #[must_use]
    pub fn get(&self, site: SkinfoldSite) -> Option<f64> {
        self.values.get(&site).copied()
    }

    /// Number of measured sites
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no site was measured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate measurements in site order
    pub fn iter(&self) -> impl Iterator<Item = (SkinfoldSite, f64)> + '_ {
        self.values.iter().map(|(site, value)| (*site, *value))
    }
}

impl FromIterator<(SkinfoldSite, f64)> for MeasurementSet {
    fn from_iter<T: IntoIterator<Item = (SkinfoldSite, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
