// ABOUTME: Skinfold protocol catalogue with gender-keyed site sets and age eligibility
// ABOUTME: Immutable registry looked up by identifier (Faulkner, Pollock 3/7/9, Guedes)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Protocol Registry
//!
//! A protocol names a fixed set of skinfold sites (possibly different per
//! gender), the ages its prediction equation was validated on, and the
//! reference of that equation. The registry is built once and shared
//! read-only by every calculation.

use pierre_core::errors::CompositionError;
use pierre_core::models::{Gender, SkinfoldSite, Subject};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Identifiers of the standard protocols
pub mod protocol_ids {
    /// Faulkner (1968), four sites
    pub const FAULKNER: &str = "faulkner";
    /// Jackson & Pollock, three sites
    pub const POLLOCK_3: &str = "pollock3";
    /// Jackson & Pollock, seven sites
    pub const POLLOCK_7: &str = "pollock7";
    /// Nine-site athlete protocol
    pub const POLLOCK_9: &str = "pollock9";
    /// Guedes (1985), three sites
    pub const GUEDES: &str = "guedes";
}

/// Normalize a protocol identifier for lookup
///
/// `Pollock-3`, `POLLOCK_3` and `pollock 3` all normalize to `pollock3`.
#[must_use]
pub fn normalize_protocol_id(id: &str) -> String {
    id.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Sites a protocol measures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredSites {
    /// Same ordered sites for every gender
    Uniform(Vec<SkinfoldSite>),
    /// Ordered sites per gender; a missing gender is unsupported
    ByGender(BTreeMap<Gender, Vec<SkinfoldSite>>),
}

impl RequiredSites {
    /// Gender-keyed sites for a male/female pair
    #[must_use]
    pub fn by_gender(male: Vec<SkinfoldSite>, female: Vec<SkinfoldSite>) -> Self {
        Self::ByGender(BTreeMap::from([(Gender::Male, male), (Gender::Female, female)]))
    }

    /// Sites for a gender, if the protocol supports it
    #[must_use]
    pub fn for_gender(&self, gender: Gender) -> Option<&[SkinfoldSite]> {
        match self {
            Self::Uniform(sites) => Some(sites),
            Self::ByGender(map) => map.get(&gender).map(Vec::as_slice),
        }
    }

    fn site_lists(&self) -> Vec<&[SkinfoldSite]> {
        match self {
            Self::Uniform(sites) => vec![sites.as_slice()],
            Self::ByGender(map) => map.values().map(Vec::as_slice).collect(),
        }
    }
}

/// Inclusive age range a protocol is validated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeEligibility {
    /// Youngest eligible age
    pub min: u32,
    /// Oldest eligible age
    pub max: u32,
}

impl AgeEligibility {
    /// Create an inclusive range
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Whether an age is within range
    #[must_use]
    pub const fn contains(&self, age: u32) -> bool {
        age >= self.min && age <= self.max
    }
}

/// A skinfold protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocol {
    /// Lookup identifier (normalized)
    pub id: String,
    /// Display name
    pub name: String,
    /// Sites measured
    pub required_sites: RequiredSites,
    /// Validated age range, `None` when unrestricted
    pub age_eligibility: Option<AgeEligibility>,
    /// Rough time needed to take the measurements
    pub approx_duration_hint: String,
    /// Population and intended use
    pub description: String,
    /// Source of the prediction equation
    pub reference: String,
}

impl Protocol {
    /// Sites required for a gender
    #[must_use]
    pub fn sites_for(&self, gender: Gender) -> Option<&[SkinfoldSite]> {
        self.required_sites.for_gender(gender)
    }

    /// Whether a subject can be assessed with this protocol
    #[must_use]
    pub fn is_eligible(&self, subject: &Subject) -> bool {
        self.sites_for(subject.gender).is_some()
            && self
                .age_eligibility
                .is_none_or(|range| range.contains(subject.age))
    }

    fn check(&self) -> Result<(), CompositionError> {
        if self.id.is_empty() {
            return Err(CompositionError::invalid_input(
                "protocol.id",
                "protocol identifier must contain at least one letter or digit",
            ));
        }
        for sites in self.required_sites.site_lists() {
            if sites.is_empty() {
                return Err(CompositionError::invalid_input(
                    format!("protocol.{}.required_sites", self.id),
                    "a protocol must require at least one site",
                ));
            }
            let unique: BTreeSet<_> = sites.iter().collect();
            if unique.len() != sites.len() {
                return Err(CompositionError::invalid_input(
                    format!("protocol.{}.required_sites", self.id),
                    "a site is listed more than once",
                ));
            }
        }
        if let Some(range) = self.age_eligibility {
            if range.min > range.max {
                return Err(CompositionError::invalid_input(
                    format!("protocol.{}.age_eligibility", self.id),
                    format!("min age {} exceeds max age {}", range.min, range.max),
                ));
            }
        }
        Ok(())
    }
}

/// Read-only catalogue of protocols
#[derive(Debug, Clone)]
pub struct ProtocolRegistry {
    protocols: Vec<Protocol>,
    index: BTreeMap<String, usize>,
}

impl Default for ProtocolRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl ProtocolRegistry {
    /// The standard catalogue
    #[must_use]
    pub fn standard() -> Self {
        use SkinfoldSite::{
            Abdominal, Biceps, Calf, Chest, Midaxillary, Subscapular, Suprailiac, Thigh, Triceps,
        };

        let pollock7 = vec![
            Triceps,
            Subscapular,
            Suprailiac,
            Abdominal,
            Chest,
            Midaxillary,
            Thigh,
        ];
        let mut pollock9 = pollock7.clone();
        pollock9.extend([Biceps, Calf]);

        let protocols = vec![
            Protocol {
                id: protocol_ids::FAULKNER.into(),
                name: "Faulkner".into(),
                required_sites: RequiredSites::Uniform(vec![
                    Subscapular,
                    Triceps,
                    Abdominal,
                    Suprailiac,
                ]),
                age_eligibility: None,
                approx_duration_hint: "~5 min".into(),
                description: "Four-site equation for general adult populations".into(),
                reference: "Faulkner, J.A. (1968). Physiology of swimming and diving".into(),
            },
            Protocol {
                id: protocol_ids::POLLOCK_3.into(),
                name: "Pollock 3 dobras".into(),
                required_sites: RequiredSites::by_gender(
                    vec![Chest, Abdominal, Thigh],
                    vec![Triceps, Suprailiac, Thigh],
                ),
                age_eligibility: Some(AgeEligibility::new(18, 61)),
                approx_duration_hint: "~3 min".into(),
                description: "Quick three-site generalized equation for adults".into(),
                reference: "Jackson & Pollock (1978); Jackson, Pollock & Ward (1980)".into(),
            },
            Protocol {
                id: protocol_ids::POLLOCK_7.into(),
                name: "Pollock 7 dobras".into(),
                required_sites: RequiredSites::Uniform(pollock7),
                age_eligibility: Some(AgeEligibility::new(18, 61)),
                approx_duration_hint: "~7 min".into(),
                description: "Seven-site generalized equation, higher precision for adults".into(),
                reference: "Jackson & Pollock (1978); Jackson, Pollock & Ward (1980)".into(),
            },
            Protocol {
                id: protocol_ids::POLLOCK_9.into(),
                name: "Pollock 9 dobras".into(),
                required_sites: RequiredSites::Uniform(pollock9),
                age_eligibility: None,
                approx_duration_hint: "~10 min".into(),
                description: "Nine-site protocol intended for athletes".into(),
                reference: "Parrillo nine-site sum equation".into(),
            },
            Protocol {
                id: protocol_ids::GUEDES.into(),
                name: "Guedes".into(),
                required_sites: RequiredSites::by_gender(
                    vec![Triceps, Abdominal, Suprailiac],
                    vec![Subscapular, Suprailiac, Thigh],
                ),
                age_eligibility: Some(AgeEligibility::new(15, 65)),
                approx_duration_hint: "~3 min".into(),
                description: "Three-site equation validated on Brazilian adults".into(),
                reference: "Guedes, D.P. (1985). Estudo da gordura corporal".into(),
            },
        ];

        let index = protocols
            .iter()
            .enumerate()
            .map(|(position, protocol)| (protocol.id.clone(), position))
            .collect();

        Self { protocols, index }
    }

    /// Build a registry from custom protocols
    ///
    /// Identifiers are normalized; site lists and age ranges are checked.
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::InvalidInput` for duplicate identifiers,
    /// empty or repeated site lists, or inverted age ranges
    pub fn from_protocols(protocols: Vec<Protocol>) -> Result<Self, CompositionError> {
        let mut normalized = Vec::with_capacity(protocols.len());
        let mut index = BTreeMap::new();

        for mut protocol in protocols {
            protocol.id = normalize_protocol_id(&protocol.id);
            protocol.check()?;
            if index.insert(protocol.id.clone(), normalized.len()).is_some() {
                return Err(CompositionError::invalid_input(
                    "protocol.id",
                    format!("protocol '{}' is registered twice", protocol.id),
                ));
            }
            normalized.push(protocol);
        }

        Ok(Self {
            protocols: normalized,
            index,
        })
    }

    /// Describe a protocol
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::UnknownProtocol` if the identifier is not registered
    pub fn describe(&self, protocol_id: &str) -> Result<&Protocol, CompositionError> {
        self.index
            .get(&normalize_protocol_id(protocol_id))
            .and_then(|position| self.protocols.get(*position))
            .ok_or_else(|| CompositionError::unknown_protocol(protocol_id))
    }

    /// Ordered sites a protocol requires for a gender
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::UnknownProtocol` for an unregistered identifier and
    /// `CompositionError::UnsupportedGender` if the protocol has no sites for `gender`
    pub fn resolve_required_sites(
        &self,
        protocol_id: &str,
        gender: Gender,
    ) -> Result<&[SkinfoldSite], CompositionError> {
        let protocol = self.describe(protocol_id)?;
        protocol
            .sites_for(gender)
            .ok_or_else(|| CompositionError::UnsupportedGender {
                protocol_id: protocol.id.clone(),
                gender,
            })
    }

    /// Whether an identifier is registered
    #[must_use]
    pub fn contains(&self, protocol_id: &str) -> bool {
        self.index.contains_key(&normalize_protocol_id(protocol_id))
    }

    /// All protocols in registration order
    pub fn protocols(&self) -> impl Iterator<Item = &Protocol> {
        self.protocols.iter()
    }

    /// Protocols usable for a subject's gender and age
    #[must_use]
    pub fn eligible_for(&self, subject: &Subject) -> Vec<&Protocol> {
        self.protocols
            .iter()
            .filter(|protocol| protocol.is_eligible(subject))
            .collect()
    }

    /// Number of registered protocols
    #[must_use]
    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_protocol_id_normalization() {
        assert_eq!(normalize_protocol_id("Pollock-3"), "pollock3");
        assert_eq!(normalize_protocol_id(" POLLOCK_7 "), "pollock7");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let registry = ProtocolRegistry::standard();
        let mut protocols: Vec<Protocol> = registry.protocols().cloned().collect();
        let mut copy = protocols[0].clone();
        copy.id = "FAULKNER".into();
        protocols.push(copy);

        assert!(ProtocolRegistry::from_protocols(protocols).is_err());
    }

    #[test]
    fn test_gender_keyed_sites_serialize_by_gender() {
        let protocol = ProtocolRegistry::standard().describe("pollock3").unwrap().clone();
        let json = serde_json::to_value(&protocol).unwrap();

        assert_eq!(json["required_sites"]["by_gender"]["female"][0], "triceps");
        assert_eq!(json["age_eligibility"]["max"], 61);
    }

    #[test]
    fn test_inverted_age_range_rejected() {
        let mut protocol = ProtocolRegistry::standard()
            .describe("guedes")
            .unwrap()
            .clone();
        protocol.age_eligibility = Some(AgeEligibility::new(70, 20));

        assert!(ProtocolRegistry::from_protocols(vec![protocol]).is_err());
    }
}
