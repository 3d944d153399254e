//! Lipid identities as supplied by a reference database.
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use crate::charge::IonizationMode;

/// Lipid classes, following the LIPID MAPS classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LipidClass {
    /// Phosphatidylcholine
    PC,
    /// Phosphatidylethanolamine
    PE,
    /// Phosphatidylglycerol
    PG,
    /// Phosphatidylinositol
    PI,
    /// Phosphatidic acid
    PA,
    /// Phosphatidylserine
    PS,
    /// Triacylglycerol
    TG,
}

impl LipidClass {
    pub const ALL: [LipidClass; 7] = [
        Self::PC,
        Self::PE,
        Self::PG,
        Self::PI,
        Self::PA,
        Self::PS,
        Self::TG,
    ];

    pub const fn abbreviation(&self) -> &'static str {
        match self {
            Self::PC => "PC",
            Self::PE => "PE",
            Self::PG => "PG",
            Self::PI => "PI",
            Self::PA => "PA",
            Self::PS => "PS",
            Self::TG => "TG",
        }
    }
}

impl Display for LipidClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown lipid class {0:?}")]
pub struct UnknownLipidClass(pub String);

impl FromStr for LipidClass {
    type Err = UnknownLipidClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.abbreviation().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLipidClass(s.to_string()))
    }
}

/// The identity of a lipid an [`Annotation`](crate::annotation::Annotation) proposes.
///
/// A `Lipid` is never mutated once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lipid {
    pub id: u32,
    pub name: String,
    pub formula: String,
    pub lipid_class: LipidClass,
    pub carbon_count: u32,
    pub double_bond_count: u32,
}

impl Lipid {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        formula: impl Into<String>,
        lipid_class: LipidClass,
        carbon_count: u32,
        double_bond_count: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            formula: formula.into(),
            lipid_class,
            carbon_count,
            double_bond_count,
        }
    }
}

impl Display for Lipid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
