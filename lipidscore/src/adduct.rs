//! Adduct mass shift tables and conversion between m/z and neutral monoisotopic mass.
//!
//! Shifts are stored per polarity. In positive mode the stored shift is the mass
//! *added* to the neutral mass to produce the ion, so it is subtracted to recover
//! the neutral mass. In negative mode the stored shift is the mass *lost*, so it is
//! added back.
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use crate::charge::{ionization_polarity, parse_multimer_and_charge, IonizationMode};

pub const PROTONATED: &str = "[M+H]+";
pub const DOUBLY_PROTONATED: &str = "[M+2H]2+";
pub const SODIATED: &str = "[M+Na]+";
pub const PROTONATED_WATER_LOSS: &str = "[M+H-H2O]+";

/// Mass shifts in Daltons for adducts formed in positive mode
pub static POSITIVE_ADDUCTS: &[(&str, f64)] = &[
    ("[M+H]+", -1.007276),
    ("[M+2H]2+", -2.014552),
    ("[M+Na]+", -22.989218),
    ("[M+K]+", -38.963158),
    ("[M+NH4]+", -18.033823),
    ("[M+H-H2O]+", 17.0032),
    ("[M+H+NH4]2+", -19.04165),
    ("[2M+H]+", -1.007276),
    ("[2M+Na]+", -22.989218),
];

/// Mass shifts in Daltons for adducts formed in negative mode
pub static NEGATIVE_ADDUCTS: &[(&str, f64)] = &[
    ("[M-H]\u{2212}", 1.007276),
    ("[M+Cl]\u{2212}", -34.969402),
    ("[M+HCOOH-H]\u{2212}", -44.998201),
    ("[M-H-H2O]\u{2212}", 19.01839),
    ("[2M-H]\u{2212}", 1.007276),
    ("[M-2H]2\u{2212}", 1.007276),
];

/// An error that might occur while resolving an adduct
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdductError {
    #[error("No adduct was provided")]
    AbsentInput,
    #[error("{0} is not a known adduct")]
    UnknownAdduct(String),
}

fn table_lookup(table: &'static [(&'static str, f64)], name: &str) -> Option<(&'static str, f64)> {
    table.iter().find(|(key, _)| *key == name).copied()
}

/// Look up the mass shift of `adduct`, first among the positive adducts, then
/// among the negative ones.
///
/// Names must match the tables exactly, including bracket and charge notation.
pub fn mass_shift(adduct: &str) -> Option<f64> {
    table_lookup(POSITIVE_ADDUCTS, adduct)
        .or_else(|| table_lookup(NEGATIVE_ADDUCTS, adduct))
        .map(|(_, shift)| shift)
}

/// A tabulated adduct with its notation resolved into its component parts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adduct {
    pub name: &'static str,
    /// The stored mass shift in Daltons
    pub mass_shift: f64,
    /// The number of neutral molecules in the ion
    pub multimer: u32,
    /// The charge magnitude of the ion
    pub charge: u32,
    /// The polarity implied by the notation
    pub polarity: IonizationMode,
}

impl Adduct {
    fn from_entry((name, mass_shift): (&'static str, f64)) -> Self {
        let parsed = parse_multimer_and_charge(name);
        Self {
            name,
            mass_shift,
            multimer: parsed.multimer,
            charge: parsed.charge,
            polarity: ionization_polarity(Some(name)),
        }
    }

    /// Find a tabulated adduct by its exact name
    pub fn lookup(name: &str) -> Option<Self> {
        table_lookup(POSITIVE_ADDUCTS, name)
            .or_else(|| table_lookup(NEGATIVE_ADDUCTS, name))
            .map(Self::from_entry)
    }

    /// The neutral monoisotopic mass of the molecule observed at `mz` as this adduct
    pub fn monoisotopic_mass(&self, mz: f64) -> f64 {
        let adjusted = if self.polarity.is_negative() {
            mz + self.mass_shift
        } else {
            mz - self.mass_shift
        };
        adjusted * self.charge as f64 / self.multimer as f64
    }

    /// The m/z at which a molecule of neutral mass `mass` is observed as this adduct.
    ///
    /// The multimer-scaled mass is only divided by the charge when the charge is
    /// greater than one.
    pub fn mz(&self, mass: f64) -> f64 {
        let mut scaled = mass * self.multimer as f64;
        if self.charge > 1 {
            scaled /= self.charge as f64;
        }
        if self.polarity.is_negative() {
            scaled - self.mass_shift
        } else {
            scaled + self.mass_shift
        }
    }
}

impl FromStr for Adduct {
    type Err = AdductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AdductError::AbsentInput);
        }
        Self::lookup(s).ok_or_else(|| AdductError::UnknownAdduct(s.to_string()))
    }
}

impl Display for Adduct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// All tabulated adducts for a given polarity table
pub fn adducts_for(mode: IonizationMode) -> impl Iterator<Item = Adduct> {
    let table = match mode {
        IonizationMode::Positive => POSITIVE_ADDUCTS,
        IonizationMode::Negative => NEGATIVE_ADDUCTS,
    };
    table.iter().copied().map(Adduct::from_entry)
}

/// All tabulated adducts, positive table first
pub fn known_adducts() -> impl Iterator<Item = Adduct> {
    adducts_for(IonizationMode::Positive).chain(adducts_for(IonizationMode::Negative))
}

/// Convert an observed `mz` into the neutral monoisotopic mass under the `adduct`
/// hypothesis, or `None` if the adduct is not tabulated.
pub fn monoisotopic_mass_from_mz(mz: f64, adduct: &str) -> Option<f64> {
    Adduct::lookup(adduct).map(|a| a.monoisotopic_mass(mz))
}

/// Convert a neutral monoisotopic `mass` into the m/z it would be observed at as
/// `adduct`, or `None` if the adduct is not tabulated.
pub fn mz_from_monoisotopic_mass(mass: f64, adduct: &str) -> Option<f64> {
    Adduct::lookup(adduct).map(|a| a.mz(mass))
}

/// As [`monoisotopic_mass_from_mz`], but for inputs that may be missing, reporting
/// why no result could be produced.
pub fn try_monoisotopic_mass_from_mz(
    mz: Option<f64>,
    adduct: Option<&str>,
) -> Result<f64, AdductError> {
    let (mz, adduct) = mz.zip(adduct).ok_or(AdductError::AbsentInput)?;
    Ok(adduct.parse::<Adduct>()?.monoisotopic_mass(mz))
}

/// As [`mz_from_monoisotopic_mass`], but for inputs that may be missing, reporting
/// why no result could be produced.
pub fn try_mz_from_monoisotopic_mass(
    mass: Option<f64>,
    adduct: Option<&str>,
) -> Result<f64, AdductError> {
    let (mass, adduct) = mass.zip(adduct).ok_or(AdductError::AbsentInput)?;
    Ok(adduct.parse::<Adduct>()?.mz(mass))
}

/// Alias of [`monoisotopic_mass_from_mz`]
#[inline]
pub fn mz_to_monoisotopic_mass(mz: f64, adduct: &str) -> Option<f64> {
    monoisotopic_mass_from_mz(mz, adduct)
}

/// Alias of [`mz_from_monoisotopic_mass`]
#[inline]
pub fn monoisotopic_mass_to_mz(mass: f64, adduct: &str) -> Option<f64> {
    mz_from_monoisotopic_mass(mass, adduct)
}
