//! Inferring an annotation's adduct from the companion peaks grouped with it.
//!
//! The highest m/z peak that survives deisotoping is taken as the reference ion.
//! Every other peak is then tested against a small set of known mass relationships
//! to the reference ion; the first relationship that holds identifies the
//! reference as the protonated molecule and the other peak as its companion.
use std::fmt::Display;

use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::adduct::{DOUBLY_PROTONATED, PROTONATED, PROTONATED_WATER_LOSS, SODIATED};
use crate::annotation::Annotation;
use crate::deisotope::deisotope;
use crate::peaks::Peak;
use crate::tolerance::{ppm_to_absolute_delta, round_half_up};

pub const PROTON_MASS: f64 = 1.0073;
pub const SODIUM_MASS: f64 = 22.9898;
pub const WATER_MASS: f64 = 18.0106;

/// The adduct assigned when a reference ion is found, whether or not a companion matched
pub const DEFAULT_ADDUCT: &str = PROTONATED;

/// Decimal places the doubly charged hypothesis compares m/z at
const DOUBLE_CHARGE_DECIMALS: u32 = 5;

/// Tolerances used by [`AdductDetector`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectionParams {
    /// The ppm tolerance for recognizing isotope peaks
    pub deisotope_ppm: i32,
    /// The ppm tolerance, relative to the reference ion, for the sodium and water
    /// loss companions
    pub companion_ppm: i32,
    /// The ppm tolerance, relative to the expected m/z, for the doubly charged companion
    pub double_charge_ppm: i32,
    /// Peaks closer than this many Daltons to the reference ion are the reference ion
    pub same_peak_tolerance: f64,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            deisotope_ppm: 5,
            companion_ppm: 10,
            double_charge_ppm: 15,
            same_peak_tolerance: 0.001,
        }
    }
}

/// A known relationship between the protonated molecule and another ion of the
/// same molecule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanionHypothesis {
    /// `[M+Na]+` sits `Na - H` above `[M+H]+`
    Sodiated,
    /// `[M+H-H2O]+` sits one water below `[M+H]+`
    WaterLoss,
    /// `[M+2H]2+` sits at half of `[M+H]+` plus a proton
    DoublyCharged,
}

impl CompanionHypothesis {
    /// The hypotheses in the order they are tested
    pub const ALL: [CompanionHypothesis; 3] = [Self::Sodiated, Self::WaterLoss, Self::DoublyCharged];

    /// The adduct of the companion ion
    pub const fn companion_adduct(&self) -> &'static str {
        match self {
            Self::Sodiated => SODIATED,
            Self::WaterLoss => PROTONATED_WATER_LOSS,
            Self::DoublyCharged => DOUBLY_PROTONATED,
        }
    }
}

impl Display for CompanionHypothesis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.companion_adduct())
    }
}

/// What [`AdductDetector::detect`] concluded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectionOutcome {
    /// There were no peaks to work with, and the annotation was left untouched
    NoPeaks,
    /// A companion ion was found for the reference ion
    Matched {
        hypothesis: CompanionHypothesis,
        reference: Peak,
        companion: Peak,
    },
    /// No companion ion was found, and the default adduct was assigned
    Defaulted { reference: Peak },
}

impl DetectionOutcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted { .. })
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AdductDetector {
    pub params: DetectionParams,
}

impl AdductDetector {
    pub fn new(params: DetectionParams) -> Self {
        Self { params }
    }

    /// Test `other` against each [`CompanionHypothesis`] relative to `reference`,
    /// returning the first that holds.
    pub fn match_companion(&self, reference: &Peak, other: &Peak) -> Option<CompanionHypothesis> {
        let delta = (other.mz - reference.mz).abs();
        let tolerance = ppm_to_absolute_delta(reference.mz, self.params.companion_ppm);

        if (delta - (SODIUM_MASS - PROTON_MASS)).abs() <= tolerance {
            return Some(CompanionHypothesis::Sodiated);
        }
        if (delta - WATER_MASS).abs() <= tolerance {
            return Some(CompanionHypothesis::WaterLoss);
        }

        // Rounding both sides to a fixed number of decimals keeps values like
        // 457.41465 from being compared as 457.41464999999997
        let expected = round_half_up((reference.mz + PROTON_MASS) / 2.0, DOUBLE_CHARGE_DECIMALS);
        let observed = round_half_up(other.mz, DOUBLE_CHARGE_DECIMALS);
        let tolerance = ppm_to_absolute_delta(expected, self.params.double_charge_ppm);
        if (observed - expected).abs() <= tolerance {
            return Some(CompanionHypothesis::DoublyCharged);
        }
        None
    }

    /// Infer the adduct of `annotation` from its grouped peaks.
    ///
    /// When the annotation has peaks, its adduct is always set, to
    /// [`DEFAULT_ADDUCT`] if nothing better is found, and any companion adduct found
    /// is added to its detected adducts. An annotation without peaks is not changed.
    pub fn detect(&self, annotation: &mut Annotation) -> DetectionOutcome {
        let cleaned = deisotope(annotation.peaks(), self.params.deisotope_ppm);
        let Some(reference) = cleaned.highest_mz().copied() else {
            return DetectionOutcome::NoPeaks;
        };
        debug!(
            "Reference ion of {} is {reference} out of {} peaks",
            annotation.lipid(),
            cleaned.len()
        );

        for other in cleaned.iter() {
            if (reference.mz - other.mz).abs() < self.params.same_peak_tolerance {
                continue;
            }
            if let Some(hypothesis) = self.match_companion(&reference, other) {
                debug!(
                    "{} has {hypothesis} companion {other}",
                    annotation.lipid()
                );
                annotation.add_detected_adduct(hypothesis.companion_adduct());
                annotation.set_adduct(DEFAULT_ADDUCT);
                return DetectionOutcome::Matched {
                    hypothesis,
                    reference,
                    companion: *other,
                };
            }
        }

        debug!(
            "No known adducts detected for {}, defaulting to {DEFAULT_ADDUCT}",
            annotation.lipid()
        );
        annotation.set_adduct(DEFAULT_ADDUCT);
        DetectionOutcome::Defaulted { reference }
    }
}

/// Infer the adduct of `annotation` with the default [`DetectionParams`]
pub fn detect_adduct(annotation: &mut Annotation) -> DetectionOutcome {
    AdductDetector::default().detect(annotation)
}
