//! The candidate identification that detection and scoring operate on.
use std::collections::BTreeSet;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

use crate::adduct::{try_monoisotopic_mass_from_mz, AdductError};
use crate::lipid::{IonizationMode, Lipid};
use crate::peaks::PeakSet;

/// A proposed [`Lipid`] for a feature measured at `mz` and `rt_min`, together with
/// the peaks that co-elute with it.
///
/// Identity is the triple `(lipid, mz, rt_min)`, so two annotations of the same
/// lipid at the same coordinates are equal even if their peaks differ. The
/// adduct, the detected companion adducts, and the score state are the only
/// parts that change after construction.
#[derive(Debug, Clone)]
pub struct Annotation {
    lipid: Lipid,
    mz: f64,
    intensity: f64,
    rt_min: f64,
    ionization_mode: IonizationMode,
    adduct: Option<String>,
    peaks: PeakSet,
    detected_adducts: BTreeSet<String>,
    pub(crate) score: i32,
    pub(crate) comparisons_applied: u32,
    score_assigned: bool,
    has_been_scored: bool,
}

impl Annotation {
    pub fn new(
        lipid: Lipid,
        mz: f64,
        intensity: f64,
        rt_min: f64,
        ionization_mode: IonizationMode,
        peaks: impl Into<PeakSet>,
    ) -> Self {
        Self {
            lipid,
            mz,
            intensity,
            rt_min,
            ionization_mode,
            adduct: None,
            peaks: peaks.into(),
            detected_adducts: BTreeSet::new(),
            score: 0,
            comparisons_applied: 0,
            score_assigned: false,
            has_been_scored: false,
        }
    }

    /// An annotation with no grouped peaks, whose adduct must come from elsewhere
    pub fn without_peaks(
        lipid: Lipid,
        mz: f64,
        intensity: f64,
        rt_min: f64,
        ionization_mode: IonizationMode,
    ) -> Self {
        Self::new(lipid, mz, intensity, rt_min, ionization_mode, PeakSet::empty())
    }

    pub fn with_adduct(mut self, adduct: impl Into<String>) -> Self {
        self.set_adduct(adduct);
        self
    }

    pub fn lipid(&self) -> &Lipid {
        &self.lipid
    }

    pub fn mz(&self) -> f64 {
        self.mz
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn rt_min(&self) -> f64 {
        self.rt_min
    }

    pub fn ionization_mode(&self) -> IonizationMode {
        self.ionization_mode
    }

    pub fn adduct(&self) -> Option<&str> {
        self.adduct.as_deref()
    }

    pub fn set_adduct(&mut self, adduct: impl Into<String>) {
        self.adduct = Some(adduct.into());
    }

    pub fn peaks(&self) -> &PeakSet {
        &self.peaks
    }

    /// Companion adducts seen alongside the annotation's own ion
    pub fn detected_adducts(&self) -> &BTreeSet<String> {
        &self.detected_adducts
    }

    /// Record a companion adduct. Returns `false` if it had already been recorded.
    pub fn add_detected_adduct(&mut self, adduct: impl Into<String>) -> bool {
        self.detected_adducts.insert(adduct.into())
    }

    /// The neutral monoisotopic mass implied by the measured m/z and the current adduct
    pub fn neutral_mass(&self) -> Result<f64, AdductError> {
        try_monoisotopic_mass_from_mz(Some(self.mz), self.adduct())
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn comparisons_applied(&self) -> u32 {
        self.comparisons_applied
    }

    /// Overwrite the running score, bypassing the accumulator. Used to seed a
    /// score from an earlier run.
    pub fn set_score(&mut self, score: i32) {
        self.score = score;
        self.score_assigned = true;
    }

    pub fn is_score_assigned(&self) -> bool {
        self.score_assigned
    }

    pub fn has_been_scored(&self) -> bool {
        self.has_been_scored
    }

    pub fn set_has_been_scored(&mut self, has_been_scored: bool) {
        self.has_been_scored = has_been_scored;
    }

    /// Whether any comparison has touched this annotation's score
    pub fn score_already_set(&self) -> bool {
        self.comparisons_applied > 0 || self.score != 0
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.mz.total_cmp(&other.mz).is_eq()
            && self.rt_min.total_cmp(&other.rt_min).is_eq()
            && self.lipid == other.lipid
    }
}

impl Eq for Annotation {}

impl Hash for Annotation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lipid.hash(state);
        state.write_u64(self.mz.to_bits());
        state.write_u64(self.rt_min.to_bits());
    }
}

impl Display for Annotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Annotation({}, mz={:.4}, RT={:.2}, adduct={}, intensity={:.1}, score={})",
            self.lipid.name,
            self.mz,
            self.rt_min,
            self.adduct().unwrap_or("None"),
            self.intensity,
            self.score
        )
    }
}
