//! Centroided peaks grouped with an annotation.
use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::slice;

use mzpeaks::{prelude::*, CentroidPeak, MZ};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single peak. Two peaks are the same peak when their m/z are equal,
/// regardless of intensity, and peaks are ordered by ascending m/z.
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Peak {
    pub mz: f64,
    pub intensity: f64,
}

impl Peak {
    pub const fn new(mz: f64, intensity: f64) -> Self {
        Self { mz, intensity }
    }

    #[inline]
    pub fn mz(&self) -> f64 {
        self.mz
    }

    #[inline]
    pub fn intensity(&self) -> f64 {
        self.intensity
    }
}

impl PartialEq for Peak {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Peak {}

impl PartialOrd for Peak {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Peak {
    fn cmp(&self, other: &Self) -> Ordering {
        self.mz.total_cmp(&other.mz)
    }
}

impl Hash for Peak {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.mz.to_bits())
    }
}

impl Display for Peak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Peak(mz={:.4}, intensity={:.2})", self.mz, self.intensity)
    }
}

impl CoordinateLike<MZ> for Peak {
    fn coordinate(&self) -> f64 {
        self.mz
    }
}

impl IntensityMeasurement for Peak {
    fn intensity(&self) -> f32 {
        self.intensity as f32
    }
}

impl From<CentroidPeak> for Peak {
    fn from(value: CentroidPeak) -> Self {
        Self::new(value.mz, value.intensity as f64)
    }
}

impl From<Peak> for CentroidPeak {
    fn from(value: Peak) -> Self {
        CentroidPeak::new(value.mz, value.intensity as f32, 0)
    }
}

impl From<(f64, f64)> for Peak {
    fn from((mz, intensity): (f64, f64)) -> Self {
        Self::new(mz, intensity)
    }
}

/// An immutable set of [`Peak`] kept in ascending m/z order with at most
/// one peak per m/z.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Peak>", into = "Vec<Peak>"))]
pub struct PeakSet {
    peaks: Vec<Peak>,
}

impl PeakSet {
    /// Build a peak set from arbitrarily ordered peaks. When several peaks share an
    /// m/z, only the first one given is kept.
    pub fn new(mut peaks: Vec<Peak>) -> Self {
        peaks.sort();
        let before = peaks.len();
        peaks.dedup();
        if peaks.len() != before {
            tracing::warn!(
                "Dropped {} peaks with a duplicated m/z",
                before - peaks.len()
            );
        }
        Self { peaks }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Peak> {
        self.peaks.iter()
    }

    pub fn as_slice(&self) -> &[Peak] {
        &self.peaks
    }

    /// The peak with the greatest m/z
    pub fn highest_mz(&self) -> Option<&Peak> {
        self.peaks.last()
    }
}

impl Index<usize> for PeakSet {
    type Output = Peak;

    fn index(&self, index: usize) -> &Self::Output {
        &self.peaks[index]
    }
}

impl FromIterator<Peak> for PeakSet {
    fn from_iter<T: IntoIterator<Item = Peak>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Peak>> for PeakSet {
    fn from(value: Vec<Peak>) -> Self {
        Self::new(value)
    }
}

impl From<PeakSet> for Vec<Peak> {
    fn from(value: PeakSet) -> Self {
        value.peaks
    }
}

impl<'a> IntoIterator for &'a PeakSet {
    type Item = &'a Peak;
    type IntoIter = slice::Iter<'a, Peak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.iter()
    }
}

impl IntoIterator for PeakSet {
    type Item = Peak;
    type IntoIter = std::vec::IntoIter<Peak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.into_iter()
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_identity_by_mz() {
        let a = Peak::new(700.5, 100000.0);
        let b = Peak::new(700.5, 1.0);
        let c = Peak::new(722.482, 100000.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);

        let set: HashSet<Peak> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(a.to_string(), "Peak(mz=700.5000, intensity=100000.00)");
    }

    #[test]
    fn test_peak_set_order() {
        let peaks: PeakSet = vec![
            Peak::new(722.482, 80000.0),
            Peak::new(700.5, 100000.0),
            Peak::new(700.5, 5.0),
            Peak::new(350.75, 95000.0),
        ]
        .into();
        assert_eq!(peaks.len(), 3);
        let mzs: Vec<f64> = peaks.iter().map(|p| p.mz).collect();
        assert_eq!(mzs, vec![350.75, 700.5, 722.482]);
        // The first peak given for a duplicated m/z is kept
        assert_eq!(peaks[1].intensity, 100000.0);
        assert_eq!(peaks.highest_mz().unwrap().mz, 722.482);
        assert!(PeakSet::empty().highest_mz().is_none());
    }

    #[test]
    fn test_mzpeaks_interop() {
        let peak = Peak::new(885.79056, 1e6);
        assert_eq!(CoordinateLike::<MZ>::coordinate(&peak), 885.79056);
        assert_eq!(IntensityMeasurement::intensity(&peak), 1e6f32);
        let centroid: CentroidPeak = peak.into();
        assert_eq!(centroid.mz, 885.79056);
        let back: Peak = centroid.into();
        assert_eq!(back, peak);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_peak_set_deserialize_sorts() {
        let peaks: PeakSet = serde_json::from_str(
            r#"[{"mz": 722.482, "intensity": 80000.0}, {"mz": 700.5, "intensity": 100000.0}]"#,
        )
        .unwrap();
        assert_eq!(peaks[0].mz, 700.5);
        let text = serde_json::to_string(&peaks).unwrap();
        assert!(text.starts_with(r#"[{"mz":700.5,"#));
    }
}
