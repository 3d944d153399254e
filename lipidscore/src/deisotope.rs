//! Removal of ¹³C isotope peaks from a peak set.
use tracing::trace;

use crate::peaks::{Peak, PeakSet};
use crate::tolerance::ppm_to_absolute_delta;

/// The mass difference between ¹³C and ¹²C
pub const ISOTOPE_SPACING: f64 = 1.00335;

/// Remove isotope-labelled peaks from `peaks`.
///
/// A peak is dropped when some heavier peak lies one [`ISOTOPE_SPACING`] above it,
/// within `ppm_tolerance` of the lighter peak's m/z, and is less intense than it.
/// Each peak is only tested as the lighter member of a pair, and the scan for a
/// peak stops at its first match. Whether a heavier peak is itself dropped has no
/// bearing on its use as a partner, so in a chain of decreasing intensity only the
/// heaviest peak remains.
///
/// The returned set preserves the ascending m/z order of the input.
pub fn deisotope(peaks: &PeakSet, ppm_tolerance: i32) -> PeakSet {
    peaks
        .iter()
        .enumerate()
        .filter(|(i, current)| {
            isotope_partner(&peaks.as_slice()[i + 1..], current, ppm_tolerance)
                .inspect(|partner| trace!("{current} is an isotope peak paired with {partner}"))
                .is_none()
        })
        .map(|(_, peak)| *peak)
        .collect()
}

/// The first peak in `later` that marks `current` as an isotope peak
fn isotope_partner<'a>(later: &'a [Peak], current: &Peak, ppm_tolerance: i32) -> Option<&'a Peak> {
    let allowed = ppm_to_absolute_delta(current.mz, ppm_tolerance);
    let upper = current.mz + ISOTOPE_SPACING + allowed;
    later
        .iter()
        .take_while(|candidate| candidate.mz <= upper)
        .find(|candidate| is_isotope_pair(current, candidate, allowed))
}

#[inline]
fn is_isotope_pair(current: &Peak, candidate: &Peak, allowed: f64) -> bool {
    let delta_mz = candidate.mz - current.mz;
    (delta_mz - ISOTOPE_SPACING).abs() <= allowed && candidate.intensity < current.intensity
}
