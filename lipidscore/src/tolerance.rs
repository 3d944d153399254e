//! Mass accuracy arithmetic in parts-per-million.
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Scale factor between a relative error and parts-per-million
pub const PPM_SCALE: f64 = 1_000_000.0;

/// An error that might occur while comparing masses
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ToleranceError {
    #[error("Cannot compute a relative mass error against a theoretical mass of zero")]
    ZeroTheoreticalMass,
}

/// The absolute error between `experimental_mass` and `theoretical_mass` in ppm,
/// rounded to the nearest integer.
///
/// ```math
/// \text{ppm} = \left| \frac{(e - t) \times 10^6}{t} \right|
/// ```
///
/// # Errors
/// A `theoretical_mass` of exactly zero is a contract violation by the caller and
/// is reported as [`ToleranceError::ZeroTheoreticalMass`].
pub fn ppm_error(experimental_mass: f64, theoretical_mass: f64) -> Result<i64, ToleranceError> {
    if theoretical_mass == 0.0 {
        return Err(ToleranceError::ZeroTheoreticalMass);
    }
    let relative = ((experimental_mass - theoretical_mass) * PPM_SCALE / theoretical_mass).abs();
    Ok(relative.round() as i64)
}

/// Convert a `ppm` tolerance into an absolute width in Daltons around `mass`
#[inline]
pub fn ppm_to_absolute_delta(mass: f64, ppm: i32) -> f64 {
    ((mass * ppm as f64) / PPM_SCALE).abs()
}

/// Round `value` to `places` decimal places, with ties going away from zero.
///
/// The rounding is done on the shortest decimal representation of `value` rather
/// than on its binary expansion, so `457.41464999999994` (the nearest double to the
/// intended `457.41465`) is treated the same as the literal `457.41465`.
///
/// Values that have no decimal representation (NaN, infinities, or magnitudes
/// outside of what [`Decimal`] can hold) are returned unchanged.
pub fn round_half_up(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    match Decimal::from_str(&value.to_string()) {
        // Going back through the decimal string keeps the result the nearest double
        Ok(dec) => dec
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
            .to_string()
            .parse()
            .unwrap_or(value),
        Err(_) => value,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ppm_error() {
        assert_eq!(ppm_error(1000.001, 1000.0).unwrap(), 1);
        assert_eq!(ppm_error(999.995, 1000.0).unwrap(), 5);
        assert_eq!(ppm_error(700.5, 700.5).unwrap(), 0);
        assert_eq!(
            ppm_error(700.5, 0.0),
            Err(ToleranceError::ZeroTheoreticalMass)
        );
    }

    #[test]
    fn test_ppm_to_absolute_delta() {
        assert!((ppm_to_absolute_delta(700.5, 5) - 0.0035025).abs() < 1e-12);
        assert!((ppm_to_absolute_delta(-700.5, 5) - 0.0035025).abs() < 1e-12);
        assert_eq!(ppm_to_absolute_delta(700.5, 0), 0.0);
    }

    #[test]
    fn test_round_half_up() {
        let expected = (913.8220 + 1.0073) / 2.0;
        assert_eq!(round_half_up(expected, 5), 457.41465);
        assert_eq!(round_half_up(0.123455, 5), 0.12346);
        assert_eq!(round_half_up(-0.123455, 5), -0.12346);
        assert_eq!(round_half_up(350.75, 5), 350.75);
        assert!(round_half_up(f64::NAN, 5).is_nan());
    }
}
