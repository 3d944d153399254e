//! Reading multimer count, charge and polarity out of adduct notation.
//!
//! Adducts are written as `[<n>M<modifications>]<z><sign>`, e.g. `[2M+Na]+`,
//! `[M+2H]2+` or `[M-H]−`. Parsing never fails: anything that cannot be read
//! falls back to a single, singly charged molecule.
use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The ASCII hyphen-minus and the Unicode minus sign both denote a negative ion
const MINUS_SIGNS: [char; 2] = ['-', '\u{2212}'];

/// The polarity an ion was observed in
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IonizationMode {
    #[default]
    Positive,
    Negative,
}

impl IonizationMode {
    pub fn is_negative(&self) -> bool {
        matches!(self, Self::Negative)
    }
}

impl Display for IonizationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => f.write_str("positive"),
            Self::Negative => f.write_str("negative"),
        }
    }
}

/// The number of neutral molecules in an ion cluster and the ion's charge magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MultimerCharge {
    pub multimer: u32,
    pub charge: u32,
}

impl MultimerCharge {
    pub const fn new(multimer: u32, charge: u32) -> Self {
        Self { multimer, charge }
    }
}

impl Default for MultimerCharge {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Find the contiguous run of ASCII digits ending closest to the end of `text`
fn rightmost_digit_run(text: &str) -> Option<&str> {
    let end = text.rfind(|c: char| c.is_ascii_digit())? + 1;
    let start = text[..end]
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    Some(&text[start..end])
}

/// Parse a strictly positive count, rejecting zero and overflow
fn parse_count(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|v| *v > 0)
}

fn try_parse_multimer_and_charge(adduct: &str) -> Option<MultimerCharge> {
    let body_and_suffix = adduct.strip_prefix('[')?;
    let close = body_and_suffix.rfind(']')?;
    let body = &body_and_suffix[..close];
    let suffix = &body_and_suffix[close + 1..];

    let multimer = match body.find('M') {
        Some(m_index) if m_index > 0 && body[..m_index].bytes().all(|b| b.is_ascii_digit()) => {
            parse_count(&body[..m_index])?
        }
        _ => 1,
    };

    let charge = match rightmost_digit_run(suffix) {
        Some(digits) => parse_count(digits)?,
        None => 1,
    };

    Some(MultimerCharge::new(multimer, charge))
}

/// Read the multimer count and the charge magnitude from an adduct name.
///
/// The multimer is the digit run immediately before the `M` inside the brackets,
/// and the charge is the rightmost digit run in the charge state that follows the
/// closing bracket. A missing digit run means `1`.
///
/// Names that do not open with `[` or never close it, as well as counts that are
/// zero or do not fit, yield the default of `(1, 1)`.
///
/// ```
/// use lipidscore::charge::{parse_multimer_and_charge, MultimerCharge};
///
/// assert_eq!(parse_multimer_and_charge("[2M+H]+"), MultimerCharge::new(2, 1));
/// assert_eq!(parse_multimer_and_charge("[M+2H]2+"), MultimerCharge::new(1, 2));
/// assert_eq!(parse_multimer_and_charge("garbage"), MultimerCharge::new(1, 1));
/// ```
pub fn parse_multimer_and_charge(adduct: &str) -> MultimerCharge {
    try_parse_multimer_and_charge(adduct).unwrap_or_default()
}

/// The ionization polarity implied by an adduct name. Any minus sign makes it
/// negative, and an absent name is treated as positive.
pub fn ionization_polarity(adduct: Option<&str>) -> IonizationMode {
    match adduct {
        Some(name) if name.contains(&MINUS_SIGNS[..]) => IonizationMode::Negative,
        _ => IonizationMode::Positive,
    }
}
