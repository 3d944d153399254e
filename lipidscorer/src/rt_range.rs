use std::{num::ParseFloatError, ops::Range, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A closed retention time interval in minutes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RtRange {
    pub start: f64,
    pub end: f64,
}

impl RtRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, rt: f64) -> bool {
        self.start <= rt && rt <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

impl Default for RtRange {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: f64::INFINITY,
        }
    }
}

#[derive(Debug, Error)]
pub enum RtRangeParseError {
    #[error("Failed to parse retention time range start {0}")]
    MalformedStart(#[source] ParseFloatError),
    #[error("Failed to parse retention time range end {0}")]
    MalformedEnd(#[source] ParseFloatError),
}

impl FromStr for RtRange {
    type Err = RtRangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = if s.contains(' ') {
            s.split(' ')
        } else if s.contains(':') {
            s.split(':')
        } else if s.contains('-') {
            s.split('-')
        } else {
            s.split(' ')
        };
        let start = match tokens.next().map(str::trim) {
            None | Some("") => 0.0,
            Some(val) => val.parse().map_err(RtRangeParseError::MalformedStart)?,
        };
        let end = match tokens.next().map(str::trim) {
            None | Some("") => f64::INFINITY,
            Some(val) => val.parse().map_err(RtRangeParseError::MalformedEnd)?,
        };
        Ok(RtRange { start, end })
    }
}

impl From<Range<f64>> for RtRange {
    fn from(value: Range<f64>) -> Self {
        Self::new(value.start, value.end)
    }
}

impl From<(f64, f64)> for RtRange {
    fn from(value: (f64, f64)) -> Self {
        Self::new(value.0, value.1)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rt_range_fromstr() -> Result<(), RtRangeParseError> {
        let t: RtRange = "5.5-".parse()?;
        assert_eq!(t.start, 5.5);
        assert_eq!(t.end, f64::INFINITY);

        let t: RtRange = "-12.0".parse()?;
        assert_eq!(t.start, 0.0);
        assert_eq!(t.end, 12.0);

        let t: RtRange = "9:11".parse()?;
        assert_eq!(t, RtRange::new(9.0, 11.0));

        let t: RtRange = "-".parse()?;
        assert_eq!(t, RtRange::default());

        let t: RtRange = "7".parse()?;
        assert_eq!(t, RtRange::new(7.0, f64::INFINITY));
        Ok(())
    }

    #[test]
    fn test_rt_range_fromstr_malformed() {
        assert!(matches!(
            "a-".parse::<RtRange>(),
            Err(RtRangeParseError::MalformedStart(_))
        ));
        assert!(matches!(
            "-b".parse::<RtRange>(),
            Err(RtRangeParseError::MalformedEnd(_))
        ));
        // Both ends are bad, the start is reported
        assert!(matches!(
            "a-b".parse::<RtRange>(),
            Err(RtRangeParseError::MalformedStart(_))
        ));
    }

    #[test]
    fn test_contains() {
        let t = RtRange::new(9.5, 12.0);
        assert!(t.contains(10.0));
        assert!(t.contains(12.0));
        assert!(!t.contains(9.0));
        assert!(!t.is_empty());
        assert!(RtRange::new(12.0, 9.5).is_empty());
    }
}
