use std::ops::{Add, AddAssign};

use lipidscore::ScoringSummary;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ProgressRecord {
    pub annotations: usize,
    pub out_of_range: usize,
    pub companions_detected: usize,
    pub defaulted: usize,
    pub preassigned: usize,
    pub without_peaks: usize,
    pub rule_firings: usize,
    pub penalties: usize,
}

impl From<&ScoringSummary> for ProgressRecord {
    fn from(value: &ScoringSummary) -> Self {
        Self {
            annotations: value.annotations,
            out_of_range: 0,
            companions_detected: value.detection.matched,
            defaulted: value.detection.defaulted,
            preassigned: value.detection.preassigned,
            without_peaks: value.detection.no_peaks,
            rule_firings: value.rule_outcomes.fired(),
            penalties: value.rule_outcomes.penalized,
        }
    }
}

impl Add for ProgressRecord {
    type Output = ProgressRecord;

    fn add(self, rhs: Self) -> Self::Output {
        let mut dup = self;
        dup += rhs;
        dup
    }
}

impl AddAssign for ProgressRecord {
    fn add_assign(&mut self, rhs: Self) {
        self.annotations += rhs.annotations;
        self.out_of_range += rhs.out_of_range;
        self.companions_detected += rhs.companions_detected;
        self.defaulted += rhs.defaulted;
        self.preassigned += rhs.preassigned;
        self.without_peaks += rhs.without_peaks;
        self.rule_firings += rhs.rule_firings;
        self.penalties += rhs.penalties;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use lipidscore::{api::DetectionSummary, rules::RuleOutcomes};

    #[test]
    fn test_from_summary() {
        let summary = ScoringSummary {
            annotations: 3,
            detection: DetectionSummary {
                matched: 2,
                defaulted: 1,
                ..Default::default()
            },
            rule_outcomes: RuleOutcomes {
                rewarded: 2,
                penalized: 1,
            },
        };
        let prog = ProgressRecord::from(&summary)
            + ProgressRecord {
                out_of_range: 4,
                ..Default::default()
            };
        assert_eq!(prog.annotations, 3);
        assert_eq!(prog.out_of_range, 4);
        assert_eq!(prog.companions_detected, 2);
        // One firing per rule and pair, not one per accumulator call
        assert_eq!(prog.rule_firings, 3);
        assert_eq!(prog.penalties, 1);
    }
}
