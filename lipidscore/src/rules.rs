//! Pairwise elution order rules and their evaluation over a set of annotations.
//!
//! Each [`ElutionRule`] relates two annotations that differ in exactly one
//! structural property. The member with the larger value of that property is the
//! rule's *predictor*: it is expected to elute later (more carbons, a later eluting
//! class) or earlier (more double bonds) than the other member. A [`RuleEvaluator`]
//! turns each rule's verdict into [`ScoreAccumulator`] calls.
use std::cmp::Ordering;
use std::fmt::Display;
use std::ops::{Add, AddAssign};

use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::annotation::Annotation;
use crate::elution::{
    compare_lipid_class_elution_order, violates_carbon_elution_order,
    violates_double_bond_elution_order, violates_lipid_class_elution_order,
};
use crate::scorer::ScoreAccumulator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ElutionRule {
    /// Within a class and unsaturation, more carbons elute later
    CarbonCount,
    /// Within a class and chain length, more double bonds elute earlier
    DoubleBonds,
    /// Within a chain length and unsaturation, classes elute in a fixed order
    LipidClass,
}

impl ElutionRule {
    pub const ALL: [ElutionRule; 3] = [Self::CarbonCount, Self::DoubleBonds, Self::LipidClass];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::CarbonCount => "carbon-count",
            Self::DoubleBonds => "double-bonds",
            Self::LipidClass => "lipid-class",
        }
    }

    /// Which member of the pair, if either, this rule relates to the other
    fn predictor(&self, a: &Annotation, b: &Annotation) -> Option<Member> {
        let (la, lb) = (a.lipid(), b.lipid());
        let ordering = match self {
            Self::CarbonCount => {
                if la.lipid_class != lb.lipid_class || la.double_bond_count != lb.double_bond_count {
                    return None;
                }
                la.carbon_count.cmp(&lb.carbon_count)
            }
            Self::DoubleBonds => {
                if la.lipid_class != lb.lipid_class || la.carbon_count != lb.carbon_count {
                    return None;
                }
                la.double_bond_count.cmp(&lb.double_bond_count)
            }
            Self::LipidClass => {
                if la.carbon_count != lb.carbon_count || la.double_bond_count != lb.double_bond_count {
                    return None;
                }
                compare_lipid_class_elution_order(la.lipid_class, lb.lipid_class)
            }
        };
        match ordering {
            Ordering::Greater => Some(Member::First),
            Ordering::Less => Some(Member::Second),
            Ordering::Equal => None,
        }
    }

    fn violated_by(&self, predictor: &Annotation, other: &Annotation) -> bool {
        let (lp, lo) = (predictor.lipid(), other.lipid());
        let (rp, ro) = (predictor.rt_min(), other.rt_min());
        match self {
            Self::CarbonCount => violates_carbon_elution_order(lp, rp, lo, ro),
            Self::DoubleBonds => violates_double_bond_elution_order(lp, rp, lo, ro),
            Self::LipidClass => violates_lipid_class_elution_order(lp, rp, lo, ro),
        }
    }

    /// Judge whether the retention times of `a` and `b` agree with this rule.
    ///
    /// A pair the rule does not relate, or whose retention times are identical, is
    /// [`Verdict::NotApplicable`].
    pub fn judge(&self, a: &Annotation, b: &Annotation) -> Verdict {
        if a.rt_min() == b.rt_min() {
            return Verdict::NotApplicable;
        }
        let Some(predictor) = self.predictor(a, b) else {
            return Verdict::NotApplicable;
        };
        let (p, o) = match predictor {
            Member::First => (a, b),
            Member::Second => (b, a),
        };
        if self.violated_by(p, o) {
            Verdict::Violated(predictor)
        } else {
            Verdict::Consistent(predictor)
        }
    }
}

impl Display for ElutionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One member of a pair of annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Member {
    First,
    Second,
}

/// The outcome of applying an [`ElutionRule`] to a pair, naming the predictor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    NotApplicable,
    Consistent(Member),
    Violated(Member),
}

/// Parameters controlling which rules are evaluated and how
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoringParams {
    /// Whether rules that hold reward their predictor. Violated rules are always
    /// penalized.
    pub positive_scoring_enabled: bool,
    pub rules: Vec<ElutionRule>,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            positive_scoring_enabled: true,
            rules: ElutionRule::ALL.to_vec(),
        }
    }
}

/// A tally of the rule verdicts that led to score changes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RuleOutcomes {
    /// Rules that held and rewarded their predictor
    pub rewarded: usize,
    /// Rules that were violated and penalized their predictor
    pub penalized: usize,
}

impl RuleOutcomes {
    /// The number of rule firings, each of which is one comparison per member
    pub fn fired(&self) -> usize {
        self.rewarded + self.penalized
    }
}

impl Add for RuleOutcomes {
    type Output = RuleOutcomes;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            rewarded: self.rewarded + rhs.rewarded,
            penalized: self.penalized + rhs.penalized,
        }
    }
}

impl AddAssign for RuleOutcomes {
    fn add_assign(&mut self, rhs: Self) {
        self.rewarded += rhs.rewarded;
        self.penalized += rhs.penalized;
    }
}

/// Applies [`ElutionRule`]s to every pair of annotations and scores them.
///
/// When a rule is violated, its predictor is penalized with `add_score(-1)` and the
/// other member loses the comparison. When a rule holds and positive scoring is
/// enabled, the predictor wins the comparison and the other member loses it.
/// Otherwise neither member is touched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RuleEvaluator {
    pub params: ScoringParams,
}

impl RuleEvaluator {
    pub fn new(params: ScoringParams) -> Self {
        Self { params }
    }

    /// Apply every enabled rule once to `a` and `b`
    pub fn evaluate_pair(&self, a: &mut Annotation, b: &mut Annotation) -> RuleOutcomes {
        let mut outcomes = RuleOutcomes::default();
        for rule in self.params.rules.iter() {
            let verdict = rule.judge(a, b);
            let (predictor, other, violated) = match verdict {
                Verdict::NotApplicable => continue,
                Verdict::Consistent(_) if !self.params.positive_scoring_enabled => continue,
                Verdict::Consistent(Member::First) => (&mut *a, &mut *b, false),
                Verdict::Consistent(Member::Second) => (&mut *b, &mut *a, false),
                Verdict::Violated(Member::First) => (&mut *a, &mut *b, true),
                Verdict::Violated(Member::Second) => (&mut *b, &mut *a, true),
            };
            if violated {
                trace!("{rule} violated by {predictor} against {other}");
                predictor.add_score(-1);
                outcomes.penalized += 1;
            } else {
                trace!("{rule} holds for {predictor} against {other}");
                predictor.win_comparison();
                outcomes.rewarded += 1;
            }
            other.lose_comparison();
        }
        outcomes
    }

    /// Apply every enabled rule once to each unordered pair in `annotations`, then
    /// mark every annotation as scored.
    pub fn evaluate(&self, annotations: &mut [Annotation]) -> RuleOutcomes {
        let mut outcomes = RuleOutcomes::default();
        for j in 1..annotations.len() {
            let (head, tail) = annotations.split_at_mut(j);
            let b = &mut tail[0];
            for a in head.iter_mut() {
                outcomes += self.evaluate_pair(a, b);
            }
        }
        for annotation in annotations.iter_mut() {
            annotation.set_has_been_scored(true);
        }
        outcomes
    }
}
