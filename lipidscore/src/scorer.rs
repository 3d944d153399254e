//! Score accumulation over pairwise comparisons
use crate::annotation::Annotation;

/// The type of a normalized score
pub type ScoreType = f64;

/// Running score state fed by the outcomes of pairwise comparisons.
///
/// Every call counts as exactly one applied comparison, whatever its effect on the
/// score, and no call can move the score by more than one.
///
/// The normalized score is the mean score per applied comparison,
///
/// ```math
/// \text{normalized} = \begin{cases}
///     0 & \text{if } n = 0,\\
///     \max\left(-1, \min\left(1, \frac{s}{n}\right)\right) & \text{otherwise}
/// \end{cases}
/// ```
///
/// where $`s`$ is the running score and $`n`$ the number of comparisons applied.
pub trait ScoreAccumulator {
    fn score(&self) -> i32;

    fn comparisons_applied(&self) -> u32;

    /// Add `delta`, clamped to `[-1, 1]`, to the score, and count one comparison.
    fn add_score(&mut self, delta: i32);

    /// Count a comparison this accumulator won
    fn win_comparison(&mut self) {
        self.add_score(1)
    }

    /// Count a comparison this accumulator lost. A loss leaves the score unchanged.
    fn lose_comparison(&mut self) {
        self.add_score(0)
    }

    fn normalized_score(&self) -> ScoreType {
        let n = self.comparisons_applied();
        if n == 0 {
            return 0.0;
        }
        (self.score() as ScoreType / n as ScoreType).clamp(-1.0, 1.0)
    }
}

impl ScoreAccumulator for Annotation {
    #[inline]
    fn score(&self) -> i32 {
        self.score
    }

    #[inline]
    fn comparisons_applied(&self) -> u32 {
        self.comparisons_applied
    }

    fn add_score(&mut self, delta: i32) {
        self.score = self.score.saturating_add(delta.clamp(-1, 1));
        self.comparisons_applied = self.comparisons_applied.saturating_add(1);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lipid::{IonizationMode, Lipid, LipidClass};

    fn annotation() -> Annotation {
        let lipid = Lipid::new(1, "TG 54:3", "C57H104O6", LipidClass::TG, 54, 3);
        Annotation::without_peaks(lipid, 885.79056, 1e6, 10.0, IonizationMode::Positive)
    }

    #[test]
    fn test_win_lose() {
        let mut a = annotation();
        assert_eq!(a.normalized_score(), 0.0);
        a.win_comparison();
        a.win_comparison();
        a.lose_comparison();
        assert_eq!(ScoreAccumulator::score(&a), 2);
        assert_eq!(ScoreAccumulator::comparisons_applied(&a), 3);
        assert!((a.normalized_score() - 2.0 / 3.0).abs() < 1e-12);
        assert!(a.score_already_set());
    }

    #[test]
    fn test_add_score_clamps() {
        let mut a = annotation();
        let deltas = [5, -7, 0, 1, -1, i32::MAX, i32::MIN];
        for delta in deltas {
            a.add_score(delta);
        }
        assert_eq!(a.comparisons_applied(), deltas.len() as u32);
        assert_eq!(a.score(), 1 - 1 + 0 + 1 - 1 + 1 - 1);
        let normalized = a.normalized_score();
        assert!((-1.0..=1.0).contains(&normalized));
    }

    #[test]
    fn test_normalized_bounds_with_seeded_score() {
        let mut a = annotation();
        a.set_score(10);
        a.lose_comparison();
        assert_eq!(a.normalized_score(), 1.0);

        let mut a = annotation();
        a.set_score(-10);
        a.add_score(-1);
        assert_eq!(a.normalized_score(), -1.0);
    }

    #[test]
    fn test_add_score_saturates() {
        let mut a = annotation();
        a.set_score(i32::MAX);
        a.win_comparison();
        assert_eq!(a.score(), i32::MAX);
        assert_eq!(a.comparisons_applied(), 1);

        let mut a = annotation();
        a.set_score(i32::MIN);
        a.add_score(-1);
        assert_eq!(a.score(), i32::MIN);
        assert_eq!(a.normalized_score(), -1.0);
    }
}
