//! * High level APIs for running adduct detection and elution order scoring
use crate::{
    annotation::Annotation,
    detection::{AdductDetector, DetectionOutcome, DetectionParams},
    rules::{RuleEvaluator, RuleOutcomes},
};

pub use crate::rules::ScoringParams;

/// Counts of how adduct detection went over a collection of annotations
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DetectionSummary {
    /// Annotations whose reference ion had a recognized companion
    pub matched: usize,
    /// Annotations that fell back to the default adduct
    pub defaulted: usize,
    /// Annotations without peaks, left untouched
    pub no_peaks: usize,
    /// Annotations that already carried an adduct hypothesis and were not examined
    pub preassigned: usize,
}

impl DetectionSummary {
    fn record(&mut self, outcome: &DetectionOutcome) {
        match outcome {
            DetectionOutcome::NoPeaks => self.no_peaks += 1,
            DetectionOutcome::Matched { .. } => self.matched += 1,
            DetectionOutcome::Defaulted { .. } => self.defaulted += 1,
        }
    }
}

/// The result of a complete [`ScoringEngine::process`] run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoringSummary {
    /// The number of annotations processed
    pub annotations: usize,
    pub detection: DetectionSummary,
    pub rule_outcomes: RuleOutcomes,
}

/// Composes [`AdductDetector`] and [`RuleEvaluator`] over a collection of
/// annotations from one analysis run.
///
/// Annotations are first given an adduct from their grouped peaks, and then every
/// pair of them is scored against the enabled elution order rules.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScoringEngine {
    detector: AdductDetector,
    evaluator: RuleEvaluator,
}

impl ScoringEngine {
    /// Create a new [`ScoringEngine`]
    ///
    /// # Arguments
    /// - `detection`: The tolerances used to deisotope peaks and recognize companion ions
    /// - `scoring`: Which elution order rules to evaluate, and whether rules that hold are rewarded
    pub fn new(detection: DetectionParams, scoring: ScoringParams) -> Self {
        Self {
            detector: AdductDetector::new(detection),
            evaluator: RuleEvaluator::new(scoring),
        }
    }

    pub fn detection_params(&self) -> &DetectionParams {
        &self.detector.params
    }

    pub fn scoring_params(&self) -> &ScoringParams {
        &self.evaluator.params
    }

    /// Infer the adduct of each annotation that does not already have one
    pub fn detect_adducts(&self, annotations: &mut [Annotation]) -> DetectionSummary {
        let mut summary = DetectionSummary::default();
        for annotation in annotations.iter_mut() {
            if annotation.adduct().is_some() {
                summary.preassigned += 1;
                continue;
            }
            let outcome = self.detector.detect(annotation);
            summary.record(&outcome);
        }
        summary
    }

    /// Score every pair of annotations against the enabled rules
    pub fn score(&self, annotations: &mut [Annotation]) -> RuleOutcomes {
        self.evaluator.evaluate(annotations)
    }

    /// Run adduct detection, then score.
    ///
    /// # See also
    /// [`ScoringEngine::detect_adducts`] and [`ScoringEngine::score`]
    pub fn process(&self, annotations: &mut [Annotation]) -> ScoringSummary {
        let detection = self.detect_adducts(annotations);
        let rule_outcomes = self.score(annotations);
        ScoringSummary {
            annotations: annotations.len(),
            detection,
            rule_outcomes,
        }
    }
}

/// A single-shot detection and scoring run over `annotations` with the default
/// [`DetectionParams`].
///
/// Internally, this function creates a [`ScoringEngine`] and calls [`ScoringEngine::process`].
pub fn score_annotations(annotations: &mut [Annotation], params: ScoringParams) -> ScoringSummary {
    ScoringEngine::new(DetectionParams::default(), params).process(annotations)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lipid::{IonizationMode, Lipid, LipidClass};
    use crate::peaks::Peak;
    use crate::scorer::ScoreAccumulator;

    macro_rules! assert_is_close {
        ($t1:expr, $t2:expr, $tol:expr, $label:literal) => {
            assert!(
                ($t1 - $t2).abs() < $tol,
                "Observed {} {}, expected {}, difference {}",
                $label,
                $t1,
                $t2,
                $t1 - $t2,
            );
        };
    }

    fn triacylglycerols() -> Vec<Annotation> {
        let lipid1 = Lipid::new(1, "TG 54:3", "C57H104O6", LipidClass::TG, 54, 3);
        let lipid2 = Lipid::new(2, "TG 52:3", "C55H100O6", LipidClass::TG, 52, 3);
        let lipid3 = Lipid::new(3, "TG 56:3", "C59H108O6", LipidClass::TG, 56, 3);
        vec![
            Annotation::new(
                lipid1,
                885.79056,
                1.0e6,
                10.0,
                IonizationMode::Positive,
                vec![Peak::new(885.79056, 1.0e6), Peak::new(907.77306, 0.8e6)],
            ),
            Annotation::new(
                lipid2,
                857.7593,
                1.0e7,
                9.0,
                IonizationMode::Positive,
                vec![Peak::new(857.7593, 1.0e7), Peak::new(839.7487, 0.5e7)],
            ),
            Annotation::new(
                lipid3,
                913.8220,
                1.5e5,
                11.0,
                IonizationMode::Positive,
                vec![Peak::new(913.8220, 1.0e5), Peak::new(457.41465, 0.5e5)],
            ),
        ]
    }

    #[test_log::test]
    fn test_process() {
        let mut annotations = triacylglycerols();
        let summary = score_annotations(&mut annotations, ScoringParams::default());
        assert_eq!(summary.annotations, 3);
        assert_eq!(summary.detection.matched, 3);
        assert_eq!(summary.detection.defaulted, 0);
        assert_eq!(summary.rule_outcomes.rewarded, 3);

        let detected: Vec<Vec<&str>> = annotations
            .iter()
            .map(|a| a.detected_adducts().iter().map(|s| s.as_str()).collect())
            .collect();
        assert_eq!(
            detected,
            vec![vec!["[M+Na]+"], vec!["[M+H-H2O]+"], vec!["[M+2H]2+"]]
        );
        assert!(annotations.iter().all(|a| a.adduct() == Some("[M+H]+")));

        assert_is_close!(annotations[0].normalized_score(), 0.5, 1e-9, "A1 normalized");
        assert_is_close!(annotations[1].normalized_score(), 0.0, 1e-9, "A2 normalized");
        assert_is_close!(annotations[2].normalized_score(), 1.0, 1e-9, "A3 normalized");
    }

    #[test]
    fn test_preassigned_adduct_kept() {
        let mut annotations = triacylglycerols();
        annotations[0].set_adduct("[M+NH4]+");
        let engine = ScoringEngine::new(
            DetectionParams::default(),
            ScoringParams {
                positive_scoring_enabled: false,
                rules: vec![],
            },
        );
        let summary = engine.process(&mut annotations);
        assert_eq!(summary.detection.preassigned, 1);
        assert_eq!(summary.detection.matched, 2);
        assert_eq!(summary.rule_outcomes.fired(), 0);
        assert_eq!(annotations[0].adduct(), Some("[M+NH4]+"));
        assert!(annotations[0].detected_adducts().is_empty());
        assert!(annotations.iter().all(|a| a.has_been_scored()));
    }
}
