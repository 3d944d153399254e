use std::fmt::Display;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use lipidscore::{
    detection::DetectionParams,
    rules::{ElutionRule, ScoringParams},
};

/// The elution order rules selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgElutionRule {
    /// Within a class and unsaturation, more carbons elute later
    CarbonCount,
    /// Within a class and chain length, more double bonds elute earlier
    DoubleBonds,
    /// Within a chain length and unsaturation, classes elute in a fixed order
    LipidClass,
}

impl From<ArgElutionRule> for ElutionRule {
    fn from(value: ArgElutionRule) -> Self {
        match value {
            ArgElutionRule::CarbonCount => ElutionRule::CarbonCount,
            ArgElutionRule::DoubleBonds => ElutionRule::DoubleBonds,
            ArgElutionRule::LipidClass => ElutionRule::LipidClass,
        }
    }
}

impl Display for ArgElutionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ElutionRule::from(*self).fmt(f)
    }
}

/// The parameters of an analysis, assembled from defaults, configuration files and
/// the environment
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub detection: DetectionParams,
    pub scoring: ScoringParams,
}

impl AnalysisConfig {
    pub fn new(detection: DetectionParams, scoring: ScoringParams) -> Self {
        Self { detection, scoring }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_config_toml() {
        let config = AnalysisConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("[detection]"));
        assert!(text.contains("deisotope_ppm = 5"));
        assert!(text.contains("positive_scoring_enabled = true"));
        assert!(text.contains(r#"rules = ["carbon-count", "double-bonds", "lipid-class"]"#));

        let parsed: AnalysisConfig = toml::from_str(
            r#"
            [scoring]
            rules = ["lipid-class"]
            "#,
        )
        .unwrap();
        assert_eq!(parsed.detection, DetectionParams::default());
        assert_eq!(parsed.scoring.rules, vec![ElutionRule::LipidClass]);
        assert!(parsed.scoring.positive_scoring_enabled);
    }
}
