use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use clap::Parser;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use lipidscore::{rules::ElutionRule, Annotation, ScoringEngine};

use crate::args::{AnalysisConfig, ArgElutionRule};
use crate::input::{read_annotation_records, AnnotationRecord};
use crate::progress::ProgressRecord;
use crate::rt_range::RtRange;
use crate::write::write_reports;

/// The configuration file read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "lipidscorer.toml";

/// The prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "LIPIDSCORER_";

#[derive(Debug, Error)]
pub enum LipidScorerError {
    #[error("An IO error occurred: {0}")]
    IOError(
        #[source]
        #[from]
        io::Error,
    ),
    #[error("Failed to read annotations from {0}: {1}")]
    MalformedInput(String, #[source] serde_json::Error),
    #[error("Failed to load the configuration: {0}")]
    ConfigurationError(
        #[source]
        #[from]
        Box<figment::Error>,
    ),
    #[error("Failed to render the configuration: {0}")]
    ConfigurationRenderError(
        #[source]
        #[from]
        toml::ser::Error,
    ),
    #[error("The retention time range {0}-{1} is empty")]
    EmptyRtRange(f64, f64),
}

impl From<figment::Error> for LipidScorerError {
    fn from(value: figment::Error) -> Self {
        Self::ConfigurationError(Box::new(value))
    }
}

/// Adduct detection and elution order scoring of lipid annotations.
///
/// Read a JSON array of annotations from a file or stream, infer each annotation's
/// adduct from its grouped peaks, score every pair of annotations against elution
/// order rules, and write out a JSON report.
#[derive(Parser, Debug, Deserialize, Serialize)]
#[command(author, version)]
pub struct LipidScorer {
    /// The path to read the input annotations from, or if '-' is passed, read from STDIN
    #[arg()]
    pub input_file: String,

    /// The path to write the report to, or if '-' is passed, write to STDOUT.
    #[arg(short = 'o', long = "output-file", default_value = "-")]
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    /// The path to write a log file to, in addition to STDERR
    #[arg(short = 'l', long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// A TOML configuration file to read additional parameters from.
    ///
    /// Configurations are also read from `lipidscorer.toml` in the working directory.
    /// Environment variables prefixed with `LIPIDSCORER_` will be read too, with `__`
    /// separating nested keys, e.g. `LIPIDSCORER_SCORING__POSITIVE_SCORING_ENABLED`.
    #[arg(long = "config-file")]
    pub config_file: Option<PathBuf>,

    /// The retention time range to process in minutes, denoted (start?)-(stop?)
    #[arg(
        short='r',
        long="rt-range",
        value_parser=RtRange::from_str,
        value_name="BEGIN-END",
        long_help=r#"The retention time range to process in minutes, denoted (start?)-(stop?)

If a start is not specified, processing begins from the start of the run.
If a stop is not specified, processing stops at the end of the run.
"#
    )]
    pub rt_range: Option<RtRange>,

    /// Whether elution order rules that hold reward their predictor, overriding the configuration
    #[arg(short = 'p', long = "positive-scoring", value_name = "BOOL")]
    pub positive_scoring: Option<bool>,

    /// The elution order rules to evaluate, overriding the configuration
    #[arg(long = "rule", value_enum)]
    #[serde(default)]
    pub rules: Vec<ArgElutionRule>,

    /// Print the merged configuration as TOML to STDOUT and exit
    #[arg(long = "print-config")]
    #[serde(default)]
    pub print_config: bool,

    #[arg(skip)]
    #[serde(flatten)]
    pub analysis: AnalysisConfig,
}

fn default_output_file() -> PathBuf {
    PathBuf::from("-")
}

impl LipidScorer {
    /// Merge the configuration layers over this instance's analysis parameters,
    /// then apply the explicit command line overrides.
    pub fn load_configuration(&self) -> Result<AnalysisConfig, LipidScorerError> {
        let mut figment = Figment::from(Serialized::defaults(&self.analysis))
            .merge(Toml::file(DEFAULT_CONFIG_FILE));
        if let Some(path) = self.config_file.as_ref() {
            debug!("Reading configuration from {}", path.display());
            figment = figment.merge(Toml::file_exact(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        let mut config: AnalysisConfig = figment.extract()?;

        if let Some(positive_scoring) = self.positive_scoring {
            config.scoring.positive_scoring_enabled = positive_scoring;
        }
        if !self.rules.is_empty() {
            config.scoring.rules = self
                .rules
                .iter()
                .copied()
                .map(ElutionRule::from)
                .unique()
                .collect();
        }
        Ok(config)
    }

    pub fn main(&self) -> Result<(), LipidScorerError> {
        let config = self.load_configuration()?;
        if self.print_config {
            let text = toml::to_string(&config)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            return Ok(());
        }

        info!(
            "lipidscorer v{}",
            option_env!("CARGO_PKG_VERSION").unwrap_or("unknown")
        );
        info!("Input: {}", self.input_file);
        info!("Output: {}", self.output_file.display());
        info!(
            "Rules: {} (positive scoring {})",
            config.scoring.rules.iter().join(", "),
            if config.scoring.positive_scoring_enabled {
                "enabled"
            } else {
                "disabled"
            }
        );

        let rt_range = self.rt_range.unwrap_or_default();
        if rt_range.is_empty() {
            return Err(LipidScorerError::EmptyRtRange(rt_range.start, rt_range.end));
        }

        let start = Instant::now();
        let records = self.read_input()?;
        let (mut annotations, out_of_range) = select_annotations(records, &rt_range);

        let engine = ScoringEngine::new(config.detection, config.scoring);
        let summary = engine.process(&mut annotations);
        let prog = ProgressRecord::from(&summary)
            + ProgressRecord {
                out_of_range,
                ..Default::default()
            };

        info!("Annotations: {}", prog.annotations);
        if prog.out_of_range > 0 {
            info!("Out of Range: {}", prog.out_of_range);
        }
        info!(
            "Companions Detected: {} | Defaulted: {} | Preassigned: {}",
            prog.companions_detected, prog.defaulted, prog.preassigned
        );
        if prog.without_peaks > 0 {
            warn!("{} annotations had no peaks and no adduct", prog.without_peaks);
        }
        info!(
            "Rule Firings: {} | Penalties: {}",
            prog.rule_firings, prog.penalties
        );

        self.write_output(&annotations)?;
        info!("Elapsed Time: {:0.3?}", start.elapsed());
        Ok(())
    }

    fn read_input(&self) -> Result<Vec<AnnotationRecord>, LipidScorerError> {
        let records = if self.input_file == "-" {
            read_annotation_records(io::stdin().lock())
        } else {
            read_annotation_records(fs::File::open(&self.input_file)?)
        };
        records.map_err(|e| LipidScorerError::MalformedInput(self.input_file.clone(), e))
    }

    fn write_output(&self, annotations: &[Annotation]) -> io::Result<()> {
        if self.output_file == PathBuf::from("-") {
            write_reports(io::stdout().lock(), annotations)
        } else {
            let handle = io::BufWriter::new(fs::File::create(&self.output_file)?);
            write_reports(handle, annotations)
        }
    }
}

/// Convert the records that fall within `rt_range` into annotations, counting
/// those that don't.
fn select_annotations(
    records: Vec<AnnotationRecord>,
    rt_range: &RtRange,
) -> (Vec<Annotation>, usize) {
    let total = records.len();
    let annotations: Vec<Annotation> = records
        .into_iter()
        .filter(|rec| rt_range.contains(rec.rt_min))
        .map(Annotation::from)
        .collect();
    let out_of_range = total - annotations.len();
    (annotations, out_of_range)
}
