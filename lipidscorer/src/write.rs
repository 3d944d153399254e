use std::io;

use serde::{Deserialize, Serialize};
use tracing::warn;

use lipidscore::{Annotation, LipidClass, ScoreAccumulator};

/// The outcome of an analysis for one annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationReport {
    pub name: String,
    pub lipid_class: LipidClass,
    pub mz: f64,
    pub rt_min: f64,
    pub adduct: Option<String>,
    pub detected_adducts: Vec<String>,
    /// The neutral mass under `adduct`, if it is a known adduct
    pub neutral_mass: Option<f64>,
    pub score: i32,
    pub comparisons_applied: u32,
    pub normalized_score: f64,
}

impl From<&Annotation> for AnnotationReport {
    fn from(value: &Annotation) -> Self {
        let neutral_mass = match (value.adduct(), value.neutral_mass()) {
            (_, Ok(mass)) => Some(mass),
            (None, Err(_)) => None,
            (Some(_), Err(e)) => {
                warn!("Cannot compute the neutral mass of {value}: {e}");
                None
            }
        };
        Self {
            name: value.lipid().name.clone(),
            lipid_class: value.lipid().lipid_class,
            mz: value.mz(),
            rt_min: value.rt_min(),
            adduct: value.adduct().map(str::to_string),
            detected_adducts: value.detected_adducts().iter().cloned().collect(),
            neutral_mass,
            score: value.score(),
            comparisons_applied: value.comparisons_applied(),
            normalized_score: value.normalized_score(),
        }
    }
}

/// Write one [`AnnotationReport`] per annotation as a JSON array
pub fn write_reports<W: io::Write>(
    mut writer: W,
    annotations: &[Annotation],
) -> io::Result<()> {
    let reports: Vec<AnnotationReport> = annotations.iter().map(AnnotationReport::from).collect();
    serde_json::to_writer_pretty(&mut writer, &reports)?;
    writeln!(writer)?;
    writer.flush()
}
