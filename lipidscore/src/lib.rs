pub mod tolerance;
pub mod charge;
pub mod adduct;
pub mod peaks;
pub mod deisotope;
pub mod lipid;
pub mod annotation;
pub mod detection;
pub mod elution;
pub mod scorer;
pub mod rules;
pub mod api;

pub use crate::annotation::Annotation;
pub use crate::api::{score_annotations, ScoringEngine, ScoringSummary};
pub use crate::lipid::{IonizationMode, Lipid, LipidClass};
pub use crate::peaks::{Peak, PeakSet};
pub use crate::scorer::ScoreAccumulator;
