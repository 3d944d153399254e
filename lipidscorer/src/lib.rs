mod args;
mod driver;
mod input;
mod progress;
mod rt_range;
mod write;

pub use args::*;
pub use driver::{LipidScorer, LipidScorerError, DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use input::{read_annotation_records, AnnotationRecord};
pub use progress::ProgressRecord;
pub use rt_range::{RtRange, RtRangeParseError};
pub use write::{write_reports, AnnotationReport};
