//! Batch enrichment pipeline and record merge for tokentint.

pub mod merge;
pub mod pipeline;

pub use merge::merge_colors;
pub use pipeline::{EnrichConfig, EnrichResult, ProgressReporter, SilentProgress, enrich_list};
