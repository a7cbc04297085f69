mod coverage_record;
mod coverage_result;
mod run_summary;

pub use coverage_record::CoverageRecord;
pub use coverage_result::CoverageResult;
pub use run_summary::{RunSummary, SUMMARY_FILENAME};
