mod coverage_config;
mod mode_failure_policy;

pub use coverage_config::{parse_modes, CoverageConfiguration};
pub use mode_failure_policy::ModeFailurePolicy;
