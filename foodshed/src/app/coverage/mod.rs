mod coverage_inputs;
mod coverage_run;

pub use coverage_inputs::CoverageInputs;
pub use coverage_run::CoverageRun;
