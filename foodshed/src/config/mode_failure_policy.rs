use serde::{Deserialize, Serialize};

/// what a coverage run does when a mode's network cannot be built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeFailurePolicy {
    /// log the failure, record the mode as skipped and continue
    #[default]
    Skip,
    /// fail the whole run
    Abort,
}
