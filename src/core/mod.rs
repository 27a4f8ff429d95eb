pub mod cursor;
pub mod day;
pub mod event;
pub mod metrics;
pub mod profile;
pub mod task;

use thiserror::Error;

/// Input validation failures. The offending operation is aborted with no
/// partial state change; the message is what gets shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("end time must be after start time")]
    EndNotAfterStart,
}
