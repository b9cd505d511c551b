// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error taxonomy shared by the repositories, the metrics layer and the views

use serde::Serialize;

/// Result alias used across the library
pub type TrackerResult<T> = std::result::Result<T, TrackerError>;

/// Errors raised by the fitness tracker client
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request rejected with status {status}: {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Malformed response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Invalid API address: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid goal {goal}: goals must be positive")]
    InvalidGoal { goal: f64 },

    #[error("Not enough data: need {required} entries, found {available}")]
    EmptyDataset { required: usize, available: usize },
}

/// Coarse error categories used to decide how a failure is surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NetworkFailure,
    ValidationError,
    InvalidGoal,
    EmptyDataset,
}

impl TrackerError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        TrackerError::Validation(message.into())
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackerError::Network(_) | TrackerError::Rejected { .. } => ErrorKind::NetworkFailure,
            TrackerError::Validation(_)
            | TrackerError::MalformedResponse(_)
            | TrackerError::InvalidUrl(_) => ErrorKind::ValidationError,
            TrackerError::InvalidGoal { .. } => ErrorKind::InvalidGoal,
            TrackerError::EmptyDataset { .. } => ErrorKind::EmptyDataset,
        }
    }

    /// Whether the failure came from the remote store rather than local input
    pub fn is_network(&self) -> bool {
        self.kind() == ErrorKind::NetworkFailure
    }
}

/// Fail with a validation error unless `value` is finite and strictly positive
pub fn require_positive(field: &str, value: f64) -> TrackerResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(TrackerError::validation(format!("{} must be positive, got {}", field, value)))
    }
}

/// Fail with a validation error on a blank entry id
pub fn require_id(id: &str) -> TrackerResult<&str> {
    if id.trim().is_empty() {
        return Err(TrackerError::validation("entry id must not be empty"));
    }
    Ok(id)
}

/// Fail with a validation error unless `value` is finite and not negative
pub fn require_non_negative(field: &str, value: f64) -> TrackerResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TrackerError::validation(format!("{} must not be negative, got {}", field, value)))
    }
}
