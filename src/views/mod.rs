// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Views
//!
//! One state holder per screen. Each view owns its data, fetches it through
//! the repository traits and derives display values with the metrics layer.
//!
//! Rules shared by every view:
//! - a failed remote call becomes a [`Notice`] and the view keeps its
//!   last-known (or empty) state
//! - input is validated before anything is sent; invalid input is returned
//!   to the caller as an error
//! - every successful mutation is followed by a full refetch

use serde::Serialize;
use std::fmt;

use crate::errors::{ErrorKind, TrackerError, TrackerResult};
use crate::logging::AppLogger;

pub mod analytics;
pub mod dashboard;
pub mod diet;
pub mod food;
pub mod library;
pub mod profile;
pub mod water;
pub mod weight;
pub mod workout;

#[cfg(test)]
pub(crate) mod fake;

pub use analytics::{AnalyticsState, AnalyticsView};
pub use dashboard::{DashboardState, DashboardView};
pub use diet::DietCoachView;
pub use food::{FoodState, FoodTrackerView};
pub use library::WorkoutLibraryView;
pub use profile::ProfileView;
pub use water::{WaterState, WaterTrackerView};
pub use weight::WeightView;
pub use workout::WorkoutTrackerView;

/// Transient, user-facing report of a failed remote call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: ErrorKind,
    pub message: String,
}

impl Notice {
    pub fn from_error(action: &str, error: &TrackerError) -> Self {
        Self {
            kind: error.kind(),
            message: format!("Failed to {}: {}", action, error),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Turn the outcome of a remote call into a value or a recorded notice
pub(crate) fn settle<T>(
    view: &str,
    action: &str,
    result: TrackerResult<T>,
    notice: &mut Option<Notice>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            let reported = Notice::from_error(action, &error);
            AppLogger::log_view_notice(view, &reported.message, &error.to_string());
            *notice = Some(reported);
            None
        }
    }
}

/// Log a mutation and report whether it went through
pub(crate) fn settle_mutation<T>(
    view: &str,
    action: &str,
    result: TrackerResult<T>,
    notice: &mut Option<Notice>,
) -> Option<T> {
    let settled = settle(view, action, result, notice);
    AppLogger::log_mutation(view, action, settled.is_some());
    settled
}
