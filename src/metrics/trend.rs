// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Weight trend and chart series over recorded observations

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::windows;
use crate::errors::{TrackerError, TrackerResult};
use crate::metrics::aggregator::NutritionSeries;
use crate::metrics::body::round_to;
use crate::models::WeightLogEntry;

/// A single weight reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightObservation {
    pub timestamp: DateTime<Utc>,
    pub weight_kg: f64,
}

impl From<&WeightLogEntry> for WeightObservation {
    fn from(entry: &WeightLogEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            weight_kg: entry.weight_kg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Lost,
    Gained,
    Unchanged,
}

impl TrendDirection {
    fn of(change: f64) -> Self {
        if change < 0.0 {
            TrendDirection::Lost
        } else if change > 0.0 {
            TrendDirection::Gained
        } else {
            TrendDirection::Unchanged
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Lost => "Lost",
            TrendDirection::Gained => "Gained",
            TrendDirection::Unchanged => "No change",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One labelled point of a line or bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

fn short_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Chronologically ordered weight observations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightTrend {
    observations: Vec<WeightObservation>,
}

impl WeightTrend {
    pub fn new(mut observations: Vec<WeightObservation>) -> Self {
        observations.sort_by_key(|observation| observation.timestamp);
        Self { observations }
    }

    pub fn from_entries(entries: &[WeightLogEntry]) -> Self {
        Self::new(entries.iter().map(WeightObservation::from).collect())
    }

    pub fn observations(&self) -> &[WeightObservation] {
        &self.observations
    }

    /// Last minus first, failing when fewer than two observations exist
    pub fn checked_weight_change(&self) -> TrackerResult<f64> {
        match (self.observations.first(), self.observations.last()) {
            (Some(first), Some(last)) if self.observations.len() >= windows::MIN_OBSERVATIONS_FOR_TREND => {
                Ok(last.weight_kg - first.weight_kg)
            }
            _ => Err(TrackerError::EmptyDataset {
                required: windows::MIN_OBSERVATIONS_FOR_TREND,
                available: self.observations.len(),
            }),
        }
    }

    /// Last minus first; zero while there is no trend yet
    pub fn weight_change(&self) -> f64 {
        self.checked_weight_change().unwrap_or(0.0)
    }

    pub fn direction(&self) -> TrendDirection {
        TrendDirection::of(self.weight_change())
    }

    /// Absolute change rounded to one decimal, for display next to the label
    pub fn magnitude(&self) -> f64 {
        round_to(self.weight_change().abs(), 1)
    }

    /// e.g. "Lost 2.0 kg", or "No change"
    pub fn summary(&self) -> String {
        match self.direction() {
            TrendDirection::Unchanged => TrendDirection::Unchanged.label().to_string(),
            direction => format!("{} {:.1} kg", direction.label(), self.magnitude()),
        }
    }

    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.observations
            .iter()
            .map(|observation| ChartPoint {
                label: short_label(observation.timestamp.date_naive()),
                value: observation.weight_kg,
            })
            .collect()
    }
}

/// Calorie bars for the most recent days of a nutrition series
pub fn nutrition_chart(series: &NutritionSeries) -> Vec<ChartPoint> {
    series
        .recent()
        .iter()
        .map(|day| ChartPoint {
            label: short_label(day.date),
            value: day.total_calories,
        })
        .collect()
}
