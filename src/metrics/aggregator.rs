// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reduction of raw log entries into per-day summaries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::windows;
use crate::models::{DailyNutritionSummary, DayNutrition, FoodLogEntry, MealType, WaterLogEntry, WorkoutLogEntry};

/// Sum calories and macros of the entries logged on `date` (UTC)
///
/// Entries from other days are ignored; an empty input yields an all-zero
/// summary. Meal type plays no part in the totals.
pub fn summarize_day(date: NaiveDate, entries: &[FoodLogEntry]) -> DailyNutritionSummary {
    entries
        .iter()
        .filter(|entry| entry.timestamp.date_naive() == date)
        .fold(DailyNutritionSummary::empty(date), |mut summary, entry| {
            summary.total_calories += entry.calories;
            summary.total_protein += entry.protein;
            summary.total_carbs += entry.carbs;
            summary.total_fat += entry.fat;
            summary
        })
}

/// Calories per meal slot, for display next to the daily totals
pub fn meal_breakdown(entries: &[FoodLogEntry]) -> BTreeMap<MealType, f64> {
    let mut breakdown = BTreeMap::new();
    for entry in entries {
        *breakdown.entry(entry.meal_type).or_insert(0.0) += entry.calories;
    }
    breakdown
}

/// Running hydration total derived from discrete water entries
pub fn total_water_ml(entries: &[WaterLogEntry]) -> f64 {
    entries.iter().map(|entry| entry.amount_ml).sum()
}

/// Number of workouts logged on `date`
pub fn workout_count(date: NaiveDate, entries: &[WorkoutLogEntry]) -> usize {
    entries.iter().filter(|entry| entry.timestamp.date_naive() == date).count()
}

/// Chronological day-by-day nutrition series
///
/// Built from the server's pre-aggregated per-day map without recomputing
/// anything. Days without entries are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionSeries {
    days: Vec<DailyNutritionSummary>,
}

impl NutritionSeries {
    pub fn from_daily_map(daily: &BTreeMap<NaiveDate, DayNutrition>) -> Self {
        // BTreeMap iteration is already ascending by date
        let days = daily
            .iter()
            .map(|(date, day)| DailyNutritionSummary::from_day(*date, day))
            .collect();
        Self { days }
    }

    /// Full range, for trend charts
    pub fn full(&self) -> &[DailyNutritionSummary] {
        &self.days
    }

    /// Most recent days (at most seven), for short-range bar charts
    pub fn recent(&self) -> &[DailyNutritionSummary] {
        self.tail(windows::SHORT_RANGE_DAYS)
    }

    pub fn tail(&self, count: usize) -> &[DailyNutritionSummary] {
        let start = self.days.len().saturating_sub(count);
        &self.days[start..]
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Mean calories per logged day; zero when no day was logged
pub fn average_daily_calories(days: &[DailyNutritionSummary]) -> f64 {
    let total: f64 = days.iter().map(|day| day.total_calories).sum();
    total / days.len().max(1) as f64
}
