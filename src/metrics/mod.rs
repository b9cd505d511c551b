// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Metrics Module
//!
//! Pure, synchronous computations over raw log entries and profile data.
//! Nothing in here performs I/O or keeps state between calls.
//!
//! This module includes:
//! - Daily aggregation of food and water entries
//! - Goal progress and macro bar widths
//! - BMI, BMR, TDEE and goal-weight formulas
//! - Weight trend and chart series
//! - Insight feed rendering

pub mod aggregator;
pub mod body;
pub mod insights;
pub mod progress;
pub mod trend;

pub use aggregator::{
    average_daily_calories, meal_breakdown, summarize_day, total_water_ml, workout_count,
    NutritionSeries,
};
pub use body::{bmi, bmr, goal_weight, round_to, tdee, BmiCategory, BodyMetrics, BodyMetricsInput};
pub use insights::render_lines;
pub use progress::{Clamp, GoalProgress, MacroProgress, ProgressEngine, ProgressSnapshot, Remaining};
pub use trend::{nutrition_chart, ChartPoint, TrendDirection, WeightObservation, WeightTrend};
