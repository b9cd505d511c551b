// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Goal progress: percentages, remaining amounts and macro bar widths

use serde::{Deserialize, Serialize};

use crate::config::GoalConfig;
use crate::constants::goals;
use crate::errors::{TrackerError, TrackerResult};
use crate::models::DailyNutritionSummary;

/// How a percentage is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clamp {
    /// Clamped to [0, 100] for bars and gauges
    Display,
    /// Unclamped, for textual percentages
    Raw,
}

/// What is left before a goal is reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "amount", rename_all = "snake_case")]
pub enum Remaining {
    Left(f64),
    GoalReached,
}

impl Remaining {
    pub fn amount(&self) -> f64 {
        match self {
            Remaining::Left(amount) => *amount,
            Remaining::GoalReached => 0.0,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, Remaining::GoalReached)
    }
}

/// Consumption measured against one goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub consumed: f64,
    pub goal: f64,
    pub percent: f64,
    pub remaining: Remaining,
}

/// Macro bar widths in percent of their reference targets, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroProgress {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Display-ready progress for one day, every value clamped to [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub calorie_progress_pct: f64,
    pub water_progress_pct: f64,
    pub macro_pct: MacroProgress,
}

/// `100 * consumed / goal`, failing on a goal that is not positive
pub fn percent_of(consumed: f64, goal: f64) -> TrackerResult<f64> {
    if !goal.is_finite() || goal <= 0.0 {
        return Err(TrackerError::InvalidGoal { goal });
    }
    Ok(100.0 * consumed / goal)
}

/// Width of a progress bar, never above 100 nor below 0
pub fn bar_width(value: f64, target: f64) -> TrackerResult<f64> {
    Ok(percent_of(value, target)?.clamp(0.0, 100.0))
}

/// `max(goal - consumed, 0)`, reported as reached once consumption meets the goal
///
/// Negative consumption counts as nothing consumed, so the amount left never
/// exceeds the goal.
pub fn remaining(consumed: f64, goal: f64) -> Remaining {
    let consumed = consumed.max(0.0);
    if consumed >= goal {
        Remaining::GoalReached
    } else {
        Remaining::Left(goal - consumed)
    }
}

/// Compares daily consumption against configured goals
#[derive(Debug, Clone)]
pub struct ProgressEngine {
    goals: GoalConfig,
}

impl ProgressEngine {
    pub fn new(goals: GoalConfig) -> TrackerResult<Self> {
        goals.validate()?;
        Ok(Self { goals })
    }

    pub fn goals(&self) -> &GoalConfig {
        &self.goals
    }

    pub fn calorie_progress(&self, consumed_kcal: f64, clamp: Clamp) -> TrackerResult<GoalProgress> {
        Self::measure(consumed_kcal, self.goals.calorie_goal_kcal, clamp)
    }

    pub fn water_progress(&self, consumed_ml: f64, clamp: Clamp) -> TrackerResult<GoalProgress> {
        Self::measure(consumed_ml, self.goals.water_goal_ml, clamp)
    }

    pub fn macro_progress(&self, summary: &DailyNutritionSummary) -> TrackerResult<MacroProgress> {
        let targets = &self.goals.macro_targets;
        Ok(MacroProgress {
            protein: bar_width(summary.total_protein, targets.protein_g)?,
            carbs: bar_width(summary.total_carbs, targets.carbs_g)?,
            fat: bar_width(summary.total_fat, targets.fat_g)?,
        })
    }

    pub fn snapshot(&self, summary: &DailyNutritionSummary, water_ml: f64) -> TrackerResult<ProgressSnapshot> {
        Ok(ProgressSnapshot {
            calorie_progress_pct: self.calorie_progress(summary.total_calories, Clamp::Display)?.percent,
            water_progress_pct: self.water_progress(water_ml, Clamp::Display)?.percent,
            macro_pct: self.macro_progress(summary)?,
        })
    }

    /// Whether daily protein clears the dashboard's "On track" threshold
    pub fn protein_on_track(summary: &DailyNutritionSummary) -> bool {
        summary.total_protein > goals::PROTEIN_ON_TRACK_G
    }

    fn measure(consumed: f64, goal: f64, clamp: Clamp) -> TrackerResult<GoalProgress> {
        let raw = percent_of(consumed, goal)?;
        let percent = match clamp {
            Clamp::Display => raw.clamp(0.0, 100.0),
            Clamp::Raw => raw,
        };

        Ok(GoalProgress {
            consumed,
            goal,
            percent,
            remaining: remaining(consumed, goal),
        })
    }
}

impl Default for ProgressEngine {
    fn default() -> Self {
        Self { goals: GoalConfig::default() }
    }
}
