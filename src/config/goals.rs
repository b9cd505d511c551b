// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Daily goals and macro reference targets fed into the progress engine

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::constants::goals;
use crate::errors::{TrackerError, TrackerResult};

/// Goals the progress engine measures consumption against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    pub calorie_goal_kcal: f64,
    pub water_goal_ml: f64,
    pub macro_targets: MacroTargets,
}

/// Fixed macro reference targets in grams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroTargets {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl GoalConfig {
    /// Load goals from a TOML file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read goals file: {}", path))?;

        let config: GoalConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse goals file: {}", path))?;

        Ok(config)
    }

    /// Reject any goal that would make a progress percentage undefined
    pub fn validate(&self) -> TrackerResult<()> {
        for goal in [
            self.calorie_goal_kcal,
            self.water_goal_ml,
            self.macro_targets.protein_g,
            self.macro_targets.carbs_g,
            self.macro_targets.fat_g,
        ] {
            if !goal.is_finite() || goal <= 0.0 {
                return Err(TrackerError::InvalidGoal { goal });
            }
        }
        Ok(())
    }
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            calorie_goal_kcal: goals::DEFAULT_CALORIE_GOAL_KCAL,
            water_goal_ml: goals::DEFAULT_WATER_GOAL_ML,
            macro_targets: MacroTargets::default(),
        }
    }
}

impl Default for MacroTargets {
    fn default() -> Self {
        Self {
            protein_g: goals::PROTEIN_TARGET_G,
            carbs_g: goals::CARBS_TARGET_G,
            fat_g: goals::FAT_TARGET_G,
        }
    }
}
