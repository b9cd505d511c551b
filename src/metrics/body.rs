// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Body composition formulas: BMI, BMR (Mifflin-St Jeor), TDEE and a
//! BMI-based goal weight.
//!
//! Every function validates its inputs and fails with a validation error on
//! non-positive weight, height or age; nothing is clamped.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::body;
use crate::errors::{require_positive, TrackerError, TrackerResult};
use crate::models::{ActivityLevel, Gender, UserProfile};

/// WHO BMI category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < body::BMI_UNDERWEIGHT_MAX {
            BmiCategory::Underweight
        } else if bmi < body::BMI_NORMAL_MAX {
            BmiCategory::Normal
        } else if bmi < body::BMI_OVERWEIGHT_MAX {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ActivityLevel {
    /// TDEE multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => body::SEDENTARY_MULTIPLIER,
            ActivityLevel::Light => body::LIGHT_MULTIPLIER,
            ActivityLevel::Moderate => body::MODERATE_MULTIPLIER,
            ActivityLevel::Active => body::ACTIVE_MULTIPLIER,
            ActivityLevel::VeryActive => body::VERY_ACTIVE_MULTIPLIER,
        }
    }
}

fn height_m(height_cm: f64) -> TrackerResult<f64> {
    Ok(require_positive("height", height_cm)? / 100.0)
}

fn require_age(age: u32) -> TrackerResult<f64> {
    if age == 0 {
        return Err(TrackerError::validation("age must be positive"));
    }
    Ok(f64::from(age))
}

/// Body mass index: kg / m²
pub fn bmi(weight_kg: f64, height_cm: f64) -> TrackerResult<f64> {
    let weight = require_positive("weight", weight_kg)?;
    let height = height_m(height_cm)?;
    Ok(weight / (height * height))
}

/// Basal metabolic rate in kcal/day
pub fn bmr(gender: Gender, weight_kg: f64, height_cm: f64, age: u32) -> TrackerResult<f64> {
    let weight = require_positive("weight", weight_kg)?;
    let height = require_positive("height", height_cm)?;
    let age = require_age(age)?;

    let offset = match gender {
        Gender::Male => body::BMR_MALE_OFFSET,
        Gender::Female => body::BMR_FEMALE_OFFSET,
    };

    Ok(body::BMR_WEIGHT_FACTOR * weight + body::BMR_HEIGHT_FACTOR * height
        - body::BMR_AGE_FACTOR * age
        + offset)
}

/// Total daily energy expenditure from an already computed BMR
pub fn tdee_from_bmr(bmr: f64, activity_level: ActivityLevel) -> TrackerResult<f64> {
    Ok(require_positive("bmr", bmr)? * activity_level.multiplier())
}

/// Total daily energy expenditure in kcal/day
pub fn tdee(
    gender: Gender,
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    activity_level: ActivityLevel,
) -> TrackerResult<f64> {
    Ok(bmr(gender, weight_kg, height_cm, age)? * activity_level.multiplier())
}

/// Weight giving a BMI of 22 at the given height, unrounded
pub fn goal_weight(height_cm: f64) -> TrackerResult<f64> {
    let height = height_m(height_cm)?;
    Ok(body::HEALTHY_BMI * height * height)
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Inputs of the full body-metrics calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMetricsInput {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
}

impl BodyMetricsInput {
    /// Take weight, height, age and activity level from a profile
    pub fn from_profile(profile: &UserProfile, gender: Gender) -> TrackerResult<Self> {
        let missing = |field: &str| TrackerError::validation(format!("profile has no {}", field));

        Ok(Self {
            weight_kg: profile.current_weight_kg.ok_or_else(|| missing("current weight"))?,
            height_cm: profile.height_cm.ok_or_else(|| missing("height"))?,
            age: profile.age.ok_or_else(|| missing("age"))?,
            gender,
            activity_level: profile.activity_level,
        })
    }
}

/// Derived body metrics, never persisted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMetrics {
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub bmr: f64,
    pub tdee: f64,
}

impl BodyMetrics {
    pub fn compute(input: &BodyMetricsInput) -> TrackerResult<Self> {
        let bmi = bmi(input.weight_kg, input.height_cm)?;
        let bmr = bmr(input.gender, input.weight_kg, input.height_cm, input.age)?;

        Ok(Self {
            bmi,
            bmi_category: BmiCategory::from_bmi(bmi),
            bmr,
            tdee: bmr * input.activity_level.multiplier(),
        })
    }

    /// Values rounded the way the calculator endpoints report them
    pub fn rounded(&self) -> Self {
        Self {
            bmi: round_to(self.bmi, 2),
            bmi_category: self.bmi_category,
            bmr: round_to(self.bmr, 2),
            tdee: round_to(self.tdee, 2),
        }
    }
}
