// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Constants Module
//!
//! Fixed reference values used by the metrics layer and environment-based
//! configuration lookups used by the client.

use std::env;

/// Daily goal defaults used when no configuration overrides them
pub mod goals {
    /// Daily calorie goal (kcal)
    pub const DEFAULT_CALORIE_GOAL_KCAL: f64 = 2500.0;

    /// Daily water goal (ml)
    pub const DEFAULT_WATER_GOAL_ML: f64 = 3000.0;

    /// Macro reference targets (grams), independent of the calorie goal
    pub const PROTEIN_TARGET_G: f64 = 150.0;
    pub const CARBS_TARGET_G: f64 = 250.0;
    pub const FAT_TARGET_G: f64 = 80.0;

    /// Daily protein above which the dashboard reports "On track"
    pub const PROTEIN_ON_TRACK_G: f64 = 80.0;
}

/// Body composition reference values
pub mod body {
    /// BMI used as the healthy reference point for goal weights
    pub const HEALTHY_BMI: f64 = 22.0;

    /// BMI category upper bounds (exclusive)
    pub const BMI_UNDERWEIGHT_MAX: f64 = 18.5;
    pub const BMI_NORMAL_MAX: f64 = 25.0;
    pub const BMI_OVERWEIGHT_MAX: f64 = 30.0;

    /// Mifflin-St Jeor coefficients
    pub const BMR_WEIGHT_FACTOR: f64 = 10.0;
    pub const BMR_HEIGHT_FACTOR: f64 = 6.25;
    pub const BMR_AGE_FACTOR: f64 = 5.0;
    pub const BMR_MALE_OFFSET: f64 = 5.0;
    pub const BMR_FEMALE_OFFSET: f64 = -161.0;

    /// Activity multipliers applied to BMR
    pub const SEDENTARY_MULTIPLIER: f64 = 1.2;
    pub const LIGHT_MULTIPLIER: f64 = 1.375;
    pub const MODERATE_MULTIPLIER: f64 = 1.55;
    pub const ACTIVE_MULTIPLIER: f64 = 1.725;
    pub const VERY_ACTIVE_MULTIPLIER: f64 = 1.9;
}

/// Series and trend windows
pub mod windows {
    /// Days kept for short-range nutrition charts
    pub const SHORT_RANGE_DAYS: usize = 7;

    /// Days requested from the analytics endpoint by default
    pub const DEFAULT_ANALYTICS_DAYS: u32 = 30;

    /// Observations needed before a weight trend exists
    pub const MIN_OBSERVATIONS_FOR_TREND: usize = 2;
}

/// Hydration shortcuts
pub mod hydration {
    /// Quick-add amounts offered by the water tracker (ml)
    pub const QUICK_AMOUNTS_ML: [f64; 4] = [250.0, 500.0, 750.0, 1000.0];
}

/// Hour boundaries (local time, exclusive) used to infer a meal type
pub mod meals {
    pub const BREAKFAST_BEFORE_HOUR: u32 = 11;
    pub const LUNCH_BEFORE_HOUR: u32 = 16;
    pub const DINNER_BEFORE_HOUR: u32 = 20;
}

/// REST paths, relative to the API root
pub mod routes {
    pub const FOOD_LOG: &str = "food/log";
    pub const FOOD_ANALYZE: &str = "food/analyze";
    pub const WATER_LOG: &str = "water/log";
    pub const WORKOUT_LOG: &str = "workout/log";
    pub const WORKOUT_LIBRARY: &str = "workout/library";
    pub const WEIGHT_LOG: &str = "weight/log";
    pub const ANALYTICS_PROGRESS: &str = "analytics/progress";
    pub const ANALYTICS_INSIGHTS: &str = "analytics/insights";
    pub const PROFILE: &str = "profile";
    pub const CALCULATOR_BMI: &str = "calculator/bmi";
    pub const CALCULATOR_BMR: &str = "calculator/bmr";
    pub const CALCULATOR_TDEE: &str = "calculator/tdee";
    pub const DIET_PLAN: &str = "diet/plan";
}

/// Numeric limits
pub mod limits {
    /// Request timeout applied when none is configured
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Default API root for local development
    pub const DEFAULT_API_URL: &str = "http://localhost:8001/api";
}

/// Environment-based configuration
pub mod env_config {
    use super::env;
    use super::limits;

    /// Get the API root from environment or default
    pub fn api_url() -> String {
        env::var("FITNESS_API_URL")
            .unwrap_or_else(|_| limits::DEFAULT_API_URL.to_string())
    }

    /// Get the bearer token from environment
    pub fn api_token() -> Option<String> {
        env::var("FITNESS_API_TOKEN").ok().filter(|token| !token.is_empty())
    }

    /// Get request timeout from environment or default
    pub fn request_timeout_secs() -> u64 {
        env::var("FITNESS_API_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(limits::DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// Get calorie goal override from environment
    pub fn calorie_goal() -> Option<f64> {
        env::var("FITNESS_CALORIE_GOAL").ok().and_then(|value| value.parse().ok())
    }

    /// Get water goal override from environment
    pub fn water_goal_ml() -> Option<f64> {
        env::var("FITNESS_WATER_GOAL_ML").ok().and_then(|value| value.parse().ok())
    }
}
