// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Models
//!
//! Wire and domain records exchanged with the remote fitness store.
//!
//! All entities are server-owned: the client only holds short-lived copies
//! for the current view. Field names follow the backend's snake_case JSON,
//! with Rust-side names carrying their unit where the wire name does not
//! (`weight` on the wire is `weight_kg` here).
//!
//! ## Core Models
//!
//! - [`FoodLogEntry`], [`WaterLogEntry`], [`WorkoutLogEntry`], [`WeightLogEntry`]: raw log entries
//! - [`UserProfile`]: profile inputs for the body-metrics calculator
//! - [`DailyNutritionSummary`]: per-day totals derived from food entries
//! - [`ProgressAnalytics`], [`InsightFeed`]: pre-aggregated analytics feeds
//! - [`FoodAnalysis`], [`DietPlan`]: validated results of external AI services

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::constants::meals;
use crate::errors::{require_non_negative, require_positive, TrackerError, TrackerResult};

/// Timestamp codec accepting RFC 3339 and offset-less ISO 8601 (read as UTC)
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Meal slot a food entry belongs to (informational only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Infer the meal slot from a local hour of day (0-23)
    pub fn for_hour(hour: u32) -> Self {
        if hour < meals::BREAKFAST_BEFORE_HOUR {
            MealType::Breakfast
        } else if hour < meals::LUNCH_BEFORE_HOUR {
            MealType::Lunch
        } else if hour < meals::DINNER_BEFORE_HOUR {
            MealType::Dinner
        } else {
            MealType::Snack
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(TrackerError::validation(format!("unknown meal type: {}", other))),
        }
    }
}

/// A single logged food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub id: String,
    pub food_name: String,
    /// Energy in kcal; not required to match the macros
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub sugar: f64,
    pub meal_type: MealType,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /food/log`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFoodEntry {
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub meal_type: MealType,
}

impl NewFoodEntry {
    pub fn validate(&self) -> TrackerResult<()> {
        if self.food_name.trim().is_empty() {
            return Err(TrackerError::validation("food name must not be empty"));
        }
        require_non_negative("calories", self.calories)?;
        require_non_negative("protein", self.protein)?;
        require_non_negative("carbs", self.carbs)?;
        require_non_negative("fat", self.fat)?;
        require_non_negative("fiber", self.fiber)?;
        require_non_negative("sugar", self.sugar)?;
        Ok(())
    }
}

/// A single logged drink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterLogEntry {
    #[serde(default)]
    pub id: String,
    pub amount_ml: f64,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Response of `GET /water/log`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterLogDay {
    #[serde(default)]
    pub total_ml: f64,
    #[serde(default, alias = "entries")]
    pub logs: Vec<WaterLogEntry>,
}

/// Body of `POST /water/log`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewWaterEntry {
    pub amount_ml: f64,
}

impl NewWaterEntry {
    pub fn validate(&self) -> TrackerResult<()> {
        require_positive("amount_ml", self.amount_ml).map(|_| ())
    }
}

/// A single logged exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLogEntry {
    pub id: String,
    pub exercise_name: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(rename = "weight", default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub calories_burned: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /workout/log`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkoutEntry {
    pub exercise_name: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(rename = "weight", skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewWorkoutEntry {
    pub fn validate(&self) -> TrackerResult<()> {
        if self.exercise_name.trim().is_empty() {
            return Err(TrackerError::validation("exercise name must not be empty"));
        }
        if self.sets < 1 || self.reps < 1 {
            return Err(TrackerError::validation("sets and reps must be at least 1"));
        }
        if let Some(weight) = self.weight_kg {
            require_non_negative("weight", weight)?;
        }
        if let Some(calories) = self.calories_burned {
            require_non_negative("calories_burned", calories)?;
        }
        Ok(())
    }
}

/// A body-weight reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLogEntry {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    #[serde(default)]
    pub body_fat_percentage: Option<f64>,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /weight/log`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewWeightEntry {
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_percentage: Option<f64>,
}

impl NewWeightEntry {
    pub fn validate(&self) -> TrackerResult<()> {
        require_positive("weight", self.weight_kg)?;
        if let Some(body_fat) = self.body_fat_percentage {
            if !(0.0..=100.0).contains(&body_fat) {
                return Err(TrackerError::validation(format!(
                    "body fat percentage must be within 0-100, got {}",
                    body_fat
                )));
            }
        }
        Ok(())
    }
}

/// Self-reported activity level used for TDEE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" => Ok(ActivityLevel::VeryActive),
            other => Err(TrackerError::validation(format!("unknown activity level: {}", other))),
        }
    }
}

/// Training goal stored on the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    FatLoss,
    MuscleGain,
    #[default]
    Maintenance,
    Athlete,
}

impl FitnessGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::FatLoss => "fat_loss",
            FitnessGoal::MuscleGain => "muscle_gain",
            FitnessGoal::Maintenance => "maintenance",
            FitnessGoal::Athlete => "athlete",
        }
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitnessGoal {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "fat_loss" => Ok(FitnessGoal::FatLoss),
            "muscle_gain" => Ok(FitnessGoal::MuscleGain),
            "maintenance" => Ok(FitnessGoal::Maintenance),
            "athlete" => Ok(FitnessGoal::Athlete),
            other => Err(TrackerError::validation(format!("unknown goal: {}", other))),
        }
    }
}

/// Sex used by the BMR formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(TrackerError::validation(format!("unknown gender: {}", other))),
        }
    }
}

/// User profile as returned by `GET /profile`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(rename = "height", default)]
    pub height_cm: Option<f64>,
    #[serde(rename = "current_weight", default)]
    pub current_weight_kg: Option<f64>,
    #[serde(rename = "goal_weight", default)]
    pub goal_weight_kg: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activity_level: ActivityLevel,
    #[serde(default, deserialize_with = "null_as_default")]
    pub goal: FitnessGoal,
}

/// Body of `PUT /profile`; only present fields are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(rename = "height", skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(rename = "current_weight", skip_serializing_if = "Option::is_none")]
    pub current_weight_kg: Option<f64>,
    #[serde(rename = "goal_weight", skip_serializing_if = "Option::is_none")]
    pub goal_weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<FitnessGoal>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &ProfileUpdate::default()
    }

    pub fn validate(&self) -> TrackerResult<()> {
        if self.is_empty() {
            return Err(TrackerError::validation("no profile fields to update"));
        }
        for (field, value) in [
            ("height", self.height_cm),
            ("current_weight", self.current_weight_kg),
            ("goal_weight", self.goal_weight_kg),
        ] {
            if let Some(value) = value {
                require_non_negative(field, value)?;
            }
        }
        Ok(())
    }
}

/// Per-day macro totals as they appear in the analytics feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DayNutrition {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
}

/// Totals of one calendar day, derived on every fetch and never persisted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyNutritionSummary {
    pub date: NaiveDate,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
}

impl DailyNutritionSummary {
    /// All-zero summary for a day without entries
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_calories: 0.0,
            total_protein: 0.0,
            total_carbs: 0.0,
            total_fat: 0.0,
        }
    }

    pub fn from_day(date: NaiveDate, day: &DayNutrition) -> Self {
        Self {
            date,
            total_calories: day.calories,
            total_protein: day.protein,
            total_carbs: day.carbs,
            total_fat: day.fat,
        }
    }
}

/// Response of `GET /analytics/progress?days=N`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressAnalytics {
    #[serde(default)]
    pub weight_trend: Vec<WeightLogEntry>,
    #[serde(default)]
    pub daily_nutrition: BTreeMap<NaiveDate, DayNutrition>,
    #[serde(default)]
    pub total_workouts: u64,
    #[serde(default)]
    pub avg_daily_calories: f64,
}

/// Category attached to an externally generated insight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InsightKind {
    Success,
    Warning,
    Info,
    Other(String),
}

impl From<String> for InsightKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "success" => InsightKind::Success,
            "warning" => InsightKind::Warning,
            "info" => InsightKind::Info,
            _ => InsightKind::Other(value),
        }
    }
}

impl From<InsightKind> for String {
    fn from(kind: InsightKind) -> Self {
        match kind {
            InsightKind::Success => "success".to_string(),
            InsightKind::Warning => "warning".to_string(),
            InsightKind::Info => "info".to_string(),
            InsightKind::Other(other) => other,
        }
    }
}

/// One insight message, passed through untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
}

/// Weekly averages reported next to the insights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub avg_protein: f64,
    pub avg_water: f64,
}

/// Response of `GET /analytics/insights`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightFeed {
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub weekly_summary: Option<WeeklySummary>,
}

/// Workout library catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutVideo {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration_minutes: u32,
    pub difficulty: String,
    pub muscle_group: String,
    pub equipment: String,
    pub video_url: String,
    pub thumbnail_url: String,
}

/// Optional catalog filters for `GET /workout/library`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryFilter {
    pub muscle_group: Option<String>,
    pub difficulty: Option<String>,
}

impl LibraryFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![];
        if let Some(muscle_group) = &self.muscle_group {
            query.push(("muscle_group", muscle_group.clone()));
        }
        if let Some(difficulty) = &self.difficulty {
            query.push(("difficulty", difficulty.clone()));
        }
        query
    }
}

/// Nutrition estimate produced by the external food-recognition service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodAnalysis {
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub sugar: f64,
    #[serde(default)]
    pub confidence: Option<String>,
}

impl FoodAnalysis {
    pub fn validate(&self) -> TrackerResult<()> {
        self.to_entry(MealType::Snack).validate()
    }

    /// Turn the estimate into a log entry for the given meal slot
    pub fn to_entry(&self, meal_type: MealType) -> NewFoodEntry {
        NewFoodEntry {
            food_name: self.food_name.clone(),
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            fiber: self.fiber,
            sugar: self.sugar,
            meal_type,
        }
    }
}

/// Body of `POST /diet/plan`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlanRequest {
    pub goal: FitnessGoal,
    pub current_weight: f64,
    pub goal_weight: f64,
    pub activity_level: ActivityLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_preferences: Option<String>,
}

impl DietPlanRequest {
    pub fn validate(&self) -> TrackerResult<()> {
        require_positive("current_weight", self.current_weight)?;
        require_positive("goal_weight", self.goal_weight)?;
        Ok(())
    }
}

/// Macro split of a diet plan, in percent of daily calories
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Diet plan returned by the external coaching service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DietPlan {
    pub plan: String,
    pub daily_calories: u32,
    pub macro_split: MacroSplit,
    pub meal_suggestions: Vec<String>,
}

/// Diet plan exactly as it arrives, before ingress checks
#[derive(Debug, Clone, Deserialize)]
pub struct RawDietPlan {
    #[serde(default)]
    pub plan: String,
    pub daily_calories: f64,
    pub macro_split: HashMap<String, f64>,
    #[serde(default)]
    pub meal_suggestions: Vec<String>,
}

impl TryFrom<RawDietPlan> for DietPlan {
    type Error = TrackerError;

    fn try_from(raw: RawDietPlan) -> Result<Self, Self::Error> {
        let daily_calories = require_positive("daily_calories", raw.daily_calories)?;
        let share = |name: &str| -> TrackerResult<f64> {
            let value = raw
                .macro_split
                .get(name)
                .copied()
                .ok_or_else(|| TrackerError::validation(format!("macro_split is missing {}", name)))?;
            require_non_negative(name, value)
        };
        let macro_split = MacroSplit {
            protein: share("protein")?,
            carbs: share("carbs")?,
            fat: share("fat")?,
        };

        Ok(DietPlan {
            plan: raw.plan,
            daily_calories: daily_calories.round() as u32,
            macro_split,
            meal_suggestions: raw.meal_suggestions,
        })
    }
}

/// Body of the remote `POST /calculator/*` endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorRequest {
    pub weight: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
}

/// Remote BMI result
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteBmi {
    pub bmi: f64,
    pub category: String,
}

/// Remote BMR result
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RemoteBmr {
    pub bmr: f64,
}

/// Remote TDEE result
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RemoteTdee {
    pub tdee: f64,
    pub bmr: f64,
}
