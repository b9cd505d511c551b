// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Remote store seams. Every entity is owned by the server; the client reads
//! and writes through these traits and never caches between calls.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::TrackerResult;
use crate::models::{
    DietPlan, DietPlanRequest, FoodAnalysis, FoodLogEntry, InsightFeed, LibraryFilter, NewFoodEntry,
    NewWaterEntry, NewWeightEntry, NewWorkoutEntry, ProfileUpdate, ProgressAnalytics, UserProfile,
    WaterLogDay, WaterLogEntry, WeightLogEntry, WorkoutLogEntry, WorkoutVideo,
};

pub mod logs;
pub mod rest;
pub mod services;

pub use rest::RestClient;

#[async_trait]
pub trait FoodLogRepository: Send + Sync {
    async fn food_entries(&self, date: NaiveDate) -> TrackerResult<Vec<FoodLogEntry>>;

    async fn create_food_entry(&self, entry: &NewFoodEntry) -> TrackerResult<FoodLogEntry>;

    async fn delete_food_entry(&self, id: &str) -> TrackerResult<()>;
}

#[async_trait]
pub trait WaterLogRepository: Send + Sync {
    async fn water_day(&self, date: NaiveDate) -> TrackerResult<WaterLogDay>;

    async fn create_water_entry(&self, entry: &NewWaterEntry) -> TrackerResult<WaterLogEntry>;
}

#[async_trait]
pub trait WorkoutLogRepository: Send + Sync {
    async fn workout_entries(&self, date: NaiveDate) -> TrackerResult<Vec<WorkoutLogEntry>>;

    async fn create_workout_entry(&self, entry: &NewWorkoutEntry) -> TrackerResult<WorkoutLogEntry>;

    async fn delete_workout_entry(&self, id: &str) -> TrackerResult<()>;
}

#[async_trait]
pub trait WeightLogRepository: Send + Sync {
    /// All readings, newest first as the server returns them
    async fn weight_entries(&self) -> TrackerResult<Vec<WeightLogEntry>>;

    async fn create_weight_entry(&self, entry: &NewWeightEntry) -> TrackerResult<WeightLogEntry>;
}

/// Server-side pre-aggregated analytics
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    async fn progress(&self, days: u32) -> TrackerResult<ProgressAnalytics>;

    async fn insights(&self) -> TrackerResult<InsightFeed>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn profile(&self) -> TrackerResult<UserProfile>;

    /// Partial update; only fields present in `update` are changed
    async fn update_profile(&self, update: &ProfileUpdate) -> TrackerResult<()>;
}

/// External food-recognition service
#[async_trait]
pub trait FoodAnalyzer: Send + Sync {
    async fn analyze_food(&self, image: Vec<u8>, file_name: &str) -> TrackerResult<FoodAnalysis>;
}

/// External diet-planning service
#[async_trait]
pub trait DietCoach: Send + Sync {
    async fn diet_plan(&self, request: &DietPlanRequest) -> TrackerResult<DietPlan>;
}

#[async_trait]
pub trait WorkoutCatalog: Send + Sync {
    async fn workout_library(&self, filter: &LibraryFilter) -> TrackerResult<Vec<WorkoutVideo>>;
}
