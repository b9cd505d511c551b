// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Food, water, workout and weight log endpoints

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use super::rest::RestClient;
use super::{FoodLogRepository, WaterLogRepository, WeightLogRepository, WorkoutLogRepository};
use crate::constants::routes;
use crate::errors::{require_id, TrackerResult};
use crate::models::{
    FoodLogEntry, NewFoodEntry, NewWaterEntry, NewWeightEntry, NewWorkoutEntry, WaterLogDay, WaterLogEntry,
    WeightLogEntry, WorkoutLogEntry,
};

fn date_query(date: NaiveDate) -> [(&'static str, String); 1] {
    [("date", date.format("%Y-%m-%d").to_string())]
}

fn item_path(collection: &str, id: &str) -> TrackerResult<String> {
    Ok(format!("{}/{}", collection, urlencoding::encode(require_id(id)?)))
}

#[async_trait]
impl FoodLogRepository for RestClient {
    async fn food_entries(&self, date: NaiveDate) -> TrackerResult<Vec<FoodLogEntry>> {
        let entries: Vec<FoodLogEntry> = self.get_json(routes::FOOD_LOG, &date_query(date)).await?;
        debug!(date = %date, count = entries.len(), "Fetched food entries");
        Ok(entries)
    }

    async fn create_food_entry(&self, entry: &NewFoodEntry) -> TrackerResult<FoodLogEntry> {
        entry.validate()?;
        self.post_json(routes::FOOD_LOG, entry).await
    }

    async fn delete_food_entry(&self, id: &str) -> TrackerResult<()> {
        self.delete(&item_path(routes::FOOD_LOG, id)?).await
    }
}

#[async_trait]
impl WaterLogRepository for RestClient {
    async fn water_day(&self, date: NaiveDate) -> TrackerResult<WaterLogDay> {
        self.get_json(routes::WATER_LOG, &date_query(date)).await
    }

    async fn create_water_entry(&self, entry: &NewWaterEntry) -> TrackerResult<WaterLogEntry> {
        entry.validate()?;
        self.post_json(routes::WATER_LOG, entry).await
    }
}

#[async_trait]
impl WorkoutLogRepository for RestClient {
    async fn workout_entries(&self, date: NaiveDate) -> TrackerResult<Vec<WorkoutLogEntry>> {
        let entries: Vec<WorkoutLogEntry> = self.get_json(routes::WORKOUT_LOG, &date_query(date)).await?;
        debug!(date = %date, count = entries.len(), "Fetched workout entries");
        Ok(entries)
    }

    async fn create_workout_entry(&self, entry: &NewWorkoutEntry) -> TrackerResult<WorkoutLogEntry> {
        entry.validate()?;
        self.post_json(routes::WORKOUT_LOG, entry).await
    }

    async fn delete_workout_entry(&self, id: &str) -> TrackerResult<()> {
        self.delete(&item_path(routes::WORKOUT_LOG, id)?).await
    }
}

#[async_trait]
impl WeightLogRepository for RestClient {
    async fn weight_entries(&self) -> TrackerResult<Vec<WeightLogEntry>> {
        self.get_json(routes::WEIGHT_LOG, &[]).await
    }

    async fn create_weight_entry(&self, entry: &NewWeightEntry) -> TrackerResult<WeightLogEntry> {
        entry.validate()?;
        self.post_json(routes::WEIGHT_LOG, entry).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_path_encodes_id() {
        assert_eq!(item_path(routes::FOOD_LOG, "abc-123").unwrap(), "food/log/abc-123");
        assert_eq!(item_path(routes::WORKOUT_LOG, "a b/c").unwrap(), "workout/log/a%20b%2Fc");
        assert!(item_path(routes::FOOD_LOG, "  ").is_err());
    }

    #[test]
    fn test_date_query_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(date_query(date)[0].1, "2024-03-07");
    }
}
