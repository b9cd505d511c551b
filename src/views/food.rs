// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{settle, settle_mutation, Notice};
use crate::errors::{require_id, TrackerResult};
use crate::metrics::{meal_breakdown, summarize_day};
use crate::models::{DailyNutritionSummary, FoodAnalysis, FoodLogEntry, MealType, NewFoodEntry};
use crate::repositories::{FoodAnalyzer, FoodLogRepository};

const VIEW: &str = "food";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodState {
    pub entries: Vec<FoodLogEntry>,
    pub summary: DailyNutritionSummary,
    pub calories_by_meal: BTreeMap<MealType, f64>,
}

impl FoodState {
    fn empty(date: NaiveDate) -> Self {
        Self {
            entries: vec![],
            summary: DailyNutritionSummary::empty(date),
            calories_by_meal: BTreeMap::new(),
        }
    }
}

/// Food diary for one day, with photo analysis
pub struct FoodTrackerView<R> {
    store: Arc<R>,
    date: NaiveDate,
    state: FoodState,
    last_analysis: Option<FoodAnalysis>,
    notice: Option<Notice>,
}

impl<R> FoodTrackerView<R>
where
    R: FoodLogRepository + FoodAnalyzer,
{
    pub fn new(store: Arc<R>, date: NaiveDate) -> Self {
        Self {
            store,
            date,
            state: FoodState::empty(date),
            last_analysis: None,
            notice: None,
        }
    }

    pub fn state(&self) -> &FoodState {
        &self.state
    }

    pub fn last_analysis(&self) -> Option<&FoodAnalysis> {
        self.last_analysis.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub async fn refresh(&mut self) -> TrackerResult<()> {
        let fetched = self.store.food_entries(self.date).await;
        if let Some(entries) = settle(VIEW, "load food log", fetched, &mut self.notice) {
            self.state = FoodState {
                summary: summarize_day(self.date, &entries),
                calories_by_meal: meal_breakdown(&entries),
                entries,
            };
        }
        Ok(())
    }

    pub async fn add(&mut self, entry: NewFoodEntry) -> TrackerResult<()> {
        entry.validate()?;
        let created = self.store.create_food_entry(&entry).await;
        if settle_mutation(VIEW, "log food", created, &mut self.notice).is_some() {
            self.refresh().await?;
        }
        Ok(())
    }

    pub async fn delete(&mut self, id: &str) -> TrackerResult<()> {
        require_id(id)?;
        let deleted = self.store.delete_food_entry(id).await;
        if settle_mutation(VIEW, "delete food entry", deleted, &mut self.notice).is_some() {
            self.refresh().await?;
        }
        Ok(())
    }

    /// Send a photo for analysis; the estimate is kept until it is logged
    pub async fn analyze(&mut self, image: Vec<u8>, file_name: &str) -> TrackerResult<Option<&FoodAnalysis>> {
        let analyzed = self.store.analyze_food(image, file_name).await;
        if let Some(analysis) = settle(VIEW, "analyze food", analyzed, &mut self.notice) {
            self.last_analysis = Some(analysis);
            return Ok(self.last_analysis.as_ref());
        }
        Ok(None)
    }

    /// Log the pending estimate under the meal slot for `local_hour`
    pub async fn log_analysis(&mut self, local_hour: u32) -> TrackerResult<bool> {
        let Some(analysis) = self.last_analysis.clone() else {
            return Ok(false);
        };

        let created = self
            .store
            .create_food_entry(&analysis.to_entry(MealType::for_hour(local_hour)))
            .await;
        if settle_mutation(VIEW, "log analyzed food", created, &mut self.notice).is_none() {
            return Ok(false);
        }

        self.last_analysis = None;
        self.refresh().await?;
        Ok(true)
    }
}
