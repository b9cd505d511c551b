// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Progress analytics over a window of days

use serde::Serialize;
use std::sync::Arc;

use super::{settle, Notice};
use crate::constants::windows;
use crate::errors::TrackerResult;
use crate::metrics::{nutrition_chart, ChartPoint, NutritionSeries, WeightTrend};
use crate::repositories::AnalyticsRepository;

const VIEW: &str = "analytics";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyticsState {
    pub days: u32,
    pub weight_trend: WeightTrend,
    pub nutrition: NutritionSeries,
    pub total_workouts: u64,
    pub avg_daily_calories: f64,
}

impl AnalyticsState {
    pub fn weight_chart(&self) -> Vec<ChartPoint> {
        self.weight_trend.chart_points()
    }

    /// Calorie bars for the last seven logged days
    pub fn calorie_chart(&self) -> Vec<ChartPoint> {
        nutrition_chart(&self.nutrition)
    }
}

pub struct AnalyticsView<R> {
    store: Arc<R>,
    state: AnalyticsState,
    notice: Option<Notice>,
}

impl<R: AnalyticsRepository> AnalyticsView<R> {
    pub fn new(store: Arc<R>) -> Self {
        Self {
            store,
            state: AnalyticsState::default(),
            notice: None,
        }
    }

    pub fn state(&self) -> &AnalyticsState {
        &self.state
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Refresh over the default 30-day window
    pub async fn refresh(&mut self) -> TrackerResult<()> {
        self.refresh_days(windows::DEFAULT_ANALYTICS_DAYS).await
    }

    pub async fn refresh_days(&mut self, days: u32) -> TrackerResult<()> {
        let fetched = self.store.progress(days).await;
        if let Some(analytics) = settle(VIEW, "load analytics", fetched, &mut self.notice) {
            self.state = AnalyticsState {
                days,
                weight_trend: WeightTrend::from_entries(&analytics.weight_trend),
                nutrition: NutritionSeries::from_daily_map(&analytics.daily_nutrition),
                total_workouts: analytics.total_workouts,
                avg_daily_calories: analytics.avg_daily_calories,
            };
        }
        Ok(())
    }
}
