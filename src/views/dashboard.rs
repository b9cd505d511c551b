// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Today-at-a-glance: nutrition totals, hydration, workouts and insights

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::{settle, Notice};
use crate::errors::TrackerResult;
use crate::metrics::{
    round_to, summarize_day, total_water_ml, workout_count, Clamp, GoalProgress, ProgressEngine, ProgressSnapshot,
    Remaining,
};
use crate::models::{DailyNutritionSummary, InsightFeed};
use crate::repositories::{AnalyticsRepository, FoodLogRepository, WaterLogRepository, WorkoutLogRepository};

const VIEW: &str = "dashboard";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardState {
    /// Totals rounded to whole units for display
    pub totals: DailyNutritionSummary,
    /// Unclamped calorie progress with what is left of the goal
    pub calories: GoalProgress,
    pub water_ml: f64,
    pub workout_count: usize,
    pub progress: ProgressSnapshot,
    pub protein_on_track: bool,
    pub insights: InsightFeed,
}

impl DashboardState {
    /// Calorie card caption: kcal left, or the goal-reached badge
    pub fn calorie_status(&self) -> String {
        match self.calories.remaining {
            Remaining::GoalReached => "Goal reached!".to_string(),
            Remaining::Left(amount) => format!("{:.0} remaining", amount),
        }
    }
}

pub struct DashboardView<R> {
    store: Arc<R>,
    engine: ProgressEngine,
    state: Option<DashboardState>,
    notice: Option<Notice>,
}

impl<R> DashboardView<R>
where
    R: FoodLogRepository + WaterLogRepository + WorkoutLogRepository + AnalyticsRepository,
{
    pub fn new(store: Arc<R>, engine: ProgressEngine) -> Self {
        Self {
            store,
            engine,
            state: None,
            notice: None,
        }
    }

    pub fn state(&self) -> Option<&DashboardState> {
        self.state.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Fetch all four sources concurrently and update only if every one succeeded
    pub async fn refresh(&mut self, date: NaiveDate) -> TrackerResult<()> {
        let (food, water, workouts, insights) = tokio::join!(
            self.store.food_entries(date),
            self.store.water_day(date),
            self.store.workout_entries(date),
            self.store.insights(),
        );

        let fetched = match (food, water, workouts, insights) {
            (Ok(food), Ok(water), Ok(workouts), Ok(insights)) => Ok((food, water, workouts, insights)),
            (Err(error), ..) | (_, Err(error), ..) | (_, _, Err(error), _) | (.., Err(error)) => Err(error),
        };

        let Some((food, water, workouts, insights)) =
            settle(VIEW, "load dashboard", fetched, &mut self.notice)
        else {
            return Ok(());
        };

        let summary = summarize_day(date, &food);
        let water_ml = if water.logs.is_empty() {
            water.total_ml
        } else {
            total_water_ml(&water.logs)
        };
        let progress = self.engine.snapshot(&summary, water_ml)?;
        let calories = self.engine.calorie_progress(summary.total_calories, Clamp::Raw)?;

        debug!(
            date = %date,
            food_entries = food.len(),
            workouts = workouts.len(),
            calories = summary.total_calories,
            "Dashboard refreshed"
        );

        self.state = Some(DashboardState {
            totals: DailyNutritionSummary {
                date,
                total_calories: round_to(summary.total_calories, 0),
                total_protein: round_to(summary.total_protein, 0),
                total_carbs: round_to(summary.total_carbs, 0),
                total_fat: round_to(summary.total_fat, 0),
            },
            calories,
            water_ml,
            workout_count: workout_count(date, &workouts),
            progress,
            protein_on_track: ProgressEngine::protein_on_track(&summary),
            insights,
        });
        self.notice = None;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Insight, InsightKind, WaterLogEntry};
    use crate::views::fake::FakeStore;
    use std::sync::atomic::Ordering;

    fn seeded_store() -> Arc<FakeStore> {
        let store = FakeStore::new();
        let breakfast = store.food_entry("Oats", 400.4, 30.2);
        let dinner = store.food_entry("Salmon", 850.0, 55.0);
        store.food.lock().unwrap().extend([breakfast, dinner]);
        store.water.lock().unwrap().push(WaterLogEntry {
            id: "w1".to_string(),
            amount_ml: 1500.0,
            timestamp: store.now,
        });
        store.insights.lock().unwrap().insights.push(Insight {
            kind: InsightKind::Success,
            message: "Great protein intake".to_string(),
        });
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_dashboard_combines_all_sources() {
        let store = seeded_store();
        let mut view = DashboardView::new(store.clone(), ProgressEngine::default());

        view.refresh(store.today()).await.unwrap();
        let state = view.state().unwrap();

        assert_eq!(state.totals.total_calories, 1250.0);
        assert_eq!(state.totals.total_protein, 85.0);
        assert_eq!(state.water_ml, 1500.0);
        assert_eq!(state.workout_count, 0);
        assert_eq!(state.progress.calorie_progress_pct, 100.0 * 1250.4 / 2500.0);
        assert_eq!(state.progress.water_progress_pct, 50.0);
        assert!(state.protein_on_track);
        assert_eq!(state.insights.insights.len(), 1);
        assert!(view.take_notice().is_none());
    }

    #[tokio::test]
    async fn test_calorie_status_until_goal_reached() {
        let store = seeded_store();
        let mut view = DashboardView::new(store.clone(), ProgressEngine::default());

        view.refresh(store.today()).await.unwrap();
        let state = view.state().unwrap();
        assert!((state.calories.remaining.amount() - 1249.6).abs() < 1e-9);
        assert_eq!(state.calorie_status(), "1250 remaining");

        let pizza = store.food_entry("Pizza", 1400.0, 50.0);
        store.food.lock().unwrap().push(pizza);
        view.refresh(store.today()).await.unwrap();

        let state = view.state().unwrap();
        assert!(state.calories.remaining.is_reached());
        assert!(state.calories.percent > 100.0);
        assert_eq!(state.progress.calorie_progress_pct, 100.0);
        assert_eq!(state.calorie_status(), "Goal reached!");
    }

    #[tokio::test]
    async fn test_dashboard_keeps_state_when_one_fetch_fails() {
        let store = seeded_store();
        let mut view = DashboardView::new(store.clone(), ProgressEngine::default());
        view.refresh(store.today()).await.unwrap();
        let before = view.state().cloned();

        store.food.lock().unwrap().clear();
        store.insights_offline.store(true, Ordering::SeqCst);
        view.refresh(store.today()).await.unwrap();

        assert_eq!(view.state().cloned(), before);
        let notice = view.take_notice().unwrap();
        assert!(notice.message.contains("insights unavailable"));
    }

    #[tokio::test]
    async fn test_dashboard_starts_empty_when_offline() {
        let store = seeded_store();
        store.go_offline();
        let mut view = DashboardView::new(store.clone(), ProgressEngine::default());

        view.refresh(store.today()).await.unwrap();
        assert!(view.state().is_none());
        assert!(view.take_notice().is_some());
    }
}
