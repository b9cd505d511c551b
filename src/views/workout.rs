// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use chrono::NaiveDate;
use std::sync::Arc;

use super::{settle, settle_mutation, Notice};
use crate::errors::{require_id, TrackerResult};
use crate::models::{NewWorkoutEntry, WorkoutLogEntry};
use crate::repositories::WorkoutLogRepository;

const VIEW: &str = "workout";

pub struct WorkoutTrackerView<R> {
    store: Arc<R>,
    date: NaiveDate,
    entries: Vec<WorkoutLogEntry>,
    notice: Option<Notice>,
}

impl<R: WorkoutLogRepository> WorkoutTrackerView<R> {
    pub fn new(store: Arc<R>, date: NaiveDate) -> Self {
        Self {
            store,
            date,
            entries: vec![],
            notice: None,
        }
    }

    pub fn entries(&self) -> &[WorkoutLogEntry] {
        &self.entries
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Sum of the calories reported on the day's workouts
    pub fn calories_burned(&self) -> f64 {
        self.entries.iter().filter_map(|entry| entry.calories_burned).sum()
    }

    pub async fn refresh(&mut self) -> TrackerResult<()> {
        let fetched = self.store.workout_entries(self.date).await;
        if let Some(entries) = settle(VIEW, "load workouts", fetched, &mut self.notice) {
            self.entries = entries;
        }
        Ok(())
    }

    pub async fn add(&mut self, entry: NewWorkoutEntry) -> TrackerResult<()> {
        entry.validate()?;
        let created = self.store.create_workout_entry(&entry).await;
        if settle_mutation(VIEW, "log workout", created, &mut self.notice).is_some() {
            self.refresh().await?;
        }
        Ok(())
    }

    pub async fn delete(&mut self, id: &str) -> TrackerResult<()> {
        require_id(id)?;
        let deleted = self.store.delete_workout_entry(id).await;
        if settle_mutation(VIEW, "delete workout", deleted, &mut self.notice).is_some() {
            self.refresh().await?;
        }
        Ok(())
    }
}
