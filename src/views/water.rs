// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use super::{settle, settle_mutation, Notice};
use crate::constants::hydration;
use crate::errors::{TrackerError, TrackerResult};
use crate::metrics::{total_water_ml, Clamp, GoalProgress, ProgressEngine, Remaining};
use crate::models::{NewWaterEntry, WaterLogEntry};
use crate::repositories::WaterLogRepository;

const VIEW: &str = "water";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterState {
    pub entries: Vec<WaterLogEntry>,
    pub total_ml: f64,
    /// Display-clamped progress against the water goal
    pub progress: GoalProgress,
}

/// Hydration log for one day
pub struct WaterTrackerView<R> {
    store: Arc<R>,
    engine: ProgressEngine,
    date: NaiveDate,
    state: WaterState,
    notice: Option<Notice>,
}

impl<R: WaterLogRepository> WaterTrackerView<R> {
    pub fn new(store: Arc<R>, engine: ProgressEngine, date: NaiveDate) -> TrackerResult<Self> {
        let progress = engine.water_progress(0.0, Clamp::Display)?;
        Ok(Self {
            store,
            engine,
            date,
            state: WaterState {
                entries: vec![],
                total_ml: 0.0,
                progress,
            },
            notice: None,
        })
    }

    pub fn state(&self) -> &WaterState {
        &self.state
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub async fn refresh(&mut self) -> TrackerResult<()> {
        let fetched = self.store.water_day(self.date).await;
        let Some(day) = settle(VIEW, "load water log", fetched, &mut self.notice) else {
            return Ok(());
        };

        let total_ml = if day.logs.is_empty() {
            day.total_ml
        } else {
            total_water_ml(&day.logs)
        };
        self.state = WaterState {
            progress: self.engine.water_progress(total_ml, Clamp::Display)?,
            entries: day.logs,
            total_ml,
        };
        Ok(())
    }

    pub async fn add(&mut self, amount_ml: f64) -> TrackerResult<()> {
        let entry = NewWaterEntry { amount_ml };
        entry.validate()?;

        let created = self.store.create_water_entry(&entry).await;
        if settle_mutation(VIEW, "log water", created, &mut self.notice).is_some() {
            self.refresh().await?;
        }
        Ok(())
    }

    /// Add one of the preset amounts (250, 500, 750 or 1000 ml)
    pub async fn quick_add(&mut self, amount_ml: f64) -> TrackerResult<()> {
        if !hydration::QUICK_AMOUNTS_ML.contains(&amount_ml) {
            return Err(TrackerError::validation(format!(
                "{} ml is not a quick-add amount",
                amount_ml
            )));
        }
        self.add(amount_ml).await
    }

    /// Unclamped percentage, for the textual readout
    pub fn raw_percent(&self) -> TrackerResult<f64> {
        Ok(self.engine.water_progress(self.state.total_ml, Clamp::Raw)?.percent)
    }

    pub fn status_line(&self) -> String {
        match self.state.progress.remaining {
            Remaining::GoalReached => "Goal achieved!".to_string(),
            Remaining::Left(amount) => format!("{:.0}ml remaining", amount),
        }
    }
}
