// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::sync::Arc;

use super::{settle, settle_mutation, Notice};
use crate::errors::TrackerResult;
use crate::metrics::WeightTrend;
use crate::models::{NewWeightEntry, WeightLogEntry};
use crate::repositories::WeightLogRepository;

const VIEW: &str = "weight";

/// Body-weight history and its trend
pub struct WeightView<R> {
    store: Arc<R>,
    entries: Vec<WeightLogEntry>,
    trend: WeightTrend,
    notice: Option<Notice>,
}

impl<R: WeightLogRepository> WeightView<R> {
    pub fn new(store: Arc<R>) -> Self {
        Self {
            store,
            entries: vec![],
            trend: WeightTrend::default(),
            notice: None,
        }
    }

    /// Readings in the order the server returned them
    pub fn entries(&self) -> &[WeightLogEntry] {
        &self.entries
    }

    pub fn trend(&self) -> &WeightTrend {
        &self.trend
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub async fn refresh(&mut self) -> TrackerResult<()> {
        let fetched = self.store.weight_entries().await;
        if let Some(entries) = settle(VIEW, "load weight log", fetched, &mut self.notice) {
            self.trend = WeightTrend::from_entries(&entries);
            self.entries = entries;
        }
        Ok(())
    }

    pub async fn add(&mut self, entry: NewWeightEntry) -> TrackerResult<()> {
        entry.validate()?;
        let created = self.store.create_weight_entry(&entry).await;
        if settle_mutation(VIEW, "log weight", created, &mut self.notice).is_some() {
            self.refresh().await?;
        }
        Ok(())
    }
}
