// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::sync::Arc;

use super::{settle, Notice};
use crate::errors::TrackerResult;
use crate::models::{LibraryFilter, WorkoutVideo};
use crate::repositories::WorkoutCatalog;

const VIEW: &str = "library";

pub struct WorkoutLibraryView<R> {
    store: Arc<R>,
    filter: LibraryFilter,
    videos: Vec<WorkoutVideo>,
    notice: Option<Notice>,
}

impl<R: WorkoutCatalog> WorkoutLibraryView<R> {
    pub fn new(store: Arc<R>) -> Self {
        Self {
            store,
            filter: LibraryFilter::default(),
            videos: vec![],
            notice: None,
        }
    }

    pub fn videos(&self) -> &[WorkoutVideo] {
        &self.videos
    }

    pub fn filter(&self) -> &LibraryFilter {
        &self.filter
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub async fn refresh(&mut self) -> TrackerResult<()> {
        let fetched = self.store.workout_library(&self.filter).await;
        if let Some(videos) = settle(VIEW, "load workout library", fetched, &mut self.notice) {
            self.videos = videos;
        }
        Ok(())
    }

    pub async fn apply_filter(&mut self, filter: LibraryFilter) -> TrackerResult<()> {
        self.filter = filter;
        self.refresh().await
    }
}
