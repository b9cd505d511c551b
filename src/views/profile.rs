// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::sync::Arc;

use super::{settle, settle_mutation, Notice};
use crate::errors::{TrackerError, TrackerResult};
use crate::metrics::{goal_weight, round_to, BodyMetrics, BodyMetricsInput};
use crate::models::{Gender, ProfileUpdate, UserProfile};
use crate::repositories::ProfileRepository;

const VIEW: &str = "profile";

/// Profile editor with local body metrics
pub struct ProfileView<R> {
    store: Arc<R>,
    profile: Option<UserProfile>,
    notice: Option<Notice>,
}

impl<R: ProfileRepository> ProfileView<R> {
    pub fn new(store: Arc<R>) -> Self {
        Self {
            store,
            profile: None,
            notice: None,
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub async fn refresh(&mut self) -> TrackerResult<()> {
        let fetched = self.store.profile().await;
        if let Some(profile) = settle(VIEW, "load profile", fetched, &mut self.notice) {
            self.profile = Some(profile);
        }
        Ok(())
    }

    /// Send only the fields present in `update`, then reload
    pub async fn update(&mut self, update: ProfileUpdate) -> TrackerResult<()> {
        update.validate()?;
        let saved = self.store.update_profile(&update).await;
        if settle_mutation(VIEW, "update profile", saved, &mut self.notice).is_some() {
            self.refresh().await?;
        }
        Ok(())
    }

    /// Goal weight at BMI 22, rounded to one decimal
    ///
    /// Offered only once both height and current weight are on the profile.
    pub fn suggested_goal_weight(&self) -> TrackerResult<f64> {
        let profile = self.loaded()?;
        match (profile.height_cm, profile.current_weight_kg) {
            (Some(height_cm), Some(_)) => Ok(round_to(goal_weight(height_cm)?, 1)),
            _ => Err(TrackerError::validation(
                "height and current weight are needed to suggest a goal weight",
            )),
        }
    }

    /// Store the suggested goal weight on the profile
    pub async fn apply_suggested_goal_weight(&mut self) -> TrackerResult<f64> {
        let suggested = self.suggested_goal_weight()?;
        self.update(ProfileUpdate {
            goal_weight_kg: Some(suggested),
            ..Default::default()
        })
        .await?;
        Ok(suggested)
    }

    pub fn body_metrics(&self, gender: Gender) -> TrackerResult<BodyMetrics> {
        let input = BodyMetricsInput::from_profile(self.loaded()?, gender)?;
        BodyMetrics::compute(&input)
    }

    fn loaded(&self) -> TrackerResult<&UserProfile> {
        self.profile
            .as_ref()
            .ok_or_else(|| TrackerError::validation("profile has not been loaded"))
    }
}
