// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::sync::Arc;

use super::{settle, Notice};
use crate::errors::TrackerResult;
use crate::models::{DietPlan, DietPlanRequest};
use crate::repositories::DietCoach;

const VIEW: &str = "diet";

pub struct DietCoachView<R> {
    store: Arc<R>,
    plan: Option<DietPlan>,
    notice: Option<Notice>,
}

impl<R: DietCoach> DietCoachView<R> {
    pub fn new(store: Arc<R>) -> Self {
        Self {
            store,
            plan: None,
            notice: None,
        }
    }

    pub fn plan(&self) -> Option<&DietPlan> {
        self.plan.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Ask for a new plan; the previous one stays if the request fails
    pub async fn request(&mut self, request: DietPlanRequest) -> TrackerResult<()> {
        request.validate()?;
        let generated = self.store.diet_plan(&request).await;
        if let Some(plan) = settle(VIEW, "generate diet plan", generated, &mut self.notice) {
            self.plan = Some(plan);
        }
        Ok(())
    }
}
