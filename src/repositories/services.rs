// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Analytics, profile, catalog and the AI-backed endpoints.
//!
//! Responses of the food-recognition and diet-planning services are checked
//! on ingress; anything with a missing field or an impossible value is
//! reported as a validation error instead of reaching the views.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use super::rest::{image_mime, RestClient};
use super::{AnalyticsRepository, DietCoach, FoodAnalyzer, ProfileRepository, WorkoutCatalog};
use crate::constants::routes;
use crate::errors::{TrackerError, TrackerResult};
use crate::models::{
    CalculatorRequest, DietPlan, DietPlanRequest, FoodAnalysis, InsightFeed, LibraryFilter, ProfileUpdate,
    ProgressAnalytics, RawDietPlan, RemoteBmi, RemoteBmr, RemoteTdee, UserProfile, WorkoutVideo,
};

#[async_trait]
impl AnalyticsRepository for RestClient {
    async fn progress(&self, days: u32) -> TrackerResult<ProgressAnalytics> {
        if days == 0 {
            return Err(TrackerError::validation("analytics window must cover at least one day"));
        }
        let analytics: ProgressAnalytics = self
            .get_json(routes::ANALYTICS_PROGRESS, &[("days", days.to_string())])
            .await?;
        debug!(
            days = days,
            weight_points = analytics.weight_trend.len(),
            nutrition_days = analytics.daily_nutrition.len(),
            "Fetched progress analytics"
        );
        Ok(analytics)
    }

    async fn insights(&self) -> TrackerResult<InsightFeed> {
        self.get_json(routes::ANALYTICS_INSIGHTS, &[]).await
    }
}

#[async_trait]
impl ProfileRepository for RestClient {
    async fn profile(&self) -> TrackerResult<UserProfile> {
        self.get_json(routes::PROFILE, &[]).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> TrackerResult<()> {
        update.validate()?;
        self.put_json(routes::PROFILE, update).await
    }
}

#[async_trait]
impl FoodAnalyzer for RestClient {
    async fn analyze_food(&self, image: Vec<u8>, file_name: &str) -> TrackerResult<FoodAnalysis> {
        if image.is_empty() {
            return Err(TrackerError::validation("image must not be empty"));
        }

        let size = image.len();
        let part = Part::bytes(image)
            .file_name(file_name.to_string())
            .mime_str(image_mime(file_name))?;
        let form = Form::new().part("file", part);

        let analysis: FoodAnalysis = self.post_multipart(routes::FOOD_ANALYZE, form).await?;
        analysis.validate()?;

        info!(
            file.name = %file_name,
            file.size = size,
            food.name = %analysis.food_name,
            "Food image analyzed"
        );
        Ok(analysis)
    }
}

#[async_trait]
impl DietCoach for RestClient {
    async fn diet_plan(&self, request: &DietPlanRequest) -> TrackerResult<DietPlan> {
        request.validate()?;
        let raw: RawDietPlan = self.post_json(routes::DIET_PLAN, request).await?;
        DietPlan::try_from(raw)
    }
}

#[async_trait]
impl WorkoutCatalog for RestClient {
    async fn workout_library(&self, filter: &LibraryFilter) -> TrackerResult<Vec<WorkoutVideo>> {
        self.get_json(routes::WORKOUT_LIBRARY, &filter.query_pairs()).await
    }
}

/// Server-side calculators. The local formulas in `metrics::body` give the
/// same results and are used by the views; these exist for cross-checking.
impl RestClient {
    pub async fn remote_bmi(&self, request: &CalculatorRequest) -> TrackerResult<RemoteBmi> {
        self.post_json(routes::CALCULATOR_BMI, request).await
    }

    pub async fn remote_bmr(&self, request: &CalculatorRequest) -> TrackerResult<RemoteBmr> {
        if request.age.is_none() || request.gender.is_none() {
            return Err(TrackerError::validation("age and gender are required for BMR"));
        }
        self.post_json(routes::CALCULATOR_BMR, request).await
    }

    pub async fn remote_tdee(&self, request: &CalculatorRequest) -> TrackerResult<RemoteTdee> {
        if request.age.is_none() || request.gender.is_none() || request.activity_level.is_none() {
            return Err(TrackerError::validation(
                "age, gender and activity level are required for TDEE",
            ));
        }
        self.post_json(routes::CALCULATOR_TDEE, request).await
    }
}
