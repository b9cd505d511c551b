// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Integration tests for the REST client
//!
//! These tests verify request shapes, response decoding, ingress checks
//! and error mapping against mocked HTTP endpoints.

use anyhow::Result;
use chrono::NaiveDate;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use fitness_tracker::config::ApiConfig;
use fitness_tracker::errors::{ErrorKind, TrackerError};
use fitness_tracker::metrics::{bmi, round_to, BmiCategory};
use fitness_tracker::models::{
    ActivityLevel, CalculatorRequest, DietPlanRequest, FitnessGoal, Gender, InsightKind, LibraryFilter, MealType,
    NewFoodEntry, NewWaterEntry, NewWorkoutEntry, ProfileUpdate,
};
use fitness_tracker::repositories::{
    AnalyticsRepository, DietCoach, FoodAnalyzer, FoodLogRepository, ProfileRepository, RestClient,
    WaterLogRepository, WeightLogRepository, WorkoutCatalog, WorkoutLogRepository,
};

const TOKEN: &str = "test-token";

fn client_for(server: &ServerGuard) -> RestClient {
    RestClient::new(&format!("{}/api", server.url()))
        .expect("valid mock server url")
        .with_token(TOKEN)
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

/// Helper to create a mock food log response
fn mock_food_log_response() -> serde_json::Value {
    json!([
        {
            "id": "f-1",
            "user_id": "u-1",
            "food_name": "Greek yogurt",
            "calories": 150.0,
            "protein": 15.0,
            "carbs": 8.0,
            "fat": 4.0,
            "fiber": 0.0,
            "sugar": 6.0,
            "meal_type": "breakfast",
            "timestamp": "2024-01-15T07:45:12.345678"
        },
        {
            "id": "f-2",
            "user_id": "u-1",
            "food_name": "Chicken salad",
            "calories": 420.0,
            "protein": 38.0,
            "carbs": 12.0,
            "fat": 22.0,
            "meal_type": "lunch",
            "timestamp": "2024-01-15T12:30:00Z"
        }
    ])
}

#[tokio::test]
async fn test_food_entries_sends_date_and_token() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/food/log")
        .match_query(Matcher::UrlEncoded("date".into(), "2024-01-15".into()))
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(mock_food_log_response().to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let entries = client.food_entries(day()).await?;

    mock.assert_async().await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].meal_type, MealType::Breakfast);
    assert_eq!(entries[1].fiber, 0.0);
    assert_eq!(entries[1].timestamp.date_naive(), day());

    Ok(())
}

#[tokio::test]
async fn test_create_food_entry_posts_json() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/food/log")
        .match_body(Matcher::PartialJson(json!({
            "food_name": "Banana",
            "calories": 105.0,
            "meal_type": "snack"
        })))
        .with_status(200)
        .with_body(
            json!({
                "id": "f-9",
                "food_name": "Banana",
                "calories": 105.0,
                "protein": 1.3,
                "carbs": 27.0,
                "fat": 0.4,
                "fiber": 3.1,
                "sugar": 14.0,
                "meal_type": "snack",
                "timestamp": "2024-01-15T21:00:00"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let created = client
        .create_food_entry(&NewFoodEntry {
            food_name: "Banana".to_string(),
            calories: 105.0,
            protein: 1.3,
            carbs: 27.0,
            fat: 0.4,
            fiber: 3.1,
            sugar: 14.0,
            meal_type: MealType::Snack,
        })
        .await?;

    mock.assert_async().await;
    assert_eq!(created.id, "f-9");

    Ok(())
}

#[tokio::test]
async fn test_invalid_entry_never_reaches_server() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server.mock("POST", "/api/water/log").expect(0).create_async().await;

    let client = client_for(&server);
    let result = client.create_water_entry(&NewWaterEntry { amount_ml: 0.0 }).await;

    assert!(matches!(result, Err(TrackerError::Validation(_))));
    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_delete_maps_detail_of_rejection() -> Result<()> {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/api/workout/log/w-404")
        .with_status(404)
        .with_body(json!({"detail": "Log not found"}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let error = client.delete_workout_entry("w-404").await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::NetworkFailure);
    match error {
        TrackerError::Rejected { status, detail } => {
            assert_eq!(status, 404);
            assert_eq!(detail, "Log not found");
        }
        other => panic!("Expected rejection, got {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn test_water_day_decodes_logs_and_total() -> Result<()> {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/water/log")
        .match_query(Matcher::UrlEncoded("date".into(), "2024-01-15".into()))
        .with_status(200)
        .with_body(
            json!({
                "logs": [
                    {"id": "w-1", "user_id": "u-1", "amount_ml": 500.0, "timestamp": "2024-01-15T09:00:00"},
                    {"id": "w-2", "user_id": "u-1", "amount_ml": 750.0, "timestamp": "2024-01-15T13:00:00"}
                ],
                "total_ml": 1250.0
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let water = client.water_day(day()).await?;

    assert_eq!(water.logs.len(), 2);
    assert_eq!(water.total_ml, 1250.0);

    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_a_validation_error() -> Result<()> {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/workout/log")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let error = client.workout_entries(day()).await.unwrap_err();

    assert!(matches!(error, TrackerError::MalformedResponse(_)));
    assert_eq!(error.kind(), ErrorKind::ValidationError);

    Ok(())
}

#[tokio::test]
async fn test_create_workout_uses_wire_names() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/workout/log")
        .match_body(Matcher::Json(json!({
            "exercise_name": "Deadlift",
            "sets": 3,
            "reps": 5,
            "weight": 140.0
        })))
        .with_status(200)
        .with_body(
            json!({
                "id": "w-7",
                "exercise_name": "Deadlift",
                "sets": 3,
                "reps": 5,
                "weight": 140.0,
                "duration_minutes": null,
                "calories_burned": null,
                "notes": null,
                "timestamp": "2024-01-15T18:00:00"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let created = client
        .create_workout_entry(&NewWorkoutEntry {
            exercise_name: "Deadlift".to_string(),
            sets: 3,
            reps: 5,
            weight_kg: Some(140.0),
            duration_minutes: None,
            calories_burned: None,
            notes: None,
        })
        .await?;

    mock.assert_async().await;
    assert_eq!(created.weight_kg, Some(140.0));
    assert_eq!(created.duration_minutes, None);

    Ok(())
}

#[tokio::test]
async fn test_weight_entries() -> Result<()> {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/weight/log")
        .with_status(200)
        .with_body(
            json!([
                {"id": "b-2", "user_id": "u-1", "weight": 78.0, "body_fat_percentage": 17.5, "timestamp": "2024-01-15T07:00:00"},
                {"id": "b-1", "user_id": "u-1", "weight": 80.0, "body_fat_percentage": null, "timestamp": "2024-01-01T07:00:00"}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let entries = client.weight_entries().await?;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].weight_kg, 78.0);
    assert_eq!(entries[1].body_fat_percentage, None);

    Ok(())
}

#[tokio::test]
async fn test_progress_analytics() -> Result<()> {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/analytics/progress")
        .match_query(Matcher::UrlEncoded("days".into(), "30".into()))
        .with_status(200)
        .with_body(
            json!({
                "weight_trend": [
                    {"id": "b-1", "weight": 80.0, "timestamp": "2024-01-01T07:00:00"},
                    {"id": "b-2", "weight": 78.0, "timestamp": "2024-01-15T07:00:00"}
                ],
                "daily_nutrition": {
                    "2024-01-14": {"calories": 2100.0, "protein": 120.0, "carbs": 230.0, "fat": 70.0},
                    "2024-01-15": {"calories": 1900.0, "protein": 110.0, "carbs": 200.0, "fat": 65.0}
                },
                "total_workouts": 9,
                "avg_daily_calories": 2000.0
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let analytics = client.progress(30).await?;

    assert_eq!(analytics.weight_trend.len(), 2);
    assert_eq!(analytics.total_workouts, 9);
    let first_day = analytics.daily_nutrition.keys().next().copied();
    assert_eq!(first_day, NaiveDate::from_ymd_opt(2024, 1, 14));

    Ok(())
}

#[tokio::test]
async fn test_insights_feed() -> Result<()> {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/analytics/insights")
        .with_status(200)
        .with_body(
            json!({
                "insights": [
                    {"type": "warning", "message": "Your protein intake is below recommended levels."},
                    {"type": "success", "message": "Great hydration this week!"}
                ],
                "weekly_summary": {"avg_protein": 64.2, "avg_water": 2300.0}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let feed = client.insights().await?;

    assert_eq!(feed.insights[0].kind, InsightKind::Warning);
    assert_eq!(feed.insights[1].message, "Great hydration this week!");
    assert_eq!(feed.weekly_summary.map(|summary| summary.avg_water), Some(2300.0));

    Ok(())
}

#[tokio::test]
async fn test_profile_update_sends_only_present_fields() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/profile")
        .match_body(Matcher::Json(json!({"current_weight": 76.5, "activity_level": "active"})))
        .with_status(200)
        .with_body(json!({"message": "Profile updated successfully"}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    client
        .update_profile(&ProfileUpdate {
            current_weight_kg: Some(76.5),
            activity_level: Some(ActivityLevel::Active),
            ..Default::default()
        })
        .await?;

    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn test_analyze_food_uploads_multipart_file() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/food/analyze")
        .match_header("content-type", Matcher::Regex("multipart/form-data; boundary=.+".into()))
        .match_body(Matcher::Regex(r#"name="file"; filename="salad.png""#.into()))
        .with_status(200)
        .with_body(
            json!({
                "food_name": "Garden salad",
                "calories": 180.0,
                "protein": 6.0,
                "carbs": 14.0,
                "fat": 11.0,
                "fiber": 5.0,
                "sugar": 7.0,
                "confidence": "high",
                "timestamp": "2024-01-15T12:00:00"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let analysis = client.analyze_food(b"fake-image-bytes".to_vec(), "salad.png").await?;

    mock.assert_async().await;
    assert_eq!(analysis.food_name, "Garden salad");
    assert_eq!(analysis.confidence.as_deref(), Some("high"));

    Ok(())
}

#[tokio::test]
async fn test_analysis_with_negative_values_is_rejected() -> Result<()> {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/food/analyze")
        .with_status(200)
        .with_body(
            json!({
                "food_name": "Mystery",
                "calories": 200.0,
                "protein": -3.0,
                "carbs": 10.0,
                "fat": 5.0
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client.analyze_food(b"img".to_vec(), "mystery.jpg").await;

    assert!(matches!(result, Err(TrackerError::Validation(_))));

    Ok(())
}

#[tokio::test]
async fn test_diet_plan_ingress() -> Result<()> {
    let mut server = Server::new_async().await;
    let _valid = server
        .mock("POST", "/api/diet/plan")
        .match_body(Matcher::PartialJson(json!({"goal": "fat_loss"})))
        .with_status(200)
        .with_body(
            json!({
                "plan": "Moderate deficit with high protein.",
                "daily_calories": 1850,
                "macro_split": {"protein": 35, "carbs": 40, "fat": 25},
                "meal_suggestions": ["Egg white omelette", "Grilled chicken with quinoa"]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let _invalid = server
        .mock("POST", "/api/diet/plan")
        .match_body(Matcher::PartialJson(json!({"goal": "athlete"})))
        .with_status(200)
        .with_body(json!({"plan": "", "daily_calories": 0, "macro_split": {}}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let request = DietPlanRequest {
        goal: FitnessGoal::FatLoss,
        current_weight: 90.0,
        goal_weight: 80.0,
        activity_level: ActivityLevel::Light,
        dietary_preferences: None,
    };

    let plan = client.diet_plan(&request).await?;
    assert_eq!(plan.daily_calories, 1850);
    assert_eq!(plan.macro_split.protein, 35.0);
    assert_eq!(plan.meal_suggestions.len(), 2);

    let athlete = DietPlanRequest { goal: FitnessGoal::Athlete, ..request };
    assert!(matches!(client.diet_plan(&athlete).await, Err(TrackerError::Validation(_))));

    Ok(())
}

#[tokio::test]
async fn test_workout_library_filters() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/workout/library")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("muscle_group".into(), "legs".into()),
            Matcher::UrlEncoded("difficulty".into(), "beginner".into()),
        ]))
        .with_status(200)
        .with_body(
            json!([{
                "id": "v-1",
                "title": "Bodyweight Squats",
                "description": "Learn proper squat form",
                "duration_minutes": 10,
                "difficulty": "beginner",
                "muscle_group": "legs",
                "equipment": "None",
                "video_url": "https://videos.example.com/squats",
                "thumbnail_url": "https://videos.example.com/squats.jpg"
            }])
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let videos = client
        .workout_library(&LibraryFilter {
            muscle_group: Some("legs".to_string()),
            difficulty: Some("beginner".to_string()),
        })
        .await?;

    mock.assert_async().await;
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].title, "Bodyweight Squats");

    Ok(())
}

#[tokio::test]
async fn test_remote_bmi_matches_local_formula() -> Result<()> {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/calculator/bmi")
        .match_body(Matcher::Json(json!({"weight": 70.0, "height": 175.0})))
        .with_status(200)
        .with_body(json!({"bmi": 22.86, "category": "Normal"}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let request = CalculatorRequest {
        weight: 70.0,
        height: 175.0,
        age: None,
        gender: None,
        activity_level: None,
    };
    let remote = client.remote_bmi(&request).await?;
    let local = bmi(70.0, 175.0)?;

    assert_eq!(remote.bmi, round_to(local, 2));
    assert_eq!(remote.category, BmiCategory::from_bmi(local).label());

    let missing_age = client.remote_bmr(&CalculatorRequest { gender: Some(Gender::Male), ..request }).await;
    assert!(matches!(missing_age, Err(TrackerError::Validation(_))));

    Ok(())
}

#[tokio::test]
async fn test_client_from_config_without_token() -> Result<()> {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/profile")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_body(json!({"detail": "Not authenticated"}).to_string())
        .create_async()
        .await;

    let config = ApiConfig {
        base_url: format!("{}/api/", server.url()),
        token: None,
        timeout_seconds: 5,
    };
    let client = RestClient::from_config(&config)?;
    let error = client.profile().await.unwrap_err();

    mock.assert_async().await;
    assert!(error.is_network());
    assert!(error.to_string().contains("Not authenticated"));

    Ok(())
}
