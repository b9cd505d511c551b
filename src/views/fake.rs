// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! In-memory store used by the view tests

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::errors::{TrackerError, TrackerResult};
use crate::models::*;
use crate::repositories::*;

pub(crate) struct FakeStore {
    pub now: DateTime<Utc>,
    pub food: Mutex<Vec<FoodLogEntry>>,
    pub water: Mutex<Vec<WaterLogEntry>>,
    pub workouts: Mutex<Vec<WorkoutLogEntry>>,
    pub weights: Mutex<Vec<WeightLogEntry>>,
    pub profile: Mutex<Option<UserProfile>>,
    pub analytics: Mutex<ProgressAnalytics>,
    pub insights: Mutex<InsightFeed>,
    pub analysis: Mutex<Option<FoodAnalysis>>,
    pub library: Mutex<Vec<WorkoutVideo>>,
    pub offline: AtomicBool,
    pub insights_offline: AtomicBool,
    pub reads: AtomicUsize,
    next_id: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            now: Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap(),
            food: Mutex::new(vec![]),
            water: Mutex::new(vec![]),
            workouts: Mutex::new(vec![]),
            weights: Mutex::new(vec![]),
            profile: Mutex::new(None),
            analytics: Mutex::new(ProgressAnalytics::default()),
            insights: Mutex::new(InsightFeed::default()),
            analysis: Mutex::new(None),
            library: Mutex::new(vec![]),
            offline: AtomicBool::new(false),
            insights_offline: AtomicBool::new(false),
            reads: AtomicUsize::new(0),
            next_id: AtomicUsize::new(1),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn online(&self) -> TrackerResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(TrackerError::Rejected { status: 503, detail: "offline".to_string() });
        }
        Ok(())
    }

    fn read(&self) -> TrackerResult<()> {
        self.online()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn id(&self) -> String {
        format!("id-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    pub fn food_entry(&self, name: &str, calories: f64, protein: f64) -> FoodLogEntry {
        FoodLogEntry {
            id: self.id(),
            food_name: name.to_string(),
            calories,
            protein,
            carbs: 20.0,
            fat: 10.0,
            fiber: 0.0,
            sugar: 0.0,
            meal_type: MealType::Lunch,
            timestamp: self.now,
        }
    }
}

#[async_trait]
impl FoodLogRepository for FakeStore {
    async fn food_entries(&self, date: NaiveDate) -> TrackerResult<Vec<FoodLogEntry>> {
        self.read()?;
        let entries = self.food.lock().unwrap();
        Ok(entries.iter().filter(|entry| entry.timestamp.date_naive() == date).cloned().collect())
    }

    async fn create_food_entry(&self, entry: &NewFoodEntry) -> TrackerResult<FoodLogEntry> {
        self.online()?;
        let created = FoodLogEntry {
            id: self.id(),
            food_name: entry.food_name.clone(),
            calories: entry.calories,
            protein: entry.protein,
            carbs: entry.carbs,
            fat: entry.fat,
            fiber: entry.fiber,
            sugar: entry.sugar,
            meal_type: entry.meal_type,
            timestamp: self.now,
        };
        self.food.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_food_entry(&self, id: &str) -> TrackerResult<()> {
        self.online()?;
        let mut entries = self.food.lock().unwrap();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return Err(TrackerError::Rejected { status: 404, detail: "Log not found".to_string() });
        }
        Ok(())
    }
}

#[async_trait]
impl WaterLogRepository for FakeStore {
    async fn water_day(&self, date: NaiveDate) -> TrackerResult<WaterLogDay> {
        self.read()?;
        let logs: Vec<WaterLogEntry> = self
            .water
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.timestamp.date_naive() == date)
            .cloned()
            .collect();
        Ok(WaterLogDay { total_ml: logs.iter().map(|entry| entry.amount_ml).sum(), logs })
    }

    async fn create_water_entry(&self, entry: &NewWaterEntry) -> TrackerResult<WaterLogEntry> {
        self.online()?;
        let created = WaterLogEntry { id: self.id(), amount_ml: entry.amount_ml, timestamp: self.now };
        self.water.lock().unwrap().push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl WorkoutLogRepository for FakeStore {
    async fn workout_entries(&self, date: NaiveDate) -> TrackerResult<Vec<WorkoutLogEntry>> {
        self.read()?;
        let entries = self.workouts.lock().unwrap();
        Ok(entries.iter().filter(|entry| entry.timestamp.date_naive() == date).cloned().collect())
    }

    async fn create_workout_entry(&self, entry: &NewWorkoutEntry) -> TrackerResult<WorkoutLogEntry> {
        self.online()?;
        let created = WorkoutLogEntry {
            id: self.id(),
            exercise_name: entry.exercise_name.clone(),
            sets: entry.sets,
            reps: entry.reps,
            weight_kg: entry.weight_kg,
            duration_minutes: entry.duration_minutes,
            calories_burned: entry.calories_burned,
            notes: entry.notes.clone(),
            timestamp: self.now,
        };
        self.workouts.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_workout_entry(&self, id: &str) -> TrackerResult<()> {
        self.online()?;
        self.workouts.lock().unwrap().retain(|entry| entry.id != id);
        Ok(())
    }
}

#[async_trait]
impl WeightLogRepository for FakeStore {
    async fn weight_entries(&self) -> TrackerResult<Vec<WeightLogEntry>> {
        self.read()?;
        let mut entries = self.weights.lock().unwrap().clone();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    async fn create_weight_entry(&self, entry: &NewWeightEntry) -> TrackerResult<WeightLogEntry> {
        self.online()?;
        let created = WeightLogEntry {
            id: self.id(),
            weight_kg: entry.weight_kg,
            body_fat_percentage: entry.body_fat_percentage,
            timestamp: self.now,
        };
        self.weights.lock().unwrap().push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl AnalyticsRepository for FakeStore {
    async fn progress(&self, _days: u32) -> TrackerResult<ProgressAnalytics> {
        self.read()?;
        Ok(self.analytics.lock().unwrap().clone())
    }

    async fn insights(&self) -> TrackerResult<InsightFeed> {
        self.read()?;
        if self.insights_offline.load(Ordering::SeqCst) {
            return Err(TrackerError::Rejected { status: 500, detail: "insights unavailable".to_string() });
        }
        Ok(self.insights.lock().unwrap().clone())
    }
}

#[async_trait]
impl ProfileRepository for FakeStore {
    async fn profile(&self) -> TrackerResult<UserProfile> {
        self.read()?;
        self.profile
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| TrackerError::Rejected { status: 404, detail: "User not found".to_string() })
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> TrackerResult<()> {
        self.online()?;
        let mut guard = self.profile.lock().unwrap();
        let profile = guard
            .as_mut()
            .ok_or_else(|| TrackerError::Rejected { status: 404, detail: "User not found".to_string() })?;
        if let Some(name) = &update.name {
            profile.name = name.clone();
        }
        if update.age.is_some() {
            profile.age = update.age;
        }
        if update.height_cm.is_some() {
            profile.height_cm = update.height_cm;
        }
        if update.current_weight_kg.is_some() {
            profile.current_weight_kg = update.current_weight_kg;
        }
        if update.goal_weight_kg.is_some() {
            profile.goal_weight_kg = update.goal_weight_kg;
        }
        if let Some(level) = update.activity_level {
            profile.activity_level = level;
        }
        if let Some(goal) = update.goal {
            profile.goal = goal;
        }
        Ok(())
    }
}

#[async_trait]
impl FoodAnalyzer for FakeStore {
    async fn analyze_food(&self, _image: Vec<u8>, _file_name: &str) -> TrackerResult<FoodAnalysis> {
        self.online()?;
        let analysis = self
            .analysis
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| TrackerError::Rejected { status: 500, detail: "Analysis failed".to_string() })?;
        analysis.validate()?;
        Ok(analysis)
    }
}

#[async_trait]
impl DietCoach for FakeStore {
    async fn diet_plan(&self, request: &DietPlanRequest) -> TrackerResult<DietPlan> {
        self.online()?;
        let daily_calories = if request.goal == FitnessGoal::FatLoss { 1800.0 } else { 2000.0 };
        DietPlan::try_from(RawDietPlan {
            plan: format!("Plan for {}", request.goal),
            daily_calories,
            macro_split: [("protein", 30.0), ("carbs", 40.0), ("fat", 30.0)]
                .into_iter()
                .map(|(name, share)| (name.to_string(), share))
                .collect(),
            meal_suggestions: vec!["Oats".to_string()],
        })
    }
}

#[async_trait]
impl WorkoutCatalog for FakeStore {
    async fn workout_library(&self, filter: &LibraryFilter) -> TrackerResult<Vec<WorkoutVideo>> {
        self.read()?;
        let videos = self.library.lock().unwrap();
        Ok(videos
            .iter()
            .filter(|video| filter.muscle_group.as_ref().map_or(true, |group| &video.muscle_group == group))
            .filter(|video| filter.difficulty.as_ref().map_or(true, |level| &video.difficulty == level))
            .cloned()
            .collect())
    }
}
