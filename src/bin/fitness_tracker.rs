// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Timelike, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use fitness_tracker::config::{ApiConfig, Config, GoalConfig};
use fitness_tracker::logging;
use fitness_tracker::metrics::{render_lines, round_to, BodyMetrics, BodyMetricsInput, ProgressEngine};
use fitness_tracker::models::{
    ActivityLevel, DietPlanRequest, FitnessGoal, Gender, LibraryFilter, MealType, NewFoodEntry, NewWeightEntry,
    NewWorkoutEntry, ProfileUpdate,
};
use fitness_tracker::repositories::RestClient;
use fitness_tracker::views::{
    AnalyticsView, DashboardView, DietCoachView, FoodTrackerView, Notice, ProfileView, WaterTrackerView,
    WeightView, WorkoutLibraryView, WorkoutTrackerView,
};

#[derive(Parser)]
#[command(name = "fitness-tracker")]
#[command(author, version, about = "Track food, water, workouts and weight against your goals")]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Standalone goals file (TOML) overriding the configured goals
    #[arg(long, global = true)]
    goals: Option<String>,

    /// Day to show or log against, YYYY-MM-DD (defaults to today, UTC)
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or inspect the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Today's totals, progress and insights
    Dashboard,
    /// Food diary
    Food {
        #[command(subcommand)]
        action: FoodAction,
    },
    /// Hydration log
    Water {
        #[command(subcommand)]
        action: WaterAction,
    },
    /// Workout log
    Workout {
        #[command(subcommand)]
        action: WorkoutAction,
    },
    /// Body-weight log
    Weight {
        #[command(subcommand)]
        action: WeightAction,
    },
    /// Weight trend and nutrition history
    Analytics {
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// User profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// BMI, BMR and TDEE from explicit values
    Metrics {
        /// Weight in kg
        #[arg(long)]
        weight: f64,
        /// Height in cm
        #[arg(long)]
        height: f64,
        #[arg(long)]
        age: u32,
        #[arg(long, default_value = "male")]
        gender: Gender,
        #[arg(long, default_value = "moderate")]
        activity: ActivityLevel,
    },
    /// Browse workout videos
    Library {
        #[arg(long)]
        muscle_group: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
    },
    /// Ask the diet coach for a plan
    DietPlan {
        #[arg(long, default_value = "maintenance")]
        goal: FitnessGoal,
        #[arg(long)]
        current_weight: f64,
        #[arg(long)]
        goal_weight: f64,
        #[arg(long, default_value = "moderate")]
        activity: ActivityLevel,
        #[arg(long)]
        preferences: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a new configuration file
    Init {
        #[arg(long)]
        base_url: String,
        #[arg(long)]
        token: Option<String>,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

#[derive(Subcommand)]
enum FoodAction {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        calories: f64,
        #[arg(long, default_value_t = 0.0)]
        protein: f64,
        #[arg(long, default_value_t = 0.0)]
        carbs: f64,
        #[arg(long, default_value_t = 0.0)]
        fat: f64,
        #[arg(long, default_value_t = 0.0)]
        fiber: f64,
        #[arg(long, default_value_t = 0.0)]
        sugar: f64,
        /// Meal slot; inferred from the current hour when omitted
        #[arg(long)]
        meal: Option<MealType>,
    },
    Delete {
        id: String,
    },
    /// Estimate nutrition from a photo
    Analyze {
        image: PathBuf,
        /// Log the estimate right away
        #[arg(long)]
        log: bool,
    },
}

#[derive(Subcommand)]
enum WaterAction {
    Show,
    Add {
        /// Amount in ml (quick amounts: 250, 500, 750, 1000)
        amount_ml: f64,
    },
}

#[derive(Subcommand)]
enum WorkoutAction {
    List,
    Add {
        #[arg(long)]
        exercise: String,
        #[arg(long)]
        sets: u32,
        #[arg(long)]
        reps: u32,
        /// Load in kg
        #[arg(long)]
        weight: Option<f64>,
        /// Duration in minutes
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        calories: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum WeightAction {
    List,
    Add {
        /// Weight in kg
        weight: f64,
        #[arg(long)]
        body_fat: Option<f64>,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    Show {
        /// Sex used for BMR, which the profile does not store
        #[arg(long, default_value = "male")]
        gender: Gender,
    },
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        height: Option<f64>,
        #[arg(long)]
        current_weight: Option<f64>,
        #[arg(long)]
        goal_weight: Option<f64>,
        #[arg(long)]
        activity: Option<ActivityLevel>,
        #[arg(long)]
        goal: Option<FitnessGoal>,
    },
    /// Suggest a goal weight at BMI 22
    GoalWeight {
        /// Save the suggestion to the profile
        #[arg(long)]
        apply: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env()?;

    let cli = Cli::parse();
    if let Commands::Config { action: ConfigAction::Init { base_url, token, force } } = &cli.command {
        return init_config(cli.config.clone(), cli.goals.as_deref(), base_url, token.clone(), *force);
    }

    let mut config = Config::load(cli.config).context("Failed to load configuration")?;
    if let Some(path) = &cli.goals {
        config = config.with_goals_file(path)?;
    }
    let store = Arc::new(RestClient::from_config(&config.api)?);
    let engine = ProgressEngine::new(config.goals.clone())?;
    let date = cli.date.unwrap_or_else(|| Utc::now().date_naive());

    info!(api = %store.base_url(), date = %date, "Starting fitness tracker");

    match cli.command {
        // init runs before any configuration is loaded
        Commands::Config { action: ConfigAction::Init { .. } } => {}
        Commands::Config { action: ConfigAction::Show } => show_config(&config),
        Commands::Dashboard => show_dashboard(store, engine, date).await?,
        Commands::Food { action } => run_food(store, date, action).await?,
        Commands::Water { action } => run_water(store, engine, date, action).await?,
        Commands::Workout { action } => run_workout(store, date, action).await?,
        Commands::Weight { action } => run_weight(store, action).await?,
        Commands::Analytics { days } => show_analytics(store, days).await?,
        Commands::Profile { action } => run_profile(store, action).await?,
        Commands::Metrics { weight, height, age, gender, activity } => {
            let metrics = BodyMetrics::compute(&BodyMetricsInput {
                weight_kg: weight,
                height_cm: height,
                age,
                gender,
                activity_level: activity,
            })?;
            print_metrics(&metrics);
        }
        Commands::Library { muscle_group, difficulty } => {
            let mut view = WorkoutLibraryView::new(store);
            view.apply_filter(LibraryFilter { muscle_group, difficulty }).await?;
            report(view.take_notice());
            for video in view.videos() {
                println!(
                    "{} ({} min, {}, {}) {}",
                    video.title, video.duration_minutes, video.difficulty, video.muscle_group, video.video_url
                );
            }
        }
        Commands::DietPlan { goal, current_weight, goal_weight, activity, preferences } => {
            let mut view = DietCoachView::new(store);
            view.request(DietPlanRequest {
                goal,
                current_weight,
                goal_weight,
                activity_level: activity,
                dietary_preferences: preferences,
            })
            .await?;
            report(view.take_notice());
            if let Some(plan) = view.plan() {
                println!("{}", plan.plan);
                println!("Daily calories: {}", plan.daily_calories);
                println!(
                    "Macros: protein {}%, carbs {}%, fat {}%",
                    plan.macro_split.protein, plan.macro_split.carbs, plan.macro_split.fat
                );
                for suggestion in &plan.meal_suggestions {
                    println!("  - {}", suggestion);
                }
            }
        }
    }

    Ok(())
}

fn init_config(
    path: Option<String>,
    goals_path: Option<&str>,
    base_url: &str,
    token: Option<String>,
    force: bool,
) -> Result<()> {
    RestClient::new(base_url).context("Invalid API root")?;

    let mut config = Config {
        api: ApiConfig { base_url: base_url.to_string(), token, ..ApiConfig::default() },
        goals: GoalConfig::default(),
    };
    if let Some(goals_path) = goals_path {
        config = config.with_goals_file(goals_path)?;
    }

    let written = config.create(path, force)?;
    println!("Wrote {}", written);
    Ok(())
}

fn show_config(config: &Config) {
    println!("API: {}", config.api.base_url);
    println!("Token: {}", if config.api.token.is_some() { "set" } else { "not set" });
    println!("Timeout: {} s", config.api.timeout_seconds);
    println!("Calorie goal: {} kcal", config.goals.calorie_goal_kcal);
    println!("Water goal: {} ml", config.goals.water_goal_ml);
    let targets = &config.goals.macro_targets;
    println!("Macro targets: protein {} g, carbs {} g, fat {} g", targets.protein_g, targets.carbs_g, targets.fat_g);
}

fn report(notice: Option<Notice>) {
    if let Some(notice) = notice {
        eprintln!("{}", notice);
    }
}

async fn show_dashboard(store: Arc<RestClient>, engine: ProgressEngine, date: NaiveDate) -> Result<()> {
    let mut view = DashboardView::new(store, engine);
    view.refresh(date).await?;
    report(view.take_notice());

    let Some(state) = view.state() else {
        return Ok(());
    };

    println!("Dashboard for {}", date);
    println!(
        "Calories: {} kcal ({:.0}% of goal) - {}",
        state.totals.total_calories,
        state.progress.calorie_progress_pct,
        state.calorie_status()
    );
    println!(
        "Protein: {} g{}",
        state.totals.total_protein,
        if state.protein_on_track { " (On track)" } else { "" }
    );
    println!("Carbs: {} g, Fat: {} g", state.totals.total_carbs, state.totals.total_fat);
    println!("Water: {} ml ({:.0}%)", state.water_ml, state.progress.water_progress_pct);
    println!("Workouts: {}", state.workout_count);
    for line in render_lines(&state.insights) {
        println!("{}", line);
    }
    Ok(())
}

async fn run_food(store: Arc<RestClient>, date: NaiveDate, action: FoodAction) -> Result<()> {
    let mut view = FoodTrackerView::new(store, date);
    let local_hour = Local::now().hour();

    match action {
        FoodAction::List => view.refresh().await?,
        FoodAction::Add { name, calories, protein, carbs, fat, fiber, sugar, meal } => {
            view.add(NewFoodEntry {
                food_name: name,
                calories,
                protein,
                carbs,
                fat,
                fiber,
                sugar,
                meal_type: meal.unwrap_or_else(|| MealType::for_hour(local_hour)),
            })
            .await?
        }
        FoodAction::Delete { id } => view.delete(&id).await?,
        FoodAction::Analyze { image, log } => {
            let bytes = tokio::fs::read(&image)
                .await
                .with_context(|| format!("Failed to read {}", image.display()))?;
            let file_name = image
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| "image.jpg".to_string());

            if let Some(analysis) = view.analyze(bytes, &file_name).await? {
                println!(
                    "{}: {} kcal, {} g protein, {} g carbs, {} g fat",
                    analysis.food_name, analysis.calories, analysis.protein, analysis.carbs, analysis.fat
                );
            }
            if log {
                view.log_analysis(local_hour).await?;
            }
        }
    }
    report(view.take_notice());

    let state = view.state();
    for entry in &state.entries {
        println!("[{}] {} {} - {} kcal", entry.id, entry.meal_type, entry.food_name, entry.calories);
    }
    if !state.entries.is_empty() {
        println!(
            "Total: {} kcal, {} g protein, {} g carbs, {} g fat",
            round_to(state.summary.total_calories, 0),
            round_to(state.summary.total_protein, 0),
            round_to(state.summary.total_carbs, 0),
            round_to(state.summary.total_fat, 0)
        );
    }
    Ok(())
}

async fn run_water(store: Arc<RestClient>, engine: ProgressEngine, date: NaiveDate, action: WaterAction) -> Result<()> {
    let mut view = WaterTrackerView::new(store, engine, date)?;

    match action {
        WaterAction::Show => view.refresh().await?,
        WaterAction::Add { amount_ml } => view.add(amount_ml).await?,
    }
    report(view.take_notice());

    println!(
        "Water: {} ml ({:.0}%) - {}",
        view.state().total_ml,
        view.raw_percent()?,
        view.status_line()
    );
    Ok(())
}

async fn run_workout(store: Arc<RestClient>, date: NaiveDate, action: WorkoutAction) -> Result<()> {
    let mut view = WorkoutTrackerView::new(store, date);

    match action {
        WorkoutAction::List => view.refresh().await?,
        WorkoutAction::Add { exercise, sets, reps, weight, duration, calories, notes } => {
            view.add(NewWorkoutEntry {
                exercise_name: exercise,
                sets,
                reps,
                weight_kg: weight,
                duration_minutes: duration,
                calories_burned: calories,
                notes,
            })
            .await?
        }
        WorkoutAction::Delete { id } => view.delete(&id).await?,
    }
    report(view.take_notice());

    for entry in view.entries() {
        let load = entry.weight_kg.map(|kg| format!(" @ {} kg", kg)).unwrap_or_default();
        println!("[{}] {} {}x{}{}", entry.id, entry.exercise_name, entry.sets, entry.reps, load);
    }
    if view.calories_burned() > 0.0 {
        println!("Calories burned: {}", view.calories_burned());
    }
    Ok(())
}

async fn run_weight(store: Arc<RestClient>, action: WeightAction) -> Result<()> {
    let mut view = WeightView::new(store);

    match action {
        WeightAction::List => view.refresh().await?,
        WeightAction::Add { weight, body_fat } => {
            view.add(NewWeightEntry { weight_kg: weight, body_fat_percentage: body_fat }).await?
        }
    }
    report(view.take_notice());

    for entry in view.entries() {
        println!("{} {} kg", entry.timestamp.date_naive(), entry.weight_kg);
    }
    println!("Trend: {}", view.trend().summary());
    Ok(())
}

async fn show_analytics(store: Arc<RestClient>, days: u32) -> Result<()> {
    let mut view = AnalyticsView::new(store);
    view.refresh_days(days).await?;
    report(view.take_notice());

    let state = view.state();
    println!("Last {} days", state.days);
    println!("Weight: {}", state.weight_trend.summary());
    println!("Workouts: {}", state.total_workouts);
    println!("Average daily calories: {:.0}", state.avg_daily_calories);
    for point in state.calorie_chart() {
        println!("  {:>6}  {:.0} kcal", point.label, point.value);
    }
    Ok(())
}

async fn run_profile(store: Arc<RestClient>, action: ProfileAction) -> Result<()> {
    let mut view = ProfileView::new(store);
    view.refresh().await?;

    match action {
        ProfileAction::Show { gender } => {
            if let Some(profile) = view.profile() {
                println!("{} <{}>", profile.name, profile.email);
                println!("Activity: {}, goal: {}", profile.activity_level, profile.goal);
                if let Ok(metrics) = view.body_metrics(gender) {
                    print_metrics(&metrics);
                }
            }
        }
        ProfileAction::Update { name, age, height, current_weight, goal_weight, activity, goal } => {
            view.update(ProfileUpdate {
                name,
                age,
                height_cm: height,
                current_weight_kg: current_weight,
                goal_weight_kg: goal_weight,
                activity_level: activity,
                goal,
            })
            .await?;
            if let Some(notice) = view.take_notice() {
                report(Some(notice));
                return Ok(());
            }
            println!("Profile updated");
        }
        ProfileAction::GoalWeight { apply } => {
            let suggested = if apply {
                view.apply_suggested_goal_weight().await?
            } else {
                view.suggested_goal_weight()?
            };
            println!("Suggested goal weight: {} kg", suggested);
        }
    }
    report(view.take_notice());
    Ok(())
}

fn print_metrics(metrics: &BodyMetrics) {
    let rounded = metrics.rounded();
    println!("BMI: {} ({})", rounded.bmi, rounded.bmi_category);
    println!("BMR: {} kcal/day", rounded.bmr);
    println!("TDEE: {} kcal/day", rounded.tdee);
}
