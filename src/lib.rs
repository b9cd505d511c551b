// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Fitness Tracker
//!
//! Client library for a personal fitness-tracking backend. The server owns
//! every record; this crate fetches raw log entries over REST and derives
//! everything the screens show from them.
//!
//! ## Features
//!
//! - **Aggregation**: per-day nutrition totals, meal breakdowns and hydration totals
//! - **Goal progress**: calorie, water and macro percentages against configured goals
//! - **Body metrics**: BMI with category, BMR, TDEE and a BMI-based goal weight
//! - **Trends**: weight change over time and chart-ready nutrition series
//! - **Insights**: pass-through rendering of server-generated insights
//!
//! ## Architecture
//!
//! - **Metrics**: pure computations, no I/O
//! - **Repositories**: async traits over the remote store, with a `reqwest` implementation
//! - **Views**: per-screen state holders that turn failures into notices
//! - **Config**: API root, token and goals from TOML or the environment
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fitness_tracker::config::Config;
//! use fitness_tracker::metrics::ProgressEngine;
//! use fitness_tracker::repositories::RestClient;
//! use fitness_tracker::views::DashboardView;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(None)?;
//!     let store = Arc::new(RestClient::from_config(&config.api)?);
//!     let engine = ProgressEngine::new(config.goals.clone())?;
//!
//!     let mut dashboard = DashboardView::new(store, engine);
//!     dashboard.refresh(chrono::Utc::now().date_naive()).await?;
//!
//!     if let Some(state) = dashboard.state() {
//!         println!("Calories today: {}", state.totals.total_calories);
//!     }
//!
//!     Ok(())
//! }
//! ```

/// Error taxonomy and input checks
pub mod errors;

/// Wire and domain records
pub mod models;

/// Configuration management and persistence
pub mod config;

/// Reference values and environment lookups
pub mod constants;

/// Structured logging setup
pub mod logging;

/// Aggregation, progress, body metrics, trends and insights
pub mod metrics;

/// Remote store traits and the REST client
pub mod repositories;

/// Per-screen state holders
pub mod views;

pub use errors::{TrackerError, TrackerResult};
