// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration management for the fitness tracker client

pub mod goals;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::{env_config, limits};

pub use goals::{GoalConfig, MacroTargets};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub goals: GoalConfig,
}

/// Remote store connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// API root, e.g. `https://tracker.example.com/api`
    pub base_url: String,
    /// Bearer token issued by the external auth service
    pub token: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    limits::DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: limits::DEFAULT_API_URL.to_string(),
            token: None,
            timeout_seconds: default_timeout(),
        }
    }
}

impl Config {
    /// Explicit path, else `<config_dir>/fitness-tracker/config.toml`
    pub fn resolve_path(path: Option<String>) -> String {
        path.unwrap_or_else(|| {
            dirs::config_dir()
                .map(|p| p.join("fitness-tracker/config.toml"))
                .unwrap_or_else(|| "config.toml".into())
                .to_string_lossy()
                .to_string()
        })
    }

    pub fn load(path: Option<String>) -> Result<Self> {
        let config_path = Self::resolve_path(path);

        let config = if Path::new(&config_path).exists() {
            let content = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            toml::from_str(&content)
                .context("Failed to parse config file")?
        } else {
            dotenv::dotenv().ok();
            Self::from_env()
        };

        config.goals.validate()
            .context("Invalid goals in configuration")?;

        Ok(config)
    }

    /// Build a configuration purely from environment variables
    pub fn from_env() -> Self {
        let mut goals = GoalConfig::default();
        if let Some(calories) = env_config::calorie_goal() {
            goals.calorie_goal_kcal = calories;
        }
        if let Some(water) = env_config::water_goal_ml() {
            goals.water_goal_ml = water;
        }

        Config {
            api: ApiConfig {
                base_url: env_config::api_url(),
                token: env_config::api_token(),
                timeout_seconds: env_config::request_timeout_secs(),
            },
            goals,
        }
    }

    /// Replace the goals with those of a standalone goals file
    pub fn with_goals_file(mut self, path: &str) -> Result<Self> {
        let goals = GoalConfig::load_from_file(path)?;
        goals.validate()
            .with_context(|| format!("Invalid goals in {}", path))?;
        self.goals = goals;
        Ok(self)
    }

    /// Write a fresh config file, refusing to clobber one unless `overwrite` is set
    pub fn create(&self, path: Option<String>, overwrite: bool) -> Result<String> {
        let config_path = Self::resolve_path(path);
        if Path::new(&config_path).exists() && !overwrite {
            bail!("Config file already exists: {}", config_path);
        }
        self.save(Some(config_path.clone()))?;
        Ok(config_path)
    }

    pub fn save(&self, path: Option<String>) -> Result<()> {
        let config_path = Self::resolve_path(path);

        let parent = Path::new(&config_path).parent()
            .context("Invalid config path")?;
        fs::create_dir_all(parent)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;

        Ok(())
    }
}
