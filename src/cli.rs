// 🧰 Shared command-line plumbing for the CLI and the API server

use crate::config::{AnalysisConfig, ConfigOverrides};
use crate::entry::EntryFilter;
use crate::ingest::{detect_task_dataset, Dataset, TaskDataset, DEFAULT_TASK_PATHS};
use crate::taxonomy::TaxonomyRegistry;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the fmt subscriber; RUST_LOG wins over `default_filter`
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Where the data lives and how to read it
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Matter-level time export (CSV)
    #[arg(short, long, env = "MATTER_AUTOMATION_DATA", default_value = "data/time_entries.csv")]
    pub data: PathBuf,

    /// Task-level export; looked up in the default locations when omitted
    #[arg(long, env = "MATTER_AUTOMATION_TASKS")]
    pub tasks: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "MATTER_AUTOMATION_CONFIG", default_value = "matter-automation.toml")]
    pub config: PathBuf,

    /// Blended hourly rate
    #[arg(long)]
    pub hourly_rate: Option<f64>,

    /// Fraction of automatable time saved (0-1)
    #[arg(long)]
    pub efficiency_gain: Option<f64>,

    /// AI cost per automatable hour
    #[arg(long)]
    pub ai_cost: Option<f64>,

    /// Hours counted per flat-fee entry
    #[arg(long)]
    pub flat_fee_hours: Option<f64>,

    /// Year to project (defaults to the latest year in the data)
    #[arg(long)]
    pub year: Option<i32>,

    /// Only include entries from these years (repeatable)
    #[arg(long = "only-year")]
    pub only_years: Vec<i32>,

    /// Only include entries by these users (repeatable)
    #[arg(long = "user")]
    pub users: Vec<String>,
}

impl DataArgs {
    pub fn config(&self) -> Result<AnalysisConfig> {
        let overrides = ConfigOverrides {
            hourly_rate: self.hourly_rate,
            efficiency_gain: self.efficiency_gain,
            ai_cost_per_hour: self.ai_cost,
            flat_fee_hours: self.flat_fee_hours,
            analysis_year: self.year,
        };
        let config = AnalysisConfig::load(Some(self.config.as_path()))
            .with_context(|| format!("Failed to load configuration {}", self.config.display()))?
            .with_overrides(&overrides)?;
        Ok(config)
    }

    pub fn filter(&self) -> EntryFilter {
        EntryFilter {
            years: self.only_years.iter().copied().collect(),
            users: self.users.iter().cloned().collect(),
        }
    }

    pub fn task_dataset(&self) -> TaskDataset {
        match &self.tasks {
            Some(path) => TaskDataset::Explicit(path.clone()),
            None => detect_task_dataset(DEFAULT_TASK_PATHS),
        }
    }

    /// Resolve configuration, then load and classify everything
    pub fn load(&self, registry: &TaxonomyRegistry) -> Result<(AnalysisConfig, Dataset)> {
        let config = self.config()?;
        let task_dataset = self.task_dataset();
        info!(data = %self.data.display(), tasks = ?task_dataset.path(), "Loading dataset");

        let dataset = Dataset::load(&self.data, &task_dataset, &self.filter(), &config, registry)?;
        Ok((config, dataset))
    }
}
