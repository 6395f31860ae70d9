pub mod cli;
pub mod lambda;
#[cfg(feature = "cli")]
pub mod prompt;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::cost::{CostRates, DEFAULT_USAGE_HOURS};
#[cfg(feature = "cli")]
use crate::core::estimator::SizingRatios;
#[cfg(feature = "cli")]
use crate::core::report::OutputFormat;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::{Result, SizingError};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_usage_hours, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

pub const DEFAULT_CATALOG_PATH: &str = "instancetypes.csv";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "instance-sizer")]
#[command(about = "Estimate the cheapest instance and storage cost for a number of users")]
pub struct CliConfig {
    /// Number of users to size for (prompted when omitted)
    #[arg(short, long, allow_negative_numbers = true)]
    pub users: Option<i64>,

    /// Hours per day the instance runs (default 24)
    #[arg(long, allow_negative_numbers = true)]
    pub hours: Option<f64>,

    /// Path to the instance type catalog CSV
    #[arg(long)]
    pub catalog: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format: text, json or csv
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Also write the rendered report to this file
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(skip)]
    pub file: Option<TomlConfig>,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入 `--config` 指定的 TOML 檔，命令列參數優先
    pub fn load_file(&mut self) -> Result<()> {
        if let Some(path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            self.file = Some(TomlConfig::from_file(path)?);
        }
        Ok(())
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format
            .or_else(|| self.file.as_ref().and_then(|f| f.output_format()))
            .unwrap_or_default()
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output
            .as_deref()
            .or_else(|| self.file.as_ref().and_then(|f| f.output_path()))
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn catalog_path(&self) -> &str {
        self.catalog
            .as_deref()
            .or_else(|| self.file.as_ref().map(|f| f.catalog_path()))
            .unwrap_or(DEFAULT_CATALOG_PATH)
    }

    fn default_usage_hours(&self) -> f64 {
        self.file
            .as_ref()
            .map(|f| f.default_usage_hours())
            .unwrap_or(DEFAULT_USAGE_HOURS)
    }

    fn sizing_ratios(&self) -> SizingRatios {
        self.file
            .as_ref()
            .map(|f| f.sizing_ratios())
            .unwrap_or_default()
    }

    fn cost_rates(&self) -> CostRates {
        self.file.as_ref().map(|f| f.cost_rates()).unwrap_or_default()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(file) = &self.file {
            file.validate()?;
        }

        validate_path("catalog", self.catalog_path())?;

        if let Some(users) = self.users {
            if users < 0 {
                return Err(SizingError::invalid_input(
                    "users",
                    users,
                    "number of users cannot be negative",
                ));
            }
        }

        if let Some(hours) = self.hours {
            validate_usage_hours("hours", hours)?;
        }

        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }

        Ok(())
    }
}
