use crate::core::report::NO_INSTANCES_MESSAGE;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SizingError {
    #[error("Invalid input for {field} ({value}): {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed price string: {raw:?}")]
    MalformedPrice { raw: String },

    #[error(
        "No qualifying instance: {qualifying} instance(s) offer at least {required_ram_gb:.2} GB RAM and {required_cpu_cores:.2} vCPUs, {needed} required"
    )]
    NoQualifyingInstance {
        required_ram_gb: f64,
        required_cpu_cores: f64,
        qualifying: usize,
        needed: usize,
    },

    #[error("Catalog load failed: {message}")]
    CatalogLoad { message: String },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Catalog,
    Selection,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SizingError {
    pub fn invalid_input(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn catalog_load(message: impl Into<String>) -> Self {
        Self::CatalogLoad {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::MalformedPrice { .. } | Self::CatalogLoad { .. } | Self::Csv(_) => {
                ErrorCategory::Catalog
            }
            Self::NoQualifyingInstance { .. } => ErrorCategory::Selection,
            Self::ConfigValidation { .. }
            | Self::InvalidConfigValue { .. }
            | Self::MissingConfig { .. } => ErrorCategory::Configuration,
            Self::Io(_) | Self::Serialization(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Selection => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration | ErrorCategory::Catalog => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => {
                "Use a non-negative user count and a usage time between 0 and 24 hours"
            }
            Self::MalformedPrice { .. } => {
                "Fix the 'On-Demand Linux pricing' column; each value must start with a number, e.g. \"0.096 USD\""
            }
            Self::NoQualifyingInstance { .. } => {
                "Lower the user count or add larger instance types to the catalog"
            }
            Self::CatalogLoad { .. } | Self::Csv(_) => {
                "Check that the catalog file exists and has the columns: Instance type, vCPUs, Cores, Memory (GiB), On-Demand Linux pricing"
            }
            Self::ConfigValidation { .. }
            | Self::InvalidConfigValue { .. }
            | Self::MissingConfig { .. } => "Review the configuration file and command-line flags",
            Self::Io(_) => "Check file paths and permissions",
            Self::Serialization(_) => "Report this issue; the sizing report could not be serialized",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NoQualifyingInstance { .. } => NO_INSTANCES_MESSAGE.to_string(),
            Self::MalformedPrice { raw } => {
                format!("The catalog contains an unreadable price: {:?}", raw)
            }
            Self::InvalidInput { field, reason, .. } => format!("Invalid {}: {}", field, reason),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SizingError>;
