pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::LocalStorage, CliConfig};

#[cfg(feature = "lambda")]
pub use crate::config::lambda::{LambdaConfig, S3Storage};

pub use crate::core::{
    catalog::{Catalog, StorageCatalogSource},
    cost::{compute_cost, CostRates},
    engine::SizingEngine,
    estimator::{estimate, SizingRatios},
    pricing::parse_price,
    selector::select,
};
pub use crate::domain::model::{
    CostBreakdown, InstanceRecord, ResourceRequirement, SizingReport, SizingRequest,
};
pub use crate::utils::error::{Result, SizingError};
