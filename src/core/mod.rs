pub mod catalog;
pub mod cost;
pub mod engine;
pub mod estimator;
pub mod pricing;
pub mod report;
pub mod selector;

pub use crate::domain::model::{
    CostBreakdown, InstanceRecord, ResourceRequirement, SizingReport, SizingRequest,
};
pub use crate::domain::ports::{CatalogSource, ConfigProvider, Storage};
pub use crate::utils::error::Result;
