use crate::core::pricing::parse_price;
use crate::core::{CostBreakdown, InstanceRecord};
use crate::utils::error::{Result, SizingError};
use crate::utils::validation::validate_positive_f64;
use serde::{Deserialize, Serialize};

pub const DEFAULT_USAGE_HOURS: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRates {
    pub storage_cost_per_gb_month: f64,
    pub days_per_month: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            storage_cost_per_gb_month: 0.08,
            days_per_month: 30.0,
        }
    }
}

impl CostRates {
    pub fn validate(&self) -> Result<()> {
        validate_positive_f64(
            "pricing.storage_cost_per_gb_month",
            self.storage_cost_per_gb_month,
        )?;
        validate_positive_f64("pricing.days_per_month", self.days_per_month)?;
        Ok(())
    }

    /// 計算每月機型與儲存成本。
    ///
    /// 上限 24 小時由輸入端負責檢查，這裡只拒絕非正數。
    pub fn compute_cost(
        &self,
        instance: &InstanceRecord,
        storage_gb: f64,
        usage_hours: f64,
    ) -> Result<CostBreakdown> {
        if !usage_hours.is_finite() || usage_hours <= 0.0 {
            return Err(SizingError::invalid_input(
                "usage_hours",
                usage_hours,
                "usage time must be greater than 0",
            ));
        }
        if !storage_gb.is_finite() || storage_gb < 0.0 {
            return Err(SizingError::invalid_input(
                "storage_gb",
                storage_gb,
                "storage cannot be negative",
            ));
        }

        let hourly_price = parse_price(&instance.hourly_price_raw)?;

        let instance_cost_per_month = hourly_price * usage_hours * self.days_per_month;
        let storage_cost_per_month =
            self.storage_cost_per_gb_month * storage_gb / self.days_per_month * usage_hours;

        tracing::debug!(
            "{}: {} /h x {}h x {} days = {:.4}, storage {:.4}",
            instance.name,
            hourly_price,
            usage_hours,
            self.days_per_month,
            instance_cost_per_month,
            storage_cost_per_month
        );

        Ok(CostBreakdown {
            instance_cost_per_month,
            storage_cost_per_month,
            total_cost_per_month: instance_cost_per_month + storage_cost_per_month,
        })
    }
}

pub fn compute_cost(
    instance: &InstanceRecord,
    storage_gb: f64,
    usage_hours: f64,
) -> Result<CostBreakdown> {
    CostRates::default().compute_cost(instance, storage_gb, usage_hours)
}
