use crate::core::ResourceRequirement;
use crate::utils::error::{Result, SizingError};
use crate::utils::validation::validate_positive_f64;
use serde::{Deserialize, Serialize};

/// MB 換算 GB 的除數
const MB_PER_GB: f64 = 1024.0;

/// 每位使用者所需資源比例
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingRatios {
    pub ram_per_user_gb: f64,
    pub ram_per_core_gb: f64,
    pub storage_per_user_mb: f64,
}

impl Default for SizingRatios {
    fn default() -> Self {
        Self {
            ram_per_user_gb: 0.025,
            ram_per_core_gb: 2.5,
            storage_per_user_mb: 100.0,
        }
    }
}

impl SizingRatios {
    pub fn validate(&self) -> Result<()> {
        validate_positive_f64("estimation.ram_per_user_gb", self.ram_per_user_gb)?;
        validate_positive_f64("estimation.ram_per_core_gb", self.ram_per_core_gb)?;
        validate_positive_f64("estimation.storage_per_user_mb", self.storage_per_user_mb)?;
        Ok(())
    }

    /// 依使用者數量計算所需 RAM、CPU 核心與儲存空間，不做任何四捨五入
    pub fn estimate(&self, num_users: i64) -> Result<ResourceRequirement> {
        if num_users < 0 {
            return Err(SizingError::invalid_input(
                "num_users",
                num_users,
                "number of users cannot be negative",
            ));
        }

        let users = num_users as f64;
        let ram_gb = self.ram_per_user_gb * users;
        let cpu_cores = ram_gb / self.ram_per_core_gb;
        let storage_gb = (self.storage_per_user_mb * users) / MB_PER_GB;

        tracing::debug!(
            "Estimated requirement for {} users: {:.3} GB RAM, {:.3} cores, {:.3} GB storage",
            num_users,
            ram_gb,
            cpu_cores,
            storage_gb
        );

        Ok(ResourceRequirement {
            ram_gb,
            cpu_cores,
            storage_gb,
        })
    }
}

pub fn estimate(num_users: i64) -> Result<ResourceRequirement> {
    SizingRatios::default().estimate(num_users)
}
