use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// 目錄中的一筆機型資料，欄位名稱對應 CSV 標頭
///
/// 數值欄位允許前後空白；價格字串原樣保留，篩選時依它排序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRecord {
    #[serde(rename = "Instance type")]
    pub name: String,
    #[serde(rename = "vCPUs", deserialize_with = "padded_number")]
    pub vcpus: u32,
    #[serde(rename = "Cores", deserialize_with = "padded_number")]
    pub cores: u32,
    #[serde(rename = "Memory (GiB)", deserialize_with = "padded_number")]
    pub memory_gib: f64,
    #[serde(rename = "On-Demand Linux pricing")]
    pub hourly_price_raw: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

/// CSV 的 `" 4"` 與 JSON 的 `4` 都接受
fn padded_number<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match NumberOrText::<T>::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceRequirement {
    pub ram_gb: f64,
    pub cpu_cores: f64,
    pub storage_gb: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub instance_cost_per_month: f64,
    pub storage_cost_per_month: f64,
    pub total_cost_per_month: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingRequest {
    pub num_users: i64,
    /// 未指定時使用每日 24 小時
    pub usage_hours: Option<f64>,
}

impl SizingRequest {
    pub fn new(num_users: i64) -> Self {
        Self {
            num_users,
            usage_hours: None,
        }
    }

    pub fn with_usage_hours(mut self, hours: f64) -> Self {
        self.usage_hours = Some(hours);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingReport {
    pub generated_at: DateTime<Utc>,
    pub num_users: i64,
    pub usage_hours: f64,
    pub requirement: ResourceRequirement,
    pub instance: InstanceRecord,
    pub cost: CostBreakdown,
}
