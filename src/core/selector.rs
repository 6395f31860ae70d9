use crate::core::catalog::Catalog;
use crate::core::InstanceRecord;
use crate::utils::error::{Result, SizingError};

/// 排序後取第三便宜的機型（索引 2）
pub const SELECTION_INDEX: usize = 2;

/// 篩選出 RAM 與 vCPU 皆滿足需求的機型，依價格欄位的原始字串排序後取索引 2。
///
/// 價格以字串比較，不是數值比較，例如 `"10.5 USD"` 會排在 `"9.0 USD"` 之前。
/// 排序為穩定排序，價格字串相同時保留目錄中的原始順序。
pub fn select(
    catalog: &Catalog,
    required_ram_gb: f64,
    required_cpu_cores: f64,
) -> Result<InstanceRecord> {
    let mut qualifying: Vec<&InstanceRecord> = catalog
        .records()
        .iter()
        .filter(|record| {
            record.memory_gib >= required_ram_gb && f64::from(record.vcpus) >= required_cpu_cores
        })
        .collect();

    tracing::debug!(
        "{} of {} catalog entries offer >= {:.2} GB RAM and >= {:.2} vCPUs",
        qualifying.len(),
        catalog.len(),
        required_ram_gb,
        required_cpu_cores
    );

    qualifying.sort_by(|a, b| a.hourly_price_raw.cmp(&b.hourly_price_raw));

    let selected = qualifying
        .get(SELECTION_INDEX)
        .ok_or(SizingError::NoQualifyingInstance {
            required_ram_gb,
            required_cpu_cores,
            qualifying: qualifying.len(),
            needed: SELECTION_INDEX + 1,
        })?;

    tracing::debug!(
        "Selected {} ({}) at sorted position {}",
        selected.name,
        selected.hourly_price_raw,
        SELECTION_INDEX
    );

    Ok((*selected).clone())
}
