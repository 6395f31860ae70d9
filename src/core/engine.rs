use crate::core::catalog::Catalog;
use crate::core::cost::{CostRates, DEFAULT_USAGE_HOURS};
use crate::core::estimator::SizingRatios;
use crate::core::selector::select;
use crate::core::{CatalogSource, ConfigProvider, SizingReport, SizingRequest};
use crate::utils::error::Result;
use chrono::Utc;

/// 持有已載入的目錄，每次請求依序執行 estimate → select → cost
#[derive(Debug, Clone)]
pub struct SizingEngine {
    catalog: Catalog,
    ratios: SizingRatios,
    rates: CostRates,
    default_usage_hours: f64,
}

impl SizingEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            ratios: SizingRatios::default(),
            rates: CostRates::default(),
            default_usage_hours: DEFAULT_USAGE_HOURS,
        }
    }

    /// 從目錄來源載入一次並套用設定中的比例與費率
    pub async fn load<S: CatalogSource + ?Sized, C: ConfigProvider + ?Sized>(
        source: &S,
        config: &C,
    ) -> Result<Self> {
        let catalog = source.load().await?;
        Ok(Self::new(catalog)
            .with_ratios(config.sizing_ratios())
            .with_rates(config.cost_rates())
            .with_default_usage_hours(config.default_usage_hours()))
    }

    pub fn with_ratios(mut self, ratios: SizingRatios) -> Self {
        self.ratios = ratios;
        self
    }

    pub fn with_rates(mut self, rates: CostRates) -> Self {
        self.rates = rates;
        self
    }

    pub fn with_default_usage_hours(mut self, hours: f64) -> Self {
        self.default_usage_hours = hours;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn size(&self, request: &SizingRequest) -> Result<SizingReport> {
        let usage_hours = request.usage_hours.unwrap_or(self.default_usage_hours);

        tracing::info!(
            "🧮 Sizing for {} users, {}h/day usage",
            request.num_users,
            usage_hours
        );

        let requirement = self.ratios.estimate(request.num_users)?;
        let instance = select(&self.catalog, requirement.ram_gb, requirement.cpu_cores)?;
        let cost = self
            .rates
            .compute_cost(&instance, requirement.storage_gb, usage_hours)?;

        tracing::info!(
            "✅ Selected {} at ${:.2}/month",
            instance.name,
            cost.total_cost_per_month
        );

        Ok(SizingReport {
            generated_at: Utc::now(),
            num_users: request.num_users,
            usage_hours,
            requirement,
            instance,
            cost,
        })
    }
}
