use crate::core::catalog::Catalog;
use crate::core::cost::CostRates;
use crate::core::estimator::SizingRatios;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_path(&self) -> &str;
    fn default_usage_hours(&self) -> f64;
    fn sizing_ratios(&self) -> SizingRatios;
    fn cost_rates(&self) -> CostRates;
}

/// 機型目錄來源，只在啟動時載入一次
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<Catalog>;
}
