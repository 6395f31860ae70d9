#[cfg(feature = "lambda")]
use crate::core::cost::{CostRates, DEFAULT_USAGE_HOURS};
#[cfg(feature = "lambda")]
use crate::core::estimator::SizingRatios;
#[cfg(feature = "lambda")]
use crate::core::{ConfigProvider, Storage};
#[cfg(feature = "lambda")]
use crate::utils::error::{Result, SizingError};
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use std::env;

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub s3_bucket: String,
    pub s3_region: String,
    pub catalog_key: String,
    pub default_usage_hours: f64,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        let default_usage_hours = match env::var("DEFAULT_USAGE_HOURS") {
            Ok(raw) => raw.parse().map_err(|_| SizingError::InvalidConfigValue {
                field: "DEFAULT_USAGE_HOURS".to_string(),
                value: raw.clone(),
                reason: "must be a number".to_string(),
            })?,
            Err(_) => DEFAULT_USAGE_HOURS,
        };

        Ok(Self {
            s3_bucket: env::var("S3_BUCKET").map_err(|_| SizingError::MissingConfig {
                field: "S3_BUCKET".to_string(),
            })?,
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "ap-southeast-2".to_string()),
            catalog_key: env::var("CATALOG_KEY")
                .unwrap_or_else(|_| crate::config::DEFAULT_CATALOG_PATH.to_string()),
            default_usage_hours,
        })
    }
}

#[cfg(feature = "lambda")]
impl ConfigProvider for LambdaConfig {
    fn catalog_path(&self) -> &str {
        &self.catalog_key
    }

    fn default_usage_hours(&self) -> f64 {
        self.default_usage_hours
    }

    fn sizing_ratios(&self) -> SizingRatios {
        SizingRatios::default()
    }

    fn cost_rates(&self) -> CostRates {
        CostRates::default()
    }
}

#[cfg(feature = "lambda")]
impl crate::utils::validation::Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        // 驗證S3 bucket名稱
        validate_s3_bucket_name("S3_BUCKET", &self.s3_bucket)?;

        // 驗證目錄物件 key
        validate_non_empty_string("CATALOG_KEY", &self.catalog_key)?;

        // 驗證區域
        validate_aws_region("S3_REGION", &self.s3_region)?;

        validate_usage_hours("DEFAULT_USAGE_HOURS", self.default_usage_hours)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "lambda")]
fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    let invalid = |reason: &str| SizingError::InvalidConfigValue {
        field: field_name.to_string(),
        value: bucket_name.to_string(),
        reason: reason.to_string(),
    };

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(invalid("S3 bucket name must be between 3 and 63 characters"));
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(invalid(
            "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots",
        ));
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(invalid("S3 bucket name cannot start or end with a hyphen"));
    }

    Ok(())
}

#[cfg(feature = "lambda")]
fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    crate::utils::validation::validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(SizingError::InvalidConfigValue {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

#[cfg(feature = "lambda")]
impl S3Storage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[cfg(feature = "lambda")]
impl Storage for S3Storage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| {
                SizingError::catalog_load(format!(
                    "Failed to read s3://{}/{}: {}",
                    self.bucket, path, e
                ))
            })?;

        let data = resp.body.collect().await.map_err(|e| {
            SizingError::catalog_load(format!("Failed to collect S3 data: {}", e))
        })?;

        Ok(data.into_bytes().to_vec())
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(data.to_vec().into())
            .send()
            .await
            .map_err(|e| {
                SizingError::Io(std::io::Error::other(format!(
                    "Failed to write s3://{}/{}: {}",
                    self.bucket, path, e
                )))
            })?;
        Ok(())
    }
}
