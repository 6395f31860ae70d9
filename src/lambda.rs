#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use instance_sizer::config::lambda::{LambdaConfig, S3Storage};
#[cfg(feature = "lambda")]
use instance_sizer::core::catalog::StorageCatalogSource;
#[cfg(feature = "lambda")]
use instance_sizer::core::ConfigProvider;
#[cfg(feature = "lambda")]
use instance_sizer::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use instance_sizer::{SizingEngine, SizingReport, SizingRequest};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::Deserialize;

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    pub num_users: i64,
    pub usage_hours: Option<f64>,
}

#[cfg(feature = "lambda")]
async fn function_handler(
    engine: &SizingEngine,
    event: LambdaEvent<Request>,
) -> Result<SizingReport, Error> {
    let request = SizingRequest {
        num_users: event.payload.num_users,
        usage_hours: event.payload.usage_hours,
    };

    let report = engine.size(&request).map_err(|e| {
        tracing::error!(
            "❌ Sizing failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        Box::new(e) as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(report)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let lambda_config = LambdaConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    lambda_config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    // 創建AWS配置和S3客戶端
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let region = Region::new(lambda_config.s3_region.clone());
    let config = aws_sdk_s3::config::Builder::from(&config)
        .region(region)
        .force_path_style(true)
        .build();
    let s3_client = S3Client::from_conf(config);

    // 冷啟動時載入一次目錄，之後的呼叫共用
    let storage = S3Storage::new(s3_client, lambda_config.s3_bucket.clone());
    let source = StorageCatalogSource::new(storage, lambda_config.catalog_path());
    let engine = SizingEngine::load(&source, &lambda_config)
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    let engine = &engine;

    run(service_fn(move |event: LambdaEvent<Request>| async move {
        function_handler(engine, event).await
    }))
    .await
}
