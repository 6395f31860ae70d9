use anyhow::Context;
use clap::Parser;
use instance_sizer::config::prompt::{read_piped_answers, Prompter};
use instance_sizer::core::catalog::StorageCatalogSource;
use instance_sizer::core::report::{render, NO_INSTANCES_MESSAGE};
use instance_sizer::core::{ConfigProvider, Storage};
use instance_sizer::utils::error::{ErrorSeverity, SizingError};
use instance_sizer::utils::{logger, validation::Validate};
use instance_sizer::{CliConfig, LocalStorage, SizingEngine, SizingRequest};
use std::io::IsTerminal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting instance-sizer");

    // 載入並驗證配置
    if let Err(e) = config.load_file().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 目錄只在啟動時載入一次
    let storage = LocalStorage::new(".");
    let source = StorageCatalogSource::new(storage.clone(), config.catalog_path());
    let engine = match SizingEngine::load(&source, &config).await {
        Ok(engine) => engine,
        Err(e) => exit_with(e),
    };

    let request = match config.users {
        Some(num_users) => SizingRequest {
            num_users,
            usage_hours: config.hours,
        },
        None if std::io::stdin().is_terminal() => {
            let prompter = Prompter::new();
            let num_users = prompter
                .ask_num_users()
                .unwrap_or_else(|e| exit_with(e));
            let usage_hours = match config.hours {
                Some(hours) => Some(hours),
                None => prompter
                    .ask_usage_hours(config.default_usage_hours())
                    .unwrap_or_else(|e| exit_with(e)),
            };
            SizingRequest {
                num_users,
                usage_hours,
            }
        }
        None => {
            tracing::debug!("stdin is not a terminal, reading answers line by line");
            let (num_users, piped_hours) =
                read_piped_answers(std::io::stdin().lock()).unwrap_or_else(|e| exit_with(e));
            SizingRequest {
                num_users,
                usage_hours: config.hours.or(piped_hours),
            }
        }
    };

    let report = match engine.size(&request) {
        Ok(report) => report,
        Err(e @ SizingError::NoQualifyingInstance { .. }) => {
            tracing::warn!("{}", e);
            println!("{}", NO_INSTANCES_MESSAGE);
            std::process::exit(severity_exit_code(e.severity()));
        }
        Err(e) => exit_with(e),
    };

    let rendered = render(&report, config.output_format()).context("failed to render report")?;
    println!("{}", rendered);

    if let Some(path) = config.output_path() {
        storage
            .write_file(path, rendered.as_bytes())
            .await
            .with_context(|| format!("failed to write report to {}", path))?;
        tracing::info!("📁 Report saved to: {}", path);
    }

    Ok(())
}

fn exit_with(e: SizingError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Sizing failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(severity_exit_code(e.severity()))
}

fn severity_exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
