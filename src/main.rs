use chrono::Utc;
use clap::Parser;
use voucher_analytics::config::parse_as_of;
use voucher_analytics::core::engine::AnalyticsEngine;
use voucher_analytics::domain::ports::ConfigProvider;
use voucher_analytics::utils::error::{ErrorSeverity, Result};
use voucher_analytics::utils::{logger, validation::Validate};
use voucher_analytics::CliConfig;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting voucher-analytics ({:?} report)", cli.report);
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<()> {
    cli.validate()?;

    // 載入並驗證配置
    let config = cli.resolve()?;
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated");

    let now = match &cli.now {
        Some(value) => parse_as_of(value)?,
        None => Utc::now(),
    };

    let engine = AnalyticsEngine::from_config(&config)?;

    let report = engine
        .report(cli.report, now, cli.amount, &config.stacking_rules())
        .await?;

    let rendered = serde_json::to_string_pretty(&report)?;
    match &cli.output {
        Some(path) => {
            tokio::fs::write(path, rendered).await?;
            tracing::info!("📁 Report saved to: {}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
