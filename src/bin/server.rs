use anyhow::Context;
use clap::Parser;
use contract_scout::adapters::http;
use contract_scout::utils::{logger, validation::Validate};
use contract_scout::{build_pipeline, CliConfig, ConfigProvider, MatchPipeline, TomlConfig};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "contract-scout-server")]
#[command(about = "HTTP service exposing POST /api/find_contracts")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5000", env = "CONTRACT_SCOUT_BIND")]
    bind: String,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,

    /// TOML configuration file; replaces the settings flags when given
    #[arg(short, long)]
    config: Option<String>,

    #[command(flatten)]
    settings: CliConfig,
}

fn prepare<C: ConfigProvider + Validate>(config: &C) -> anyhow::Result<MatchPipeline> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("{} ({})", e.user_friendly_message(), e.recovery_suggestion()))?;
    Ok(build_pipeline(config)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_server_logger(args.json_logs);

    // 目錄只在啟動時載入一次，之後所有請求共用
    let pipeline = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            prepare(&config)?
        }
        None => prepare(&args.settings)?,
    };
    tracing::info!(
        "📚 Catalog ready with {} codes, AI configured: {}",
        pipeline.catalog().len(),
        pipeline.completion().is_configured()
    );

    let app = http::router(Arc::new(pipeline));
    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;

    tracing::info!("🚀 Listening on http://{}", args.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
