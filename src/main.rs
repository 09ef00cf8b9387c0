use clap::Parser;
use contract_scout::utils::error::ErrorSeverity;
use contract_scout::utils::{logger, validation::Validate};
use contract_scout::{build_pipeline, BusinessQuery, CliConfig, ConfigProvider, ScoutError, TomlConfig};

#[derive(Parser)]
#[command(name = "contract-scout")]
#[command(about = "Match a business to commodity codes and open city solicitations")]
struct Cli {
    /// Business name
    #[arg(long, default_value = "")]
    name: String,

    /// Main services the business provides (required)
    #[arg(long)]
    services: Option<String>,

    #[arg(long, default_value = "")]
    specialties: String,

    #[arg(long, default_value = "")]
    other: String,

    /// TOML configuration file; replaces the settings flags when given
    #[arg(short, long)]
    config: Option<String>,

    #[command(flatten)]
    settings: CliConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.settings.verbose);
    tracing::info!("Starting contract-scout CLI");

    let query = BusinessQuery::new(cli.services.clone().unwrap_or_default())
        .with_name(cli.name.clone())
        .with_specialties(cli.specialties.clone())
        .with_other(cli.other.clone());

    let outcome = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => execute(&config, &query).await,
                Err(e) => Err(e),
            }
        }
        None => execute(&cli.settings, &query).await,
    };

    match outcome {
        Ok(json) => {
            println!("{}", json);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ contract-scout failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low | ErrorSeverity::High => 1,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn execute<C: ConfigProvider + Validate>(
    config: &C,
    query: &BusinessQuery,
) -> Result<String, ScoutError> {
    config.validate()?;
    let pipeline = build_pipeline(config)?;
    let result = pipeline.run(query).await?;
    Ok(serde_json::to_string_pretty(&result)?)
}
