use clap::Parser;
use costos_sync::app::{server, verify};
use costos_sync::config::cli::{Cli, Command};
use costos_sync::utils::{logger, validation::Validate};
use costos_sync::run_all;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 本地執行時從 .env 載入設定
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command();
    let config = cli.config;

    logger::init_logger(config.verbose, config.log_json);
    tracing::info!("Starting costos-sync ({:?})", command);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let config = Arc::new(config);
    match command {
        Command::Serve => server::serve(config).await?,
        Command::Sync => {
            let today = chrono::Utc::now().date_naive();
            let report = run_all(Arc::clone(&config), today).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !(report.materiales.ok && report.mano_obra.ok) {
                std::process::exit(2);
            }
        }
        Command::Verify => {
            let code = verify::run_verify(&config).await;
            std::process::exit(code);
        }
    }

    Ok(())
}
