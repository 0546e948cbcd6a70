use anyhow::Result;
use colored::Colorize;
use options_analyzer::app_config::{AppConfig, Mode};
use options_analyzer::commands::AnalyzerCommands;
use options_analyzer::logging;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    let config = match AppConfig::from_env(std::env::args().nth(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            AnalyzerCommands::print_usage();
            std::process::exit(1);
        }
    };

    tracing::debug!(mode = %config.mode, port = config.port, "configuration loaded");

    match config.mode {
        Mode::Server => AnalyzerCommands::run_server(config.port).await?,
        Mode::Single => AnalyzerCommands::run_single(&config.ticker).await?,
        Mode::Fetch => AnalyzerCommands::run_fetch(&config.ticker).await?,
    }

    Ok(())
}
