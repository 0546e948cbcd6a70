use crate::agents::{ConversationDriver, LlmConfig, OpenAiClient};
use crate::analysis::{self, AnalysisOutcome, AnalysisReport};
use crate::api_server_axum::{self, AppState};
use crate::market::YahooClient;

use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;

/// Command handler - one entry point per execution mode
pub struct AnalyzerCommands;

impl AnalyzerCommands {
    /// Fetch, analyze with both agents and print every section
    pub async fn run_single(ticker: &str) -> Result<()> {
        Self::print_banner("Options Analyzer - Single Ticker");

        let llm = LlmConfig::from_env()?;
        let market = YahooClient::new()?;
        let driver = ConversationDriver::new(Arc::new(OpenAiClient::new(llm.clone())?), &llm);

        println!("{} Fetching data and analyzing {}...", "→".cyan(), ticker.trim().to_uppercase().yellow());
        println!("{} Model: {}", "→".cyan(), llm.model.yellow());
        println!();

        let outcome = analysis::analyze(&market, &driver, ticker).await?;
        Self::display_outcome(&outcome);

        Ok(())
    }

    /// Fetch and print the option data without contacting the chat model
    pub async fn run_fetch(ticker: &str) -> Result<()> {
        Self::print_banner("Options Analyzer - Option Data");

        let market = YahooClient::new()?;
        let outcome = analysis::snapshot(&market, ticker).await?;
        Self::display_outcome(&outcome);

        Ok(())
    }

    /// Run API server mode
    pub async fn run_server(port: u16) -> Result<()> {
        Self::print_banner("Options Analyzer Server");

        let llm = LlmConfig::from_env()?;
        let market = Arc::new(YahooClient::new()?);
        let driver = ConversationDriver::new(Arc::new(OpenAiClient::new(llm.clone())?), &llm);

        api_server_axum::start_server(port, AppState::new(market, driver)).await
    }

    fn print_banner(title: &str) {
        println!("{}", "=".repeat(60).blue());
        println!("{}", title.green().bold());
        println!("{}", "=".repeat(60).blue());
        println!();
    }

    fn display_outcome(outcome: &AnalysisOutcome) {
        match outcome {
            AnalysisOutcome::Info { message } => println!("{} {}", "ℹ".blue(), message),
            AnalysisOutcome::NoData { message } => println!("{} {}", "✗".red(), message.red()),
            AnalysisOutcome::Report(report) => Self::display_report(report),
        }
    }

    /// Display price, expirations, top records and the transcript
    fn display_report(report: &AnalysisReport) {
        println!("{}", format!("Options Data for {}", report.ticker).cyan().bold());
        println!("{} Current Price: ${:.2}", "✓".green(), report.current_price);
        println!("{} Analyzing Expiration Dates (Next 2 Months):", "✓".green());
        println!("  {}", report.expiration_dates.join(", ").yellow());
        println!();

        for exp in &report.expirations {
            println!("{}", format!("Expiration Date: {}", exp.expiration_date).cyan().bold());

            println!("  {}", "Call Options (Top 5):".green());
            for call in &exp.calls {
                println!(
                    "    {}  strike {:>9.2}  last {:>8.2}  iv {:>6.2}%",
                    call.contract_symbol.yellow(),
                    call.strike,
                    call.last_price,
                    call.implied_volatility * 100.0
                );
            }

            println!("  {}", "Put Options (Top 5):".red());
            for put in &exp.puts {
                println!(
                    "    {}  strike {:>9.2}  last {:>8.2}  iv {:>6.2}%",
                    put.contract_symbol.yellow(),
                    put.strike,
                    put.last_price,
                    put.implied_volatility * 100.0
                );
            }
            println!();
        }

        if report.transcript.is_empty() {
            return;
        }

        println!("{}", "=".repeat(60).blue());
        println!("{}", "Chat History".cyan().bold());
        println!("{}", "=".repeat(60).blue());
        for turn in &report.transcript {
            println!("{} {}", format!("{} ({}):", turn.speaker, turn.role).bold(), turn.content);
            println!("{}", "---".blue());
        }
    }

    /// Print usage instructions
    pub fn print_usage() {
        eprintln!("Set OPTIONS_MODE environment variable to control execution mode");
        eprintln!("Examples:");
        eprintln!("  OPTIONS_MODE=server OPTIONS_PORT=3001 cargo run   # Start the web UI on port 3001");
        eprintln!("  OPTIONS_MODE=single cargo run -- AAPL              # Analyze one ticker in the terminal");
        eprintln!("  OPTIONS_MODE=fetch OPTIONS_TICKER=MSFT cargo run   # Option data only, no chat model");
        eprintln!("OPENAI_API_KEY must be set (or present in .env) for 'server' and 'single'");
    }
}
