use crate::agents::{ChatTurn, ConversationDriver};
use crate::market::config::RECORD_CAP;
use crate::market::{self, ExpirationSnapshot, FetchOutcome, MarketDataPort, MarketSnapshot, Ticker};
use crate::utility::timing::Timer;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const GETTING_STARTED: &str =
    "Please enter a stock ticker symbol and click 'Analyze' to get started.";

/// What one "Analyze" action produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// Nothing was entered.
    Info { message: String },
    /// The provider has nothing inside the window.
    NoData { message: String },
    Report(AnalysisReport),
}

/// Rendered sections: price, dates, truncated tables and the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub ticker: Ticker,
    pub current_price: f64,
    pub expiration_dates: Vec<String>,
    pub expirations: Vec<ExpirationSnapshot>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transcript: Vec<ChatTurn>,
}

impl AnalysisReport {
    fn from_snapshot(ticker: Ticker, snapshot: &MarketSnapshot) -> Self {
        let expirations = snapshot
            .expirations
            .iter()
            .map(|exp| ExpirationSnapshot {
                expiration_date: exp.expiration_date.clone(),
                calls: exp.top_calls(RECORD_CAP).to_vec(),
                puts: exp.top_puts(RECORD_CAP).to_vec(),
            })
            .collect();

        Self {
            ticker,
            current_price: snapshot.current_price,
            expiration_dates: snapshot.expiration_dates.clone(),
            expirations,
            transcript: Vec::new(),
        }
    }
}

enum Prepared {
    Done(AnalysisOutcome),
    Ready(Ticker, MarketSnapshot),
}

async fn prepare(market: &dyn MarketDataPort, input: &str, today: NaiveDate) -> Result<Prepared> {
    let Some(ticker) = Ticker::parse(input)? else {
        return Ok(Prepared::Done(AnalysisOutcome::Info {
            message: GETTING_STARTED.to_string(),
        }));
    };

    let timer = Timer::start(format!("fetch {}", ticker));
    let outcome = market::fetch(market, &ticker, today).await?;
    timer.stop();

    Ok(match outcome {
        FetchOutcome::NoData(message) => Prepared::Done(AnalysisOutcome::NoData { message }),
        FetchOutcome::Snapshot(snapshot) => Prepared::Ready(ticker, snapshot),
    })
}

/// Fetch and render the option data only.
pub async fn snapshot_at(
    market: &dyn MarketDataPort,
    input: &str,
    today: NaiveDate,
) -> Result<AnalysisOutcome> {
    Ok(match prepare(market, input, today).await? {
        Prepared::Done(outcome) => outcome,
        Prepared::Ready(ticker, snapshot) => {
            AnalysisOutcome::Report(AnalysisReport::from_snapshot(ticker, &snapshot))
        }
    })
}

pub async fn snapshot(market: &dyn MarketDataPort, input: &str) -> Result<AnalysisOutcome> {
    snapshot_at(market, input, Local::now().date_naive()).await
}

/// Fetch, compose the prompt and run the agent exchange.
pub async fn analyze_at(
    market: &dyn MarketDataPort,
    driver: &ConversationDriver,
    input: &str,
    today: NaiveDate,
) -> Result<AnalysisOutcome> {
    let (ticker, snapshot) = match prepare(market, input, today).await? {
        Prepared::Done(outcome) => return Ok(outcome),
        Prepared::Ready(ticker, snapshot) => (ticker, snapshot),
    };

    let prompt = market::compose(&ticker, &snapshot);
    info!(
        ticker = %ticker,
        expirations = snapshot.expiration_dates.len(),
        prompt_chars = prompt.len(),
        "starting agent exchange"
    );

    let timer = Timer::start(format!("agents {}", ticker));
    let transcript = driver.run(&prompt).await?;
    timer.stop();

    let mut report = AnalysisReport::from_snapshot(ticker, &snapshot);
    report.transcript = transcript;
    Ok(AnalysisOutcome::Report(report))
}

pub async fn analyze(
    market: &dyn MarketDataPort,
    driver: &ConversationDriver,
    input: &str,
) -> Result<AnalysisOutcome> {
    analyze_at(market, driver, input, Local::now().date_naive()).await
}
