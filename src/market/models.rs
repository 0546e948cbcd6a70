use crate::error::AnalyzerError;
use serde::{Deserialize, Serialize};
use std::fmt;

// -----------------------------------------------
// TICKER
// -----------------------------------------------

/// Uppercase, trimmed stock symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Normalize user input. `Ok(None)` means nothing was entered.
    pub fn parse(input: &str) -> Result<Option<Self>, AnalyzerError> {
        let symbol = input.trim().to_uppercase();
        if symbol.is_empty() {
            return Ok(None);
        }

        let plausible = symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));
        if !plausible {
            return Err(AnalyzerError::InvalidTicker(symbol));
        }

        Ok(Some(Self(symbol)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// -----------------------------------------------
// SNAPSHOT MODEL
// -----------------------------------------------

/// One option contract, projected down to the fields the analysis uses.
/// Serialized with the provider's field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionContract {
    pub contract_symbol: String,
    pub strike: f64,
    pub last_price: f64,
    pub implied_volatility: f64,
}

impl From<&OptionRow> for OptionContract {
    fn from(row: &OptionRow) -> Self {
        Self {
            contract_symbol: row.contract_symbol.clone(),
            strike: row.strike,
            last_price: row.last_price.unwrap_or(0.0),
            implied_volatility: row.implied_volatility.unwrap_or(0.0),
        }
    }
}

/// Calls and puts for a single expiration date, in provider order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpirationSnapshot {
    pub expiration_date: String,
    pub calls: Vec<OptionContract>,
    pub puts: Vec<OptionContract>,
}

impl ExpirationSnapshot {
    pub fn top_calls(&self, cap: usize) -> &[OptionContract] {
        &self.calls[..cap.min(self.calls.len())]
    }

    pub fn top_puts(&self, cap: usize) -> &[OptionContract] {
        &self.puts[..cap.min(self.puts.len())]
    }
}

/// Result of one successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub current_price: f64,
    pub expiration_dates: Vec<String>,
    pub expirations: Vec<ExpirationSnapshot>,
}

impl MarketSnapshot {
    pub fn get(&self, expiration_date: &str) -> Option<&ExpirationSnapshot> {
        self.expirations
            .iter()
            .find(|exp| exp.expiration_date == expiration_date)
    }
}

/// Either a snapshot or a human-readable reason there is nothing to analyze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FetchOutcome {
    NoData(String),
    Snapshot(MarketSnapshot),
}

// -----------------------------------------------
// PROVIDER ROWS
// -----------------------------------------------

/// Option chain as the provider returns it for one expiration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderChain {
    #[serde(default)]
    pub calls: Vec<OptionRow>,

    #[serde(default)]
    pub puts: Vec<OptionRow>,
}

/// Full option row from the Yahoo options endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionRow {
    #[serde(rename = "contractSymbol")]
    pub contract_symbol: String,

    pub strike: f64,

    #[serde(rename = "lastPrice", default)]
    pub last_price: Option<f64>,

    #[serde(rename = "impliedVolatility", default)]
    pub implied_volatility: Option<f64>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub change: Option<f64>,

    #[serde(rename = "percentChange", default)]
    pub percent_change: Option<f64>,

    #[serde(default)]
    pub volume: Option<i64>,

    #[serde(rename = "openInterest", default)]
    pub open_interest: Option<i64>,

    #[serde(default)]
    pub bid: Option<f64>,

    #[serde(default)]
    pub ask: Option<f64>,

    #[serde(rename = "contractSize", default)]
    pub contract_size: Option<String>,

    #[serde(default)]
    pub expiration: Option<i64>,

    #[serde(rename = "lastTradeDate", default)]
    pub last_trade_date: Option<i64>,

    #[serde(rename = "inTheMoney", default)]
    pub in_the_money: Option<bool>,
}

// -----------------------------------------------
// YAHOO RESPONSE ENVELOPES
// -----------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartBody,
}

#[derive(Debug, Deserialize)]
pub struct ChartBody {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,

    #[serde(default)]
    pub indicators: Option<ChartIndicators>,
}

#[derive(Debug, Deserialize)]
pub struct ChartMeta {
    #[serde(rename = "regularMarketPrice", default)]
    pub regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
pub struct ChartQuote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl ChartResponse {
    /// Latest daily close, or the regular market price when the bar is empty.
    pub fn last_close(&self) -> Option<f64> {
        let result = self.chart.result.as_ref()?.first()?;

        let close = result
            .indicators
            .as_ref()
            .and_then(|ind| ind.quote.first())
            .and_then(|q| q.close.iter().rev().find_map(|c| *c));

        close.or(result.meta.regular_market_price)
    }
}

#[derive(Debug, Deserialize)]
pub struct OptionsResponse {
    #[serde(rename = "optionChain")]
    pub option_chain: OptionsBody,
}

#[derive(Debug, Deserialize)]
pub struct OptionsBody {
    #[serde(default)]
    pub result: Vec<OptionsResult>,
}

#[derive(Debug, Deserialize)]
pub struct OptionsResult {
    #[serde(rename = "expirationDates", default)]
    pub expiration_dates: Vec<i64>,

    #[serde(default)]
    pub options: Vec<ProviderChain>,
}
