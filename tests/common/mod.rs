#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use options_analyzer::agents::{ChatMessage, ChatModel};
use options_analyzer::market::{MarketDataPort, OptionRow, ProviderChain, Ticker};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory market data keyed by expiration date.
pub struct MockMarket {
    pub price: f64,
    pub expirations: Vec<String>,
    pub chains: HashMap<String, ProviderChain>,
    pub chain_requests: Mutex<Vec<String>>,
    pub fail_chains: bool,
}

impl MockMarket {
    pub fn new(price: f64, expirations: &[&str]) -> Self {
        Self {
            price,
            expirations: expirations.iter().map(|s| s.to_string()).collect(),
            chains: HashMap::new(),
            chain_requests: Mutex::new(Vec::new()),
            fail_chains: false,
        }
    }

    pub fn with_chain(mut self, date: &str, calls: usize, puts: usize) -> Self {
        self.chains.insert(date.to_string(), chain(date, calls, puts));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.chain_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataPort for MockMarket {
    async fn last_price(&self, _ticker: &Ticker) -> Result<f64> {
        Ok(self.price)
    }

    async fn list_expirations(&self, _ticker: &Ticker) -> Result<Vec<String>> {
        Ok(self.expirations.clone())
    }

    async fn get_chain(&self, _ticker: &Ticker, expiration_date: &str) -> Result<ProviderChain> {
        self.chain_requests
            .lock()
            .unwrap()
            .push(expiration_date.to_string());
        if self.fail_chains {
            anyhow::bail!("provider exploded");
        }
        Ok(self.chains.get(expiration_date).cloned().unwrap_or_default())
    }
}

/// A provider row carrying plenty of fields the analysis must drop.
pub fn row(symbol: &str, strike: f64) -> OptionRow {
    serde_json::from_value(json!({
        "contractSymbol": symbol,
        "strike": strike,
        "currency": "USD",
        "lastPrice": strike / 100.0,
        "change": 0.1,
        "percentChange": 2.5,
        "volume": 120,
        "openInterest": 3400,
        "bid": 1.1,
        "ask": 1.3,
        "contractSize": "REGULAR",
        "expiration": 1718928000,
        "lastTradeDate": 1718800000,
        "impliedVolatility": 0.31,
        "inTheMoney": false
    }))
    .unwrap()
}

/// `calls` descending strikes then `puts` ascending, so provider order is not sorted order.
pub fn chain(date: &str, calls: usize, puts: usize) -> ProviderChain {
    let tag = date.replace('-', "");
    ProviderChain {
        calls: (0..calls)
            .map(|i| row(&format!("T{}C{:03}", tag, i), 200.0 - i as f64))
            .collect(),
        puts: (0..puts)
            .map(|i| row(&format!("T{}P{:03}", tag, i), 100.0 + i as f64))
            .collect(),
    }
}

/// Chat model that answers with a fixed line per call.
pub struct CannedModel {
    pub calls: Mutex<usize>,
}

impl CannedModel {
    pub fn new() -> Self {
        Self { calls: Mutex::new(0) }
    }
}

#[async_trait]
impl ChatModel for CannedModel {
    async fn send_conversation_turn(&self, messages: &[ChatMessage]) -> Result<String> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        Ok(format!("canned reply {} after {} messages", *calls, messages.len()))
    }
}
