use super::models::{ProviderChain, Ticker};
use anyhow::Result;
use async_trait::async_trait;

/// Read-only market data source. Mockable for testing.
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Most recent daily closing price.
    async fn last_price(&self, ticker: &Ticker) -> Result<f64>;

    /// Every expiration the provider offers, as `YYYY-MM-DD`, in provider order.
    async fn list_expirations(&self, ticker: &Ticker) -> Result<Vec<String>>;

    /// Full call and put chains for one expiration.
    async fn get_chain(&self, ticker: &Ticker, expiration_date: &str) -> Result<ProviderChain>;
}
