pub mod composer;
pub mod config;
pub mod fetcher;
pub mod models;
pub mod port;
pub mod yahoo_client;

// Re-exports (public API)
pub use composer::compose;
pub use fetcher::{fetch, fetch_today, filter_window, no_near_term_message, no_options_message};
pub use models::{
    ExpirationSnapshot, FetchOutcome, MarketSnapshot, OptionContract, OptionRow, ProviderChain,
    Ticker,
};
pub use port::MarketDataPort;
pub use yahoo_client::YahooClient;
