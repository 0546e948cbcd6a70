pub mod agents;
pub mod analysis;
pub mod api_server_axum;
pub mod app_config;
pub mod commands;
pub mod error;
pub mod logging;
pub mod market;
pub mod utility;

// Re-exports for convenience
pub use agents::{ChatModel, ChatTurn, ConversationDriver, LlmConfig};
pub use analysis::{AnalysisOutcome, AnalysisReport};
pub use error::AnalyzerError;
pub use market::{FetchOutcome, MarketDataPort, MarketSnapshot, OptionContract, Ticker};
