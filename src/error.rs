use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Request error: {0}")]
    Request(String),

    #[error("Non-JSON response: {0}")]
    NonJsonResponse(String),

    #[error("No price history returned for {0}")]
    MissingPrice(String),

    #[error("Invalid ticker symbol: {0}")]
    InvalidTicker(String),

    #[error("Chat model error: {0}")]
    Llm(String),

    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),
}
