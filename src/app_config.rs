use anyhow::{Result, bail};
use std::fmt;

pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// HTTP server with the ticker form
    Server,
    /// One full analysis printed to the terminal
    Single,
    /// Option data only, no agents
    Fetch,
}

impl Mode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "server" => Some(Mode::Server),
            "single" => Some(Mode::Single),
            "fetch" => Some(Mode::Fetch),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Server => "server",
            Mode::Single => "single",
            Mode::Fetch => "fetch",
        };
        f.write_str(name)
    }
}

/// Application configuration handler
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: Mode,
    pub port: u16,
    pub ticker: String,
}

impl AppConfig {
    /// Create configuration from environment variables.
    /// A ticker passed on the command line wins over OPTIONS_TICKER.
    pub fn from_env(cli_ticker: Option<String>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mode_value = std::env::var("OPTIONS_MODE").unwrap_or_else(|_| "server".to_string());
        let Some(mode) = Mode::parse(&mode_value) else {
            bail!("Invalid mode '{}'. Use 'server', 'single' or 'fetch'", mode_value);
        };

        let ticker = cli_ticker
            .or_else(|| std::env::var("OPTIONS_TICKER").ok())
            .unwrap_or_default();

        Ok(Self {
            mode,
            port: Self::parse_port(std::env::var("OPTIONS_PORT").ok().as_deref()),
            ticker,
        })
    }

    /// Port from the given value, or the default when missing or invalid
    fn parse_port(value: Option<&str>) -> u16 {
        value
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(Mode::parse("server"), Some(Mode::Server));
        assert_eq!(Mode::parse(" Single "), Some(Mode::Single));
        assert_eq!(Mode::parse("FETCH"), Some(Mode::Fetch));
        assert_eq!(Mode::parse("batch"), None);
        assert_eq!(Mode::Fetch.to_string(), "fetch");
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(AppConfig::parse_port(Some("8080")), 8080);
        assert_eq!(AppConfig::parse_port(Some("not-a-port")), DEFAULT_PORT);
        assert_eq!(AppConfig::parse_port(None), DEFAULT_PORT);
    }
}
