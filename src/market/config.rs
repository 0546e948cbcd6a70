use std::time::Duration;

// -----------------------------------------------
// YAHOO FINANCE ENDPOINTS
// -----------------------------------------------
pub const YAHOO_QUERY_URL: &str = "https://query1.finance.yahoo.com";
pub const YAHOO_COOKIE_URL: &str = "https://fc.yahoo.com";
pub const YAHOO_CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";

pub fn yahoo_chart_url(symbol: &str) -> String {
    format!(
        "{}/v8/finance/chart/{}?range=1d&interval=1d",
        YAHOO_QUERY_URL,
        urlencoding::encode(symbol)
    )
}

pub fn yahoo_options_url(symbol: &str, crumb: &str) -> String {
    format!(
        "{}/v7/finance/options/{}?crumb={}",
        YAHOO_QUERY_URL,
        urlencoding::encode(symbol),
        urlencoding::encode(crumb)
    )
}

pub fn yahoo_option_chain_url(symbol: &str, expiry_epoch: i64, crumb: &str) -> String {
    format!(
        "{}&date={}",
        yahoo_options_url(symbol, crumb),
        expiry_epoch
    )
}

// -----------------------------------------------
// HTTP CLIENT CONFIG
// -----------------------------------------------
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                               AppleWebKit/537.36 (KHTML, like Gecko) \
                               Chrome/131.0.0.0 Safari/537.36";

pub const ACCEPT_LANGUAGES: &[&str] = &[
    "en-US,en;q=0.9",
    "en-GB,en;q=0.8",
    "en-CA,en;q=0.9",
];

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(20);

// -----------------------------------------------
// SESSION WARMUP
// -----------------------------------------------
pub const WARMUP_DELAY_MS: u64 = 200;
pub const HEADER_ACCEPT_HTML: &str = "text/html";

// -----------------------------------------------
// ANALYSIS WINDOW
// -----------------------------------------------

/// Expirations further out than this many days are ignored.
pub const EXPIRATION_WINDOW_DAYS: i64 = 60;

/// Calls and puts shown (and sent to the agents) per expiration.
pub const RECORD_CAP: usize = 5;

pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";
