use super::config::RECORD_CAP;
use super::models::{MarketSnapshot, OptionContract, Ticker};
use std::fmt::Write;

/// Render a snapshot as the opening message for the agents.
pub fn compose(ticker: &Ticker, snapshot: &MarketSnapshot) -> String {
    let mut message = format!(
        "Analyze the following options data for {ticker} to identify profitable Covered Call and Cash-Secured Put opportunities.\n\n\
         Ticker: {ticker}\nCurrent Price: ${:.2}\n\
         Expiration Dates: {}\n",
        snapshot.current_price,
        snapshot.expiration_dates.join(", "),
    );

    for exp in &snapshot.expirations {
        let _ = write!(message, "\nExpiration Date: {}\n", exp.expiration_date);
        let _ = write!(message, "\nCalls:\n{}\n", dump_records(exp.top_calls(RECORD_CAP)));
        let _ = write!(message, "\nPuts:\n{}\n", dump_records(exp.top_puts(RECORD_CAP)));
    }

    message
}

fn dump_records(records: &[OptionContract]) -> String {
    serde_json::to_string(records).unwrap_or_else(|_| "[]".to_string())
}
