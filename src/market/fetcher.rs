use super::config;
use super::models::{ExpirationSnapshot, FetchOutcome, MarketSnapshot, OptionContract, Ticker};
use super::port::MarketDataPort;
use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use tracing::{debug, info};

pub fn no_options_message(ticker: &Ticker) -> String {
    format!("No options data available for {}.", ticker)
}

pub fn no_near_term_message(ticker: &Ticker) -> String {
    format!("No options data available for the next 2 months for {}.", ticker)
}

/// Fetch a snapshot using the local calendar date as "today".
pub async fn fetch_today(port: &dyn MarketDataPort, ticker: &Ticker) -> Result<FetchOutcome> {
    fetch(port, ticker, Local::now().date_naive()).await
}

/// Price, in-window expirations and their projected chains for `ticker`.
///
/// Chains are requested one expiration at a time, in provider order.
pub async fn fetch(
    port: &dyn MarketDataPort,
    ticker: &Ticker,
    today: NaiveDate,
) -> Result<FetchOutcome> {
    let current_price = port.last_price(ticker).await?;
    let expirations = port.list_expirations(ticker).await?;

    if expirations.is_empty() {
        info!(ticker = %ticker, "provider lists no expirations");
        return Ok(FetchOutcome::NoData(no_options_message(ticker)));
    }

    let window = filter_window(&expirations, today)?;
    if window.is_empty() {
        info!(ticker = %ticker, offered = expirations.len(), "no expirations inside window");
        return Ok(FetchOutcome::NoData(no_near_term_message(ticker)));
    }

    let mut snapshots = Vec::with_capacity(window.len());
    for expiration_date in &window {
        let chain = port.get_chain(ticker, expiration_date).await?;
        debug!(
            ticker = %ticker,
            expiration = %expiration_date,
            calls = chain.calls.len(),
            puts = chain.puts.len(),
            "chain fetched"
        );

        snapshots.push(ExpirationSnapshot {
            expiration_date: expiration_date.clone(),
            calls: chain.calls.iter().map(OptionContract::from).collect(),
            puts: chain.puts.iter().map(OptionContract::from).collect(),
        });
    }

    Ok(FetchOutcome::Snapshot(MarketSnapshot {
        current_price,
        expiration_dates: window,
        expirations: snapshots,
    }))
}

/// Keep dates in `[today, today + 60 days]`, inclusive, in their original order.
pub fn filter_window(expirations: &[String], today: NaiveDate) -> Result<Vec<String>> {
    let last_day = today + Duration::days(config::EXPIRATION_WINDOW_DAYS);

    let mut kept = Vec::new();
    for date_str in expirations {
        let date = NaiveDate::parse_from_str(date_str, config::EXPIRY_DATE_FORMAT)
            .with_context(|| format!("Failed to parse expiration date: {}", date_str))?;

        if today <= date && date <= last_day {
            kept.push(date_str.clone());
        }
    }

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_window_is_inclusive() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let offered = dates(&["2024-05-31", "2024-06-01", "2024-07-31", "2024-08-01"]);

        let kept = filter_window(&offered, today).unwrap();
        assert_eq!(kept, dates(&["2024-06-01", "2024-07-31"]));
    }

    #[test]
    fn test_filter_window_keeps_provider_order() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let offered = dates(&["2024-07-05", "2024-06-21", "2024-06-07"]);

        let kept = filter_window(&offered, today).unwrap();
        assert_eq!(kept, offered);
    }

    #[test]
    fn test_filter_window_rejects_bad_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(filter_window(&dates(&["21-Jun-2024"]), today).is_err());
    }

    #[test]
    fn test_messages() {
        let ticker = Ticker::parse("tsla").unwrap().unwrap();
        assert_eq!(no_options_message(&ticker), "No options data available for TSLA.");
        assert_eq!(
            no_near_term_message(&ticker),
            "No options data available for the next 2 months for TSLA."
        );
    }
}
