use super::config;
use super::models::{ChartResponse, OptionsResponse, OptionsResult, ProviderChain, Ticker};
use super::port::MarketDataPort;
use crate::error::AnalyzerError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use rand::{seq::SliceRandom, thread_rng};
use reqwest::{header, Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

// -----------------------------------------------
// CLIENT WRAPPER WITH SESSION STATE
// -----------------------------------------------
pub struct YahooClient {
    client: Client,
    crumb: Arc<RwLock<Option<String>>>,
}

impl YahooClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            crumb: Arc::new(RwLock::new(None)),
        })
    }

    /// Cookie + crumb handshake (only once per client)
    async fn crumb(&self) -> Result<String> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Ok(crumb.clone());
        }

        let mut cached = self.crumb.write().await;
        if let Some(crumb) = cached.as_ref() {
            return Ok(crumb.clone());
        }

        // fc.yahoo.com answers 404 but sets the session cookie
        let _ = self
            .client
            .get(config::YAHOO_COOKIE_URL)
            .header(header::ACCEPT, config::HEADER_ACCEPT_HTML)
            .send()
            .await
            .context("Failed to warm up Yahoo session")?;

        tokio::time::sleep(Duration::from_millis(config::WARMUP_DELAY_MS)).await;

        let res = self
            .client
            .get(config::YAHOO_CRUMB_URL)
            .send()
            .await
            .context("Crumb request failed")?;

        let status = res.status();
        let crumb = res.text().await.context("Failed to read crumb")?;
        let crumb = crumb.trim().to_string();
        if !status.is_success() || crumb.is_empty() || crumb.starts_with('{') {
            let preview: String = crumb.chars().take(200).collect();
            return Err(AnalyzerError::Request(format!(
                "Crumb rejected ({}): {}",
                status, preview
            ))
            .into());
        }

        debug!("Yahoo session crumb acquired");
        *cached = Some(crumb.clone());
        Ok(crumb)
    }

    /// GET a JSON document. No retries: failures go straight to the caller.
    async fn fetch_json(&self, url: &str) -> Result<String> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .context("Request send failed")?;

        let status = res.status();
        debug!(url = %url, status = status.as_u16(), "Yahoo response");

        if status.is_success() {
            let text = res.text().await.context("Failed to read body")?;

            let trimmed = text.trim();
            if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                let preview: String = text.chars().take(200).collect();
                return Err(AnalyzerError::NonJsonResponse(preview).into());
            }

            Ok(text)
        } else if status == StatusCode::NOT_FOUND {
            // Yahoo answers unknown symbols with 404 and a JSON error body
            Ok(res.text().await.context("Failed to read body")?)
        } else {
            let body = res.text().await.unwrap_or_default();
            let preview: String = body.chars().take(200).collect();
            warn!(url = %url, status = %status, "Yahoo request failed");
            Err(AnalyzerError::Request(format!("HTTP {}: {}", status, preview)).into())
        }
    }

    async fn fetch_options(&self, url: &str) -> Result<Option<OptionsResult>> {
        let text = self.fetch_json(url).await?;
        let response: OptionsResponse =
            serde_json::from_str(&text).context("Failed to parse options response")?;

        Ok(response.option_chain.result.into_iter().next())
    }
}

#[async_trait]
impl MarketDataPort for YahooClient {
    // -----------------------------------------------
    // STEP 1: LAST PRICE
    // -----------------------------------------------
    async fn last_price(&self, ticker: &Ticker) -> Result<f64> {
        let url = config::yahoo_chart_url(ticker.as_str());
        let text = self.fetch_json(&url).await?;
        let chart: ChartResponse =
            serde_json::from_str(&text).context("Failed to parse price history")?;

        chart
            .last_close()
            .ok_or_else(|| AnalyzerError::MissingPrice(ticker.to_string()).into())
    }

    // -----------------------------------------------
    // STEP 2: EXPIRATION DATES
    // -----------------------------------------------
    async fn list_expirations(&self, ticker: &Ticker) -> Result<Vec<String>> {
        let crumb = self.crumb().await?;
        let url = config::yahoo_options_url(ticker.as_str(), &crumb);

        let Some(result) = self.fetch_options(&url).await? else {
            return Ok(Vec::new());
        };

        Ok(epochs_to_dates(&result.expiration_dates))
    }

    // -----------------------------------------------
    // STEP 3: OPTION CHAIN
    // -----------------------------------------------
    async fn get_chain(&self, ticker: &Ticker, expiration_date: &str) -> Result<ProviderChain> {
        let epoch = date_to_epoch(expiration_date)?;
        let crumb = self.crumb().await?;
        let url = config::yahoo_option_chain_url(ticker.as_str(), epoch, &crumb);

        let chain = self
            .fetch_options(&url)
            .await?
            .and_then(|result| result.options.into_iter().next())
            .unwrap_or_default();

        Ok(chain)
    }
}

/// Yahoo lists expirations as midnight-UTC epoch seconds.
pub fn epochs_to_dates(epochs: &[i64]) -> Vec<String> {
    epochs
        .iter()
        .filter_map(|&ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.date_naive().format(config::EXPIRY_DATE_FORMAT).to_string())
        .collect()
}

pub fn date_to_epoch(expiration_date: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(expiration_date, config::EXPIRY_DATE_FORMAT)
        .with_context(|| format!("Failed to parse expiration date: {}", expiration_date))?;

    Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp())
}

// -----------------------------------------------
// HTTP CLIENT BUILDER
// -----------------------------------------------
fn build_client() -> Result<Client> {
    let mut headers = header::HeaderMap::new();

    let lang = config::ACCEPT_LANGUAGES
        .choose(&mut thread_rng())
        .copied()
        .unwrap_or("en-US,en;q=0.9");
    headers.insert(header::ACCEPT_LANGUAGE, header::HeaderValue::from_str(lang)?);
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("*/*"));

    Client::builder()
        .default_headers(headers)
        .cookie_store(true) // crumb is bound to the session cookie
        .gzip(true)
        .user_agent(config::USER_AGENT)
        .timeout(config::HTTP_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}
