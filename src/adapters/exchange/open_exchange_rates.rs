use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::types::{ExchangeConfig, HttpConfig};
use crate::error::{Result, SuggesterError};
use crate::ports::exchange_rate::ExchangeRateProvider;

/// Body of `GET /api/latest.json`, success or error.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    rates: HashMap<String, f64>,
    #[serde(default)]
    error: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// USD-based quotes from openexchangerates.org.
pub struct OpenExchangeRatesClient {
    http: Client,
    base_url: String,
    app_id: String,
}

impl OpenExchangeRatesClient {
    pub fn new(
        config: &ExchangeConfig,
        app_id: impl Into<String>,
        http_config: &HttpConfig,
    ) -> std::result::Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(&http_config.user_agent)
            .timeout(Duration::from_secs(http_config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_id: app_id.into(),
        })
    }

    fn latest_url(&self, symbol: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/api/latest.json", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("app_id", &self.app_id)
            .append_pair("symbols", symbol);
        Ok(url)
    }
}

#[async_trait]
impl ExchangeRateProvider for OpenExchangeRatesClient {
    async fn usd_rate(&self, symbol: &str) -> Result<f64> {
        let url = self.latest_url(symbol)?;
        debug!(symbol, "Fetching USD exchange rate");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let parsed: LatestResponse =
            serde_json::from_str(&body).map_err(|e| SuggesterError::ExchangeRate {
                reason: format!("unexpected response (HTTP {status}): {e}"),
            })?;

        if parsed.error || !status.is_success() {
            let detail = parsed
                .description
                .or(parsed.message)
                .unwrap_or_else(|| "no description".into());
            return Err(SuggesterError::ExchangeRate {
                reason: format!("HTTP {status}: {detail}"),
            });
        }

        let rate = parsed
            .rates
            .get(symbol)
            .copied()
            .ok_or_else(|| SuggesterError::ExchangeRate {
                reason: format!("{symbol} missing from response"),
            })?;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(SuggesterError::ExchangeRate {
                reason: format!("non-positive {symbol} quote: {rate}"),
            });
        }

        debug!(symbol, rate, "Exchange rate fetched");
        Ok(rate)
    }
}
