use serde::{Deserialize, Serialize};

use crate::domain::listing::ListingSource;
use crate::domain::pricing::DEFAULT_BASE_RATE_USD;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub listings: Vec<ListingSource>,
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

/// What to do when one listing's calendar cannot be fetched or parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the whole run on the first failing listing.
    FailFast,
    /// Record the failure, price the remaining listings, report partially.
    #[default]
    Continue,
}

/// Open Exchange Rates settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExchangeConfig {
    #[serde(default = "default_exchange_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default = "default_symbol")]
    pub symbol: String,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_exchange_base_url(),
            app_id: None,
            symbol: default_symbol(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingConfig {
    #[serde(default = "default_base_rate")]
    pub base_rate_usd: f64,
    /// `YYYY-MM`; defaults to the month after today.
    #[serde(default)]
    pub target_month: Option<String>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_rate_usd: default_base_rate(),
            target_month: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
        }
    }
}

fn default_exchange_base_url() -> String {
    "https://openexchangerates.org".into()
}

fn default_symbol() -> String {
    "JPY".into()
}

fn default_base_rate() -> f64 {
    DEFAULT_BASE_RATE_USD
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into()
}

fn default_timeout() -> u64 {
    10
}

fn default_retries() -> u32 {
    2
}

fn default_output_dir() -> String {
    ".".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = Config::default();
        assert!(config.listings.is_empty());
        assert_eq!(config.exchange.base_url, "https://openexchangerates.org");
        assert_eq!(config.exchange.symbol, "JPY");
        assert!(config.exchange.app_id.is_none());
        assert!((config.pricing.base_rate_usd - 120.0).abs() < f64::EPSILON);
        assert!(config.pricing.target_month.is_none());
        assert_eq!(config.http.request_timeout_secs, 10);
        assert_eq!(config.http.max_retries, 2);
        assert_eq!(config.output.directory, ".");
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
    }

    #[test]
    fn user_agent_names_the_crate() {
        assert!(HttpConfig::default().user_agent.starts_with("airbnb-price-suggester/"));
    }

    #[test]
    fn config_serde_roundtrip() {
        let mut original = Config::default();
        original.listings.push(ListingSource::Url("https://example.com/a.ics".into()));
        original.failure_policy = FailurePolicy::FailFast;
        let yaml = serde_yml::to_string(&original).unwrap();
        let restored: Config = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(restored.listings, original.listings);
        assert_eq!(restored.failure_policy, FailurePolicy::FailFast);
        assert_eq!(restored.http.max_retries, original.http.max_retries);
    }

    #[test]
    fn config_deserialize_with_overrides() {
        let yaml = "pricing:\n  base_rate_usd: 95.5\nfailure_policy: fail_fast";
        let config: Config = serde_yml::from_str(yaml).unwrap();
        assert!((config.pricing.base_rate_usd - 95.5).abs() < f64::EPSILON);
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);
        // Other fields get defaults
        assert_eq!(config.exchange.symbol, "JPY");
        assert_eq!(config.http.request_timeout_secs, 10);
    }

    #[test]
    fn unknown_failure_policy_rejected() {
        let result: Result<Config, _> = serde_yml::from_str("failure_policy: retry_forever");
        assert!(result.is_err());
    }
}
