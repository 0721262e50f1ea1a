pub mod types;

use std::path::Path;

use chrono::NaiveDate;

use crate::domain::month::TargetMonth;
use crate::error::{Result, SuggesterError};
use types::Config;

pub const APP_ID_ENV: &str = "OXR_APP_ID";

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        SuggesterError::Config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yml::from_str(&content)?;
    Ok(config)
}

impl Config {
    /// A non-empty `OXR_APP_ID` value wins over the file.
    #[must_use]
    pub fn with_app_id_override(mut self, app_id: Option<String>) -> Self {
        if let Some(id) = app_id.filter(|id| !id.trim().is_empty()) {
            self.exchange.app_id = Some(id);
        }
        self
    }

    pub fn app_id(&self) -> Result<&str> {
        self.exchange
            .app_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                SuggesterError::Config(format!(
                    "no exchange-rate App ID; set {APP_ID_ENV} or exchange.app_id"
                ))
            })
    }

    /// Everything that must hold before any network access.
    pub fn validate(&self) -> Result<()> {
        if self.listings.is_empty() {
            return Err(SuggesterError::Config(
                "no listing calendars configured; add iCal URLs under `listings`".into(),
            ));
        }
        if let Some(idx) = self.listings.iter().position(|l| l.url().trim().is_empty()) {
            return Err(SuggesterError::Config(format!(
                "listing #{} has an empty url",
                idx + 1
            )));
        }
        self.app_id()?;
        if self.exchange.symbol.trim().is_empty() {
            return Err(SuggesterError::Config("exchange.symbol is empty".into()));
        }
        if !self.pricing.base_rate_usd.is_finite() || self.pricing.base_rate_usd <= 0.0 {
            return Err(SuggesterError::Config(format!(
                "pricing.base_rate_usd must be positive, got {}",
                self.pricing.base_rate_usd
            )));
        }
        if let Some(ref month) = self.pricing.target_month {
            TargetMonth::parse(month)?;
        }
        Ok(())
    }

    /// The configured override, or the month after `today`.
    pub fn target_month(&self, today: NaiveDate) -> Result<TargetMonth> {
        match self.pricing.target_month {
            Some(ref label) => TargetMonth::parse(label),
            None => TargetMonth::following(today),
        }
    }
}
