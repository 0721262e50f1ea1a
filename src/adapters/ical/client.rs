use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::adapters::ical::parser;
use crate::config::types::HttpConfig;
use crate::domain::booking::BookingEvent;
use crate::domain::listing::redact_query;
use crate::error::{Result, SuggesterError};
use crate::ports::calendar_feed::CalendarFeed;

/// Downloads listing calendars over HTTP(S).
pub struct IcalFeedClient {
    http: Client,
    max_retries: u32,
}

impl IcalFeedClient {
    pub fn new(config: &HttpConfig) -> std::result::Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            max_retries: config.max_retries,
        })
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let label = redact_query(url);
        debug!(url = %label, "Fetching calendar");

        let mut last_error = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_secs(u64::from(attempt) * 2);
                debug!(attempt, delay_secs = delay.as_secs(), "Retrying request");
                tokio::time::sleep(delay).await;
            }

            match self.http.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.text().await.map_err(SuggesterError::Http);
                    }
                    let error = SuggesterError::Parse {
                        reason: format!("HTTP {status} for {label}"),
                    };
                    if status.as_u16() == 429 || status.is_server_error() {
                        warn!(%status, attempt, "Calendar fetch failed, will retry");
                        last_error = Some(error);
                        continue;
                    }
                    return Err(error);
                }
                Err(e) => {
                    warn!(error = %e, attempt, "HTTP request failed");
                    last_error = Some(SuggesterError::Http(e));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| SuggesterError::Parse {
            reason: "all retries exhausted".into(),
        }))
    }
}

#[async_trait]
impl CalendarFeed for IcalFeedClient {
    async fn fetch_events(&self, url: &str) -> Result<Vec<BookingEvent>> {
        let text = self.fetch_text(url).await?;
        parser::parse_booking_events(&text)
    }
}
