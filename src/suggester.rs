use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::types::FailurePolicy;
use crate::domain::booking::BookingEvent;
use crate::domain::listing::ListingSource;
use crate::domain::month::TargetMonth;
use crate::domain::occupancy::Occupancy;
use crate::domain::pricing::{PriceSuggestion, PricingModel};
use crate::domain::report::{ListingOutcome, PricingReport, PricingRow};
use crate::error::Result;
use crate::ports::calendar_feed::CalendarFeed;
use crate::ports::exchange_rate::ExchangeRateProvider;
use crate::ports::report_sink::ReportSink;

/// Occupancy extraction followed by pricing, for one listing's events.
pub fn price_events(
    events: &[BookingEvent],
    month: &TargetMonth,
    exchange_rate: f64,
    model: &PricingModel,
) -> Result<PriceSuggestion> {
    let occupancy = Occupancy::from_events(events, month);
    model.suggest_for(&occupancy, exchange_rate)
}

/// Persist the report's priced rows.
///
/// Returns `None` without touching the sink when no listing was priced, so a
/// run in which every feed failed leaves an earlier report for the month intact.
pub fn write_report(sink: &dyn ReportSink, report: &PricingReport) -> Result<Option<PathBuf>> {
    let rows = report.rows();
    if rows.is_empty() {
        warn!(month = %report.month, "No listing priced, report not written");
        return Ok(None);
    }
    sink.write_rows(&report.month, &rows).map(Some)
}

/// Prices every configured listing for one target month.
pub struct PriceSuggester {
    feed: Arc<dyn CalendarFeed>,
    rates: Arc<dyn ExchangeRateProvider>,
    model: PricingModel,
    policy: FailurePolicy,
    symbol: String,
}

impl PriceSuggester {
    pub fn new(
        feed: Arc<dyn CalendarFeed>,
        rates: Arc<dyn ExchangeRateProvider>,
        model: PricingModel,
        policy: FailurePolicy,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            feed,
            rates,
            model,
            policy,
            symbol: symbol.into(),
        }
    }

    /// Fetch the exchange rate once, then price each listing in order.
    ///
    /// A failed rate quote always aborts. A failed listing aborts only under
    /// [`FailurePolicy::FailFast`]; otherwise it is recorded in the report.
    pub async fn run(
        &self,
        listings: &[ListingSource],
        month: TargetMonth,
    ) -> Result<PricingReport> {
        let exchange_rate = self.rates.usd_rate(&self.symbol).await?;
        info!(
            symbol = %self.symbol,
            exchange_rate,
            month = %month,
            listings = listings.len(),
            "Pricing listings"
        );

        let mut outcomes = Vec::with_capacity(listings.len());
        for source in listings {
            let listing = source.label();
            match self.price_listing(source, &month, exchange_rate).await {
                Ok(suggestion) => {
                    info!(%listing, %suggestion, "Listing priced");
                    outcomes.push(ListingOutcome::Priced {
                        row: PricingRow::new(&month, &suggestion),
                        listing,
                        suggestion,
                    });
                }
                Err(e) if self.policy == FailurePolicy::FailFast => {
                    warn!(%listing, error = %e, "Listing failed, aborting run");
                    return Err(e);
                }
                Err(e) => {
                    warn!(%listing, error = %e, "Listing failed, continuing");
                    outcomes.push(ListingOutcome::Failed {
                        listing,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(PricingReport {
            month,
            exchange_rate,
            currency: self.symbol.clone(),
            outcomes,
        })
    }

    async fn price_listing(
        &self,
        source: &ListingSource,
        month: &TargetMonth,
        exchange_rate: f64,
    ) -> Result<PriceSuggestion> {
        let events = self.feed.fetch_events(source.url()).await?;
        price_events(&events, month, exchange_rate, &self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::csv_report::CsvReportWriter;
    use crate::error::SuggesterError;
    use crate::test_helpers::{MockCalendarFeed, MockExchangeRates, date, event};

    fn june() -> TargetMonth {
        TargetMonth::new(2025, 6).unwrap()
    }

    fn sources(urls: &[&str]) -> Vec<ListingSource> {
        urls.iter().map(|u| ListingSource::Url((*u).to_string())).collect()
    }

    fn suggester(
        feed: MockCalendarFeed,
        rates: MockExchangeRates,
        policy: FailurePolicy,
    ) -> PriceSuggester {
        PriceSuggester::new(
            Arc::new(feed),
            Arc::new(rates),
            PricingModel::default(),
            policy,
            "JPY",
        )
    }

    #[test]
    fn price_events_reference_scenario() {
        let events = vec![BookingEvent::new(date(2025, 6, 1), date(2025, 6, 6))];
        let s = price_events(&events, &june(), 150.0, &PricingModel::default()).unwrap();
        assert_eq!(s.total_nights, 30);
        assert_eq!(s.vacant_nights, 25);
        assert!((s.recommended_price - 19_200.0).abs() < 0.005);
    }

    #[tokio::test]
    async fn run_prices_each_listing_in_order() {
        let feed = MockCalendarFeed::new().with_events(|url| {
            if url.ends_with("busy.ics") {
                Ok(vec![event("2025-06-01", "2025-07-01")])
            } else {
                Ok(vec![])
            }
        });
        let s = suggester(feed, MockExchangeRates::fixed(150.0), FailurePolicy::Continue);

        let report = s
            .run(&sources(&["https://a/busy.ics", "https://a/empty.ics"]), june())
            .await
            .unwrap();

        assert!(report.is_complete());
        let rows = report.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].vacant_nights, 0);
        assert_eq!(rows[1].vacant_nights, 30);
        assert!((rows[0].recommended_price - 16_200.0).abs() < 0.005);
        assert!((rows[1].recommended_price - 19_800.0).abs() < 0.005);
        assert_eq!(report.currency, "JPY");
    }

    #[tokio::test]
    async fn continue_policy_records_failures() {
        let feed = MockCalendarFeed::new().with_events(|url| {
            if url.contains("broken") {
                Err(SuggesterError::Parse {
                    reason: "HTTP 500".into(),
                })
            } else {
                Ok(vec![])
            }
        });
        let s = suggester(feed, MockExchangeRates::fixed(1.0), FailurePolicy::Continue);

        let report = s
            .run(
                &sources(&["https://a/1.ics", "https://a/broken.ics", "https://a/3.ics"]),
                june(),
            )
            .await
            .unwrap();

        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.rows().len(), 2);
        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "https://a/broken.ics");
        assert!(failures[0].1.contains("HTTP 500"));
    }

    #[tokio::test]
    async fn fail_fast_policy_aborts_on_first_failure() {
        let feed = MockCalendarFeed::new().with_events(|_| {
            Err(SuggesterError::Parse {
                reason: "not a calendar".into(),
            })
        });
        let s = suggester(feed, MockExchangeRates::fixed(1.0), FailurePolicy::FailFast);

        let err = s
            .run(&sources(&["https://a/1.ics", "https://a/2.ics"]), june())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not a calendar"));
    }

    #[tokio::test]
    async fn rate_failure_aborts_before_fetching_calendars() {
        let feed = MockCalendarFeed::new().with_events(|_| panic!("feed must not be fetched"));
        let rates = MockExchangeRates::new(|_| {
            Err(SuggesterError::ExchangeRate {
                reason: "offline".into(),
            })
        });
        let s = suggester(feed, rates, FailurePolicy::Continue);

        let err = s.run(&sources(&["https://a/1.ics"]), june()).await.unwrap_err();
        assert!(matches!(err, SuggesterError::ExchangeRate { .. }));
    }

    #[tokio::test]
    async fn requested_symbol_is_passed_to_provider() {
        let rates = MockExchangeRates::new(|symbol| {
            assert_eq!(symbol, "JPY");
            Ok(2.0)
        });
        let s = suggester(MockCalendarFeed::new(), rates, FailurePolicy::Continue);
        let report = s.run(&sources(&["https://a/1.ics"]), june()).await.unwrap();
        assert!((report.exchange_rate - 2.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn all_failed_run_keeps_existing_report() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CsvReportWriter::new(dir.path());
        let existing = writer.path_for(&june());
        std::fs::write(&existing, "2025-06,30,10,17400.00\n").unwrap();

        let feed = MockCalendarFeed::new().with_events(|_| {
            Err(SuggesterError::Parse {
                reason: "HTTP 503".into(),
            })
        });
        let s = suggester(feed, MockExchangeRates::fixed(150.0), FailurePolicy::Continue);
        let report = s
            .run(&sources(&["https://a/1.ics", "https://a/2.ics"]), june())
            .await
            .unwrap();

        assert!(!report.is_complete());
        assert_eq!(write_report(&writer, &report).unwrap(), None);
        assert_eq!(
            std::fs::read_to_string(&existing).unwrap(),
            "2025-06,30,10,17400.00\n"
        );
    }

    #[tokio::test]
    async fn partial_run_writes_priced_rows() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CsvReportWriter::new(dir.path());

        let feed = MockCalendarFeed::new().with_events(|url| {
            if url.contains("broken") {
                Err(SuggesterError::Parse {
                    reason: "HTTP 500".into(),
                })
            } else {
                Ok(vec![])
            }
        });
        let s = suggester(feed, MockExchangeRates::fixed(1.0), FailurePolicy::Continue);
        let report = s
            .run(&sources(&["https://a/broken.ics", "https://a/ok.ics"]), june())
            .await
            .unwrap();

        let path = write_report(&writer, &report).unwrap().unwrap();
        assert_eq!(path, writer.path_for(&june()));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "2025-06,30,30,132.00\n"
        );
    }
}
