use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::booking::BookingEvent;
use crate::error::Result;
use crate::ports::calendar_feed::CalendarFeed;
use crate::ports::exchange_rate::ExchangeRateProvider;

type EventsFn = Box<dyn Fn(&str) -> Result<Vec<BookingEvent>> + Send + Sync>;
type RateFn = Box<dyn Fn(&str) -> Result<f64> + Send + Sync>;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Booking from two `YYYY-MM-DD` strings.
pub fn event(start: &str, end: &str) -> BookingEvent {
    BookingEvent::new(
        NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
        NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
    )
}

pub struct MockCalendarFeed {
    events_fn: Mutex<EventsFn>,
}

impl Default for MockCalendarFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCalendarFeed {
    pub fn new() -> Self {
        Self {
            events_fn: Mutex::new(Box::new(|_| Ok(Vec::new()))),
        }
    }

    #[must_use]
    pub fn with_events(
        self,
        f: impl Fn(&str) -> Result<Vec<BookingEvent>> + Send + Sync + 'static,
    ) -> Self {
        *self.events_fn.lock().unwrap() = Box::new(f);
        self
    }
}

#[async_trait]
impl CalendarFeed for MockCalendarFeed {
    async fn fetch_events(&self, url: &str) -> Result<Vec<BookingEvent>> {
        let f = self.events_fn.lock().unwrap();
        f(url)
    }
}

pub struct MockExchangeRates {
    rate_fn: Mutex<RateFn>,
}

impl MockExchangeRates {
    pub fn new(f: impl Fn(&str) -> Result<f64> + Send + Sync + 'static) -> Self {
        Self {
            rate_fn: Mutex::new(Box::new(f)),
        }
    }

    pub fn fixed(rate: f64) -> Self {
        Self::new(move |_| Ok(rate))
    }
}

#[async_trait]
impl ExchangeRateProvider for MockExchangeRates {
    async fn usd_rate(&self, symbol: &str) -> Result<f64> {
        let f = self.rate_fn.lock().unwrap();
        f(symbol)
    }
}
