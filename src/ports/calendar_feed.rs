use async_trait::async_trait;

use crate::domain::booking::BookingEvent;
use crate::error::Result;

#[async_trait]
pub trait CalendarFeed: Send + Sync {
    /// Fetch and parse one listing's calendar into booking events.
    async fn fetch_events(&self, url: &str) -> Result<Vec<BookingEvent>>;
}
