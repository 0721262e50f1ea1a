use chrono::NaiveDate;

/// A reservation (or host block) read from a listing's calendar feed.
///
/// `end_date` is the checkout day and is not itself a booked night.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingEvent {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub summary: Option<String>,
}

impl BookingEvent {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            summary: None,
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Checkout before check-in. Such entries never count as booked nights.
    pub fn is_inverted(&self) -> bool {
        self.end_date < self.start_date
    }

    /// Number of nights covered, ignoring any month boundary.
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days().max(0)
    }
}

impl std::fmt::Display for BookingEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.start_date, self.end_date)?;
        if let Some(ref summary) = self.summary {
            write!(f, " ({summary})")?;
        }
        Ok(())
    }
}
