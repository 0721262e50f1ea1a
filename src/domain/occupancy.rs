use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use super::booking::BookingEvent;
use super::month::TargetMonth;

/// Nights inside `month` covered by at least one event.
///
/// Each event books every night from its start up to, but not including, its
/// end. Overlapping events collapse into one night; nights outside the month
/// are dropped.
pub fn booked_nights(events: &[BookingEvent], month: &TargetMonth) -> BTreeSet<NaiveDate> {
    let mut booked = BTreeSet::new();

    for event in events {
        if event.is_inverted() {
            debug!(%event, "Skipping event with checkout before check-in");
            continue;
        }

        let mut night = event.start_date.max(month.first_day());
        while night < event.end_date && night <= month.last_day() {
            booked.insert(night);
            match night.succ_opt() {
                Some(next) => night = next,
                None => break,
            }
        }
    }

    booked
}

/// Booked / vacant split of one listing's target month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub total_nights: u32,
    pub booked_nights: u32,
}

impl Occupancy {
    pub fn from_events(events: &[BookingEvent], month: &TargetMonth) -> Self {
        let total_nights = month.total_days();
        let booked = booked_nights(events, month);
        let booked_nights = u32::try_from(booked.len())
            .unwrap_or(total_nights)
            .min(total_nights);
        Self {
            total_nights,
            booked_nights,
        }
    }

    pub fn vacant_nights(&self) -> u32 {
        self.total_nights - self.booked_nights
    }
}
