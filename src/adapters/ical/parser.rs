use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use icalendar::parser::{Component, read_calendar, unfold};
use icalendar::{CalendarDateTime, DatePerhapsTime};
use tracing::{debug, warn};

use crate::domain::booking::BookingEvent;
use crate::error::{Result, SuggesterError};

/// Parse an iCalendar feed into booking events.
///
/// Every `VEVENT` counts as a booking, whatever its summary: Airbnb exports
/// both guest reservations and host blocks, and both make the night
/// unavailable. Date-times are reduced to their calendar date.
pub fn parse_booking_events(text: &str) -> Result<Vec<BookingEvent>> {
    if !text.contains("BEGIN:VCALENDAR") {
        return Err(SuggesterError::Parse {
            reason: "response is not an iCalendar document (no BEGIN:VCALENDAR)".into(),
        });
    }

    let unfolded = unfold(text);
    let calendar = read_calendar(&unfolded).map_err(|e| SuggesterError::Parse {
        reason: e.to_string(),
    })?;

    let mut vevents = Vec::new();
    for component in &calendar.components {
        collect_vevents(component, &mut vevents);
    }

    let mut events = Vec::with_capacity(vevents.len());
    for vevent in vevents {
        if let Some(event) = to_booking_event(vevent) {
            events.push(event);
        }
    }

    debug!(count = events.len(), "Parsed booking events");
    Ok(events)
}

fn collect_vevents<'a, 'c>(component: &'c Component<'a>, out: &mut Vec<&'c Component<'a>>) {
    if component.name == "VEVENT" {
        out.push(component);
        return;
    }
    for child in &component.components {
        collect_vevents(child, out);
    }
}

fn to_booking_event(vevent: &Component<'_>) -> Option<BookingEvent> {
    let summary = vevent.find_prop("SUMMARY").map(|p| p.val.to_string());

    let Some(start) = vevent
        .find_prop("DTSTART")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
    else {
        warn!(?summary, "Skipping VEVENT without a usable DTSTART");
        return None;
    };
    let start_date = to_date(start.clone());

    let end_date = match vevent
        .find_prop("DTEND")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
    {
        Some(end) => to_date(end),
        None => implicit_end_date(vevent, start, summary.as_deref()),
    };

    let mut event = BookingEvent::new(start_date, end_date);
    event.summary = summary;
    Some(event)
}

/// End date of a `VEVENT` without `DTEND` (RFC 5545 §3.6.1): `DTSTART`
/// plus `DURATION`, else one day for an all-day start, else the start
/// itself.
fn implicit_end_date(
    vevent: &Component<'_>,
    start: DatePerhapsTime,
    summary: Option<&str>,
) -> NaiveDate {
    let start_at = to_wall_clock(start.clone());

    if let Some(prop) = vevent.find_prop("DURATION") {
        let raw = prop.val.as_str();
        let end_at = iso8601::duration(raw.trim_start_matches('+'))
            .ok()
            .and_then(|d| TimeDelta::from_std(d.into()).ok())
            .and_then(|length| start_at.checked_add_signed(length));
        match end_at {
            Some(end_at) => return end_at.date(),
            None => warn!(?summary, duration = raw, "Ignoring unparseable DURATION"),
        }
    }

    match start {
        DatePerhapsTime::Date(d) => d.succ_opt().unwrap_or(d),
        DatePerhapsTime::DateTime(_) => start_at.date(),
    }
}

fn to_date(dpt: DatePerhapsTime) -> NaiveDate {
    to_wall_clock(dpt).date()
}

/// Wall-clock time in the value's own zone; all-day values start at midnight.
fn to_wall_clock(dpt: DatePerhapsTime) -> NaiveDateTime {
    match dpt {
        DatePerhapsTime::Date(d) => d.and_time(NaiveTime::MIN),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => dt.naive_utc(),
            CalendarDateTime::Floating(naive) => naive,
            CalendarDateTime::WithTimezone { date_time, .. } => date_time,
        },
    }
}
