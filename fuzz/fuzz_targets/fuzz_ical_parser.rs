#![no_main]
use libfuzzer_sys::fuzz_target;

use airbnb_price_suggester::adapters::ical::parser::parse_booking_events;
use airbnb_price_suggester::domain::month::TargetMonth;
use airbnb_price_suggester::domain::occupancy::booked_nights;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data)
        && let Ok(events) = parse_booking_events(text)
        && let Ok(month) = TargetMonth::new(2025, 6)
    {
        assert!(booked_nights(&events, &month).len() <= 30);
    }
});
