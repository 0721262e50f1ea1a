pub mod calendar_feed;
pub mod exchange_rate;
pub mod report_sink;
