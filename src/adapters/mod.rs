pub mod csv_report;
pub mod exchange;
pub mod ical;
