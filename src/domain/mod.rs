pub mod booking;
pub mod listing;
pub mod month;
pub mod occupancy;
pub mod pricing;
pub mod report;
