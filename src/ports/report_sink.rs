use std::path::PathBuf;

use crate::domain::month::TargetMonth;
use crate::domain::report::PricingRow;
use crate::error::Result;

pub trait ReportSink: Send + Sync {
    /// Persist the rows for `month`, returning where they were written.
    fn write_rows(&self, month: &TargetMonth, rows: &[PricingRow]) -> Result<PathBuf>;
}
