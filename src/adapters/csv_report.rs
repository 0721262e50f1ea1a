use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::month::TargetMonth;
use crate::domain::report::PricingRow;
use crate::error::Result;
use crate::ports::report_sink::ReportSink;

/// `pricing_suggestion_<YYYY><MM>.csv`
pub fn report_file_name(month: &TargetMonth) -> String {
    format!("pricing_suggestion_{}.csv", month.compact_label())
}

/// Headerless CSV, one line per priced listing.
pub struct CsvReportWriter {
    directory: PathBuf,
}

impl CsvReportWriter {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, month: &TargetMonth) -> PathBuf {
        self.directory.join(report_file_name(month))
    }
}

impl ReportSink for CsvReportWriter {
    fn write_rows(&self, month: &TargetMonth, rows: &[PricingRow]) -> Result<PathBuf> {
        let path = self.path_for(month);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;
        for row in rows {
            writer.write_record(row.to_record())?;
        }
        writer.flush()?;
        debug!(path = %path.display(), rows = rows.len(), "Report written");
        Ok(path)
    }
}
