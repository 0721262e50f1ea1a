use super::month::TargetMonth;
use super::pricing::PriceSuggestion;

/// One CSV line: `YYYY-MM,total_nights,vacant_nights,recommended_price`.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRow {
    pub month_label: String,
    pub total_nights: u32,
    pub vacant_nights: u32,
    pub recommended_price: f64,
}

impl PricingRow {
    pub fn new(month: &TargetMonth, suggestion: &PriceSuggestion) -> Self {
        Self {
            month_label: month.label(),
            total_nights: suggestion.total_nights,
            vacant_nights: suggestion.vacant_nights,
            recommended_price: suggestion.recommended_price,
        }
    }

    pub fn to_record(&self) -> [String; 4] {
        [
            self.month_label.clone(),
            self.total_nights.to_string(),
            self.vacant_nights.to_string(),
            format!("{:.2}", self.recommended_price),
        ]
    }
}

#[derive(Debug, Clone)]
pub enum ListingOutcome {
    Priced {
        listing: String,
        suggestion: PriceSuggestion,
        row: PricingRow,
    },
    Failed {
        listing: String,
        reason: String,
    },
}

impl ListingOutcome {
    pub fn listing(&self) -> &str {
        match self {
            Self::Priced { listing, .. } | Self::Failed { listing, .. } => listing,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PricingReport {
    pub month: TargetMonth,
    pub exchange_rate: f64,
    pub currency: String,
    pub outcomes: Vec<ListingOutcome>,
}

impl PricingReport {
    /// Successful rows, in listing order.
    pub fn rows(&self) -> Vec<PricingRow> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                ListingOutcome::Priced { row, .. } => Some(row.clone()),
                ListingOutcome::Failed { .. } => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<(&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                ListingOutcome::Failed { listing, reason } => {
                    Some((listing.as_str(), reason.as_str()))
                }
                ListingOutcome::Priced { .. } => None,
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| matches!(o, ListingOutcome::Priced { .. }))
    }
}

impl std::fmt::Display for PricingReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "# Pricing suggestion for {}", self.month)?;
        writeln!(
            f,
            "USD/{}: {} | nights in month: {}",
            self.currency,
            self.exchange_rate,
            self.month.total_days()
        )?;
        for outcome in &self.outcomes {
            match outcome {
                ListingOutcome::Priced {
                    listing,
                    suggestion,
                    ..
                } => writeln!(f, "  {listing}: {suggestion}")?,
                ListingOutcome::Failed { listing, reason } => {
                    writeln!(f, "  {listing}: FAILED ({reason})")?;
                }
            }
        }
        let failed = self.failures().len();
        if failed > 0 {
            writeln!(
                f,
                "{failed} of {} listings failed",
                self.outcomes.len()
            )?;
        }
        Ok(())
    }
}
