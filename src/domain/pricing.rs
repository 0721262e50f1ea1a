use super::occupancy::Occupancy;
use crate::error::{Result, SuggesterError};

pub const DEFAULT_BASE_RATE_USD: f64 = 120.0;

const FULLY_BOOKED_COEF: f64 = 0.9;
const VACANCY_SPAN: f64 = 0.2;

/// Linear demand pricing: 0.9x the base rate for a fully booked month, up to
/// 1.1x for an empty one.
pub fn occupancy_coefficient(vacancy_rate: f64) -> f64 {
    FULLY_BOOKED_COEF + VACANCY_SPAN * vacancy_rate.clamp(0.0, 1.0)
}

/// Round to 2 decimals, ties away from zero (`f64::round`), not to even:
/// an exact `x.xx5` always goes up in magnitude.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSuggestion {
    pub total_nights: u32,
    pub vacant_nights: u32,
    pub vacancy_rate: f64,
    pub occupancy_coef: f64,
    /// Nightly price in the quoted currency, rounded to 2 decimals.
    pub recommended_price: f64,
}

impl PriceSuggestion {
    pub fn booked_nights(&self) -> u32 {
        self.total_nights - self.vacant_nights
    }

    pub fn occupancy_rate(&self) -> f64 {
        (1.0 - self.vacancy_rate) * 100.0
    }
}

impl std::fmt::Display for PriceSuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} nights vacant (occupancy {:.1}%, coef {:.4}) -> {:.2}",
            self.vacant_nights,
            self.total_nights,
            self.occupancy_rate(),
            self.occupancy_coef,
            self.recommended_price
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingModel {
    pub base_rate_usd: f64,
}

impl Default for PricingModel {
    fn default() -> Self {
        Self {
            base_rate_usd: DEFAULT_BASE_RATE_USD,
        }
    }
}

impl PricingModel {
    pub fn new(base_rate_usd: f64) -> Self {
        Self { base_rate_usd }
    }

    pub fn suggest(
        &self,
        total_nights: u32,
        vacant_nights: u32,
        exchange_rate: f64,
    ) -> Result<PriceSuggestion> {
        if total_nights == 0 {
            return Err(SuggesterError::InvalidPricing {
                reason: "month has no nights".into(),
            });
        }
        if vacant_nights > total_nights {
            return Err(SuggesterError::InvalidPricing {
                reason: format!(
                    "vacant nights ({vacant_nights}) exceed total nights ({total_nights})"
                ),
            });
        }
        if !exchange_rate.is_finite() || exchange_rate <= 0.0 {
            return Err(SuggesterError::InvalidPricing {
                reason: format!("exchange rate must be positive, got {exchange_rate}"),
            });
        }
        if !self.base_rate_usd.is_finite() || self.base_rate_usd <= 0.0 {
            return Err(SuggesterError::InvalidPricing {
                reason: format!("base rate must be positive, got {}", self.base_rate_usd),
            });
        }

        let vacancy_rate = f64::from(vacant_nights) / f64::from(total_nights);
        let occupancy_coef = occupancy_coefficient(vacancy_rate);
        let recommended_price = round_to_cents(self.base_rate_usd * exchange_rate * occupancy_coef);

        Ok(PriceSuggestion {
            total_nights,
            vacant_nights,
            vacancy_rate,
            occupancy_coef,
            recommended_price,
        })
    }

    pub fn suggest_for(&self, occupancy: &Occupancy, exchange_rate: f64) -> Result<PriceSuggestion> {
        self.suggest(
            occupancy.total_nights,
            occupancy.vacant_nights(),
            exchange_rate,
        )
    }
}
