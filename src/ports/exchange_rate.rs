use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Units of `symbol` per one US dollar.
    async fn usd_rate(&self, symbol: &str) -> Result<f64>;
}
