pub mod dolar;

use async_trait::async_trait;

use crate::models::{DolarQuote, HistoricalQuote};

pub use dolar::DolarApiClient;

/// Where the query layer gets its data from.
///
/// Implementations never fail loudly: an absent value is the only failure signal.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_dolar_value(&self, casa: &str) -> Option<DolarQuote>;

    async fn fetch_historical_dolar_value(&self, casa: &str) -> Option<Vec<HistoricalQuote>>;
}

#[cfg(test)]
pub mod mock;
