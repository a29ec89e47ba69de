//! The two dashboard queries: current quote and history, per market

use std::sync::Arc;

use tokio::sync::watch;

use super::cache::{QueryCache, QueryKey, QueryKind, QueryState};
use crate::api::QuoteSource;
use crate::models::{DolarQuote, HistoricalQuote};

pub struct DolarQueries {
    source: Arc<dyn QuoteSource>,
    quotes: QueryCache<DolarQuote>,
    history: QueryCache<Vec<HistoricalQuote>>,
}

impl DolarQueries {
    pub fn new(source: Arc<dyn QuoteSource>) -> Self {
        Self {
            source,
            quotes: QueryCache::new(),
            history: QueryCache::new(),
        }
    }

    /// Query `["dolar", casa]`
    pub async fn dolar_value(&self, casa: &str) -> Option<DolarQuote> {
        let key = QueryKey::new(QueryKind::Dolar, casa);
        let source = self.source.clone();
        self.quotes
            .fetch(&key, || async move { source.fetch_dolar_value(casa).await })
            .await
    }

    /// Query `["historicalDolar", casa]`
    pub async fn historical_dolar_value(&self, casa: &str) -> Option<Vec<HistoricalQuote>> {
        let key = QueryKey::new(QueryKind::HistoricalDolar, casa);
        let source = self.source.clone();
        self.history
            .fetch(&key, || async move { source.fetch_historical_dolar_value(casa).await })
            .await
    }

    pub async fn watch_dolar_value(&self, casa: &str) -> watch::Receiver<QueryState<DolarQuote>> {
        self.quotes
            .subscribe(&QueryKey::new(QueryKind::Dolar, casa))
            .await
    }

    pub async fn watch_historical_dolar_value(
        &self,
        casa: &str,
    ) -> watch::Receiver<QueryState<Vec<HistoricalQuote>>> {
        self.history
            .subscribe(&QueryKey::new(QueryKind::HistoricalDolar, casa))
            .await
    }

    /// Forget every cached result; the next query of each key refetches
    pub async fn invalidate_all(&self) {
        self.quotes.invalidate_all().await;
        self.history.invalidate_all().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockQuoteSource;

    fn source() -> Arc<MockQuoteSource> {
        Arc::new(
            MockQuoteSource::new()
                .with_quote("blue", 1320.0, 1340.0)
                .with_history("blue", &[("2024-01-01", 1000.0)]),
        )
    }

    #[tokio::test]
    async fn test_queries_hit_source_once() {
        let source = source();
        let queries = DolarQueries::new(source.clone());

        let (a, b) = tokio::join!(queries.dolar_value("blue"), queries.dolar_value("blue"));
        assert_eq!(a, b);
        assert_eq!(a.unwrap().venta, 1340.0);
        assert_eq!(source.quote_calls(), 1);

        queries.historical_dolar_value("blue").await;
        queries.historical_dolar_value("blue").await;
        assert_eq!(source.history_calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_market_is_error_state() {
        let queries = DolarQueries::new(source());

        let cripto = queries.watch_dolar_value("cripto").await;
        let blue = queries.watch_dolar_value("blue").await;

        assert!(queries.dolar_value("cripto").await.is_none());
        assert!(cripto.borrow().is_error);

        // The other market is unaffected
        assert!(queries.dolar_value("blue").await.is_some());
        assert!(!blue.borrow().is_error);
    }

    #[tokio::test]
    async fn test_invalidate_all_refetches() {
        let source = source();
        let queries = DolarQueries::new(source.clone());

        queries.dolar_value("blue").await;
        queries.historical_dolar_value("blue").await;
        queries.invalidate_all().await;
        queries.dolar_value("blue").await;
        queries.historical_dolar_value("blue").await;

        assert_eq!(source.quote_calls(), 2);
        assert_eq!(source.history_calls(), 2);
    }

    #[tokio::test]
    async fn test_watch_sees_data() {
        let queries = DolarQueries::new(source());
        let rx = queries.watch_historical_dolar_value("blue").await;

        queries.historical_dolar_value("blue").await;

        let state = rx.borrow().clone();
        assert_eq!(state.data.map(|h| h.len()), Some(1));
    }
}
