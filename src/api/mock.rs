//! In-memory quote source for tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use super::QuoteSource;
use crate::models::{DolarQuote, HistoricalQuote};

#[derive(Default)]
pub struct MockQuoteSource {
    pub quotes: HashMap<String, DolarQuote>,
    pub history: HashMap<String, Vec<HistoricalQuote>>,
    pub quote_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
}

impl MockQuoteSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(mut self, casa: &str, compra: f64, venta: f64) -> Self {
        self.quotes.insert(casa.to_string(), quote(casa, compra, venta));
        self
    }

    pub fn with_history(mut self, casa: &str, points: &[(&str, f64)]) -> Self {
        let series = points
            .iter()
            .map(|(fecha, venta)| HistoricalQuote::new(fecha, casa, *venta))
            .collect();
        self.history.insert(casa.to_string(), series);
        self
    }

    pub fn quote_calls(&self) -> usize {
        self.quote_calls.load(Ordering::SeqCst)
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }
}

pub fn quote(casa: &str, compra: f64, venta: f64) -> DolarQuote {
    let mut nombre = casa.to_string();
    if let Some(first) = nombre.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    DolarQuote {
        moneda: "USD".to_string(),
        casa: casa.to_string(),
        nombre,
        compra,
        venta,
        fecha_actualizacion: Utc.with_ymd_and_hms(2024, 8, 27, 20, 58, 0).unwrap(),
    }
}

#[async_trait]
impl QuoteSource for MockQuoteSource {
    async fn fetch_dolar_value(&self, casa: &str) -> Option<DolarQuote> {
        self.quote_calls.fetch_add(1, Ordering::SeqCst);
        self.quotes.get(casa).cloned()
    }

    async fn fetch_historical_dolar_value(&self, casa: &str) -> Option<Vec<HistoricalQuote>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.history.get(casa).cloned()
    }
}
