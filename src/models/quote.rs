//! Current quote ("snapshot") for a single dollar market

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot returned by `GET /v1/dolares/{casa}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DolarQuote {
    pub moneda: String,
    pub casa: String,
    pub nombre: String,
    pub compra: f64,
    pub venta: f64,
    #[serde(rename = "fechaActualizacion")]
    pub fecha_actualizacion: DateTime<Utc>,
}

impl DolarQuote {
    /// Percentage difference between sell and buy price.
    /// `None` when the buy price is zero.
    pub fn spread(&self) -> Option<f64> {
        if self.compra == 0.0 {
            return None;
        }
        Some((self.venta - self.compra) / self.compra * 100.0)
    }
}
