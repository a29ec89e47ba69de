//! Historical quotes returned by the argentinadatos API

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One day of a market's history. Extra fields in the payload are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalQuote {
    /// Raw date string as sent by the server, used verbatim as merge key
    pub fecha: String,
    pub casa: String,
    pub venta: f64,
}

#[cfg(test)]
impl HistoricalQuote {
    pub fn new(fecha: &str, casa: &str, venta: f64) -> Self {
        Self {
            fecha: fecha.to_string(),
            casa: casa.to_string(),
            venta,
        }
    }
}

/// Parse a `fecha` value into an instant.
///
/// Plain `YYYY-MM-DD` dates are taken as midnight UTC. Full RFC 3339
/// timestamps are also accepted. Anything else yields `None`.
pub fn parse_fecha(fecha: &str) -> Option<DateTime<Utc>> {
    let trimmed = fecha.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
