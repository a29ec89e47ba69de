//! Chart generation models

use serde::{Deserialize, Serialize};

/// A merged row of the comparison chart, one per distinct `fecha`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub fecha: String,
    pub blue_dollar: Option<f64>,
    pub crypto_dollar: Option<f64>,
}

impl ChartPoint {
    pub fn new(fecha: &str) -> Self {
        Self {
            fecha: fecha.to_string(),
            ..Default::default()
        }
    }
}
