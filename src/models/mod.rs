//! Data models for the dashboard
//!
//! API payloads (quotes and history), the merged chart rows and the view
//! state enumerations.

pub mod quote;
pub mod history;
pub mod chart;
pub mod selection;

// Re-export commonly used types for convenience
pub use quote::DolarQuote;
pub use history::HistoricalQuote;
pub use chart::ChartPoint;
pub use selection::{DollarSelection, Market, Theme, TimeWindow};
