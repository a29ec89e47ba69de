//! View state enumerations: which market is shown, over which window, in which theme

use chrono::Duration;
use std::fmt;

/// The two dollar markets tracked by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Market {
    Blue,
    Cripto,
}

impl Market {
    pub const ALL: [Market; 2] = [Market::Blue, Market::Cripto];

    /// Identifier used in API paths and in the `casa` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Blue => "blue",
            Market::Cripto => "cripto",
        }
    }

    /// Series name shown on the chart and in tooltips
    pub fn series_name(&self) -> &'static str {
        match self {
            Market::Blue => "Dólar Blue",
            Market::Cripto => "Dólar Crypto",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "blue" => Some(Market::Blue),
            "cripto" | "crypto" => Some(Market::Cripto),
            _ => None,
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which series are visible on the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DollarSelection {
    Blue,
    Cripto,
    #[default]
    Both,
}

impl DollarSelection {
    /// Result of clicking the card of `market`: clicking the market that is
    /// already exclusively selected goes back to both, anything else narrows.
    pub fn toggle(self, market: Market) -> Self {
        let exclusive = Self::only(market);
        if self == exclusive {
            DollarSelection::Both
        } else {
            exclusive
        }
    }

    pub fn only(market: Market) -> Self {
        match market {
            Market::Blue => DollarSelection::Blue,
            Market::Cripto => DollarSelection::Cripto,
        }
    }

    pub fn shows(&self, market: Market) -> bool {
        *self == DollarSelection::Both || *self == Self::only(market)
    }

    /// Selection matching a raw `casa` value from a quote
    pub fn shows_casa(&self, casa: &str) -> bool {
        match Market::parse(casa) {
            Some(market) => self.shows(market),
            None => *self == DollarSelection::Both,
        }
    }
}

/// Trailing range of history shown on the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    All,
    SixMonths,
    OneMonth,
    OneWeek,
    OneDay,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 5] = [
        TimeWindow::All,
        TimeWindow::SixMonths,
        TimeWindow::OneMonth,
        TimeWindow::OneWeek,
        TimeWindow::OneDay,
    ];

    /// Maximum age of a point kept by this window. `None` keeps everything.
    pub fn threshold(&self) -> Option<Duration> {
        match self {
            TimeWindow::All => None,
            TimeWindow::SixMonths => Some(Duration::days(6 * 30)),
            TimeWindow::OneMonth => Some(Duration::days(30)),
            TimeWindow::OneWeek => Some(Duration::days(7)),
            TimeWindow::OneDay => Some(Duration::hours(24)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::All => "All",
            TimeWindow::SixMonths => "6 Months",
            TimeWindow::OneMonth => "1 Month",
            TimeWindow::OneWeek => "1 Week",
            TimeWindow::OneDay => "Today",
        }
    }

    /// Supported: all, 6m, 1m, 1w, 1d (plus a few long forms)
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.to_lowercase().as_str() {
            "all" => Ok(TimeWindow::All),
            "6m" | "6months" => Ok(TimeWindow::SixMonths),
            "1m" | "1month" => Ok(TimeWindow::OneMonth),
            "1w" | "1week" => Ok(TimeWindow::OneWeek),
            "1d" | "today" => Ok(TimeWindow::OneDay),
            _ => Err(format!(
                "Unknown time window: '{}'. Supported: all, 6m, 1m, 1w, 1d",
                value
            )),
        }
    }
}

/// Presentation flag. Has no effect on data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
