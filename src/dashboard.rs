//! Top-level view: owns the view state, the four queries and the derived chart data

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::ChartSettings;
use crate::models::{ChartPoint, DollarSelection, DolarQuote, HistoricalQuote, Market, Theme, TimeWindow};
use crate::query::DolarQueries;
use crate::services::chart_service::{self, ChartError};
use crate::services::{card_service, view_service};

pub struct Dashboard {
    queries: DolarQueries,
    chart_settings: ChartSettings,
    pub selection: DollarSelection,
    pub window: TimeWindow,
    pub theme: Theme,
    dolar_blue: Option<DolarQuote>,
    dolar_cripto: Option<DolarQuote>,
    historical_blue: Option<Vec<HistoricalQuote>>,
    historical_cripto: Option<Vec<HistoricalQuote>>,
    chart_data: Vec<ChartPoint>,
}

impl Dashboard {
    pub fn new(queries: DolarQueries, chart_settings: ChartSettings) -> Self {
        Self {
            queries,
            chart_settings,
            selection: DollarSelection::default(),
            window: TimeWindow::default(),
            theme: Theme::default(),
            dolar_blue: None,
            dolar_cripto: None,
            historical_blue: None,
            historical_cripto: None,
            chart_data: Vec::new(),
        }
    }

    /// Run the four queries concurrently and rebuild the chart data.
    /// A failed query keeps whatever that slot held before.
    pub async fn load(&mut self) {
        self.load_at(Utc::now()).await
    }

    pub async fn load_at(&mut self, now: DateTime<Utc>) {
        let blue = Market::Blue.as_str();
        let cripto = Market::Cripto.as_str();

        let (dolar_blue, dolar_cripto, historical_blue, historical_cripto) = tokio::join!(
            self.queries.dolar_value(blue),
            self.queries.dolar_value(cripto),
            self.queries.historical_dolar_value(blue),
            self.queries.historical_dolar_value(cripto),
        );

        for (name, ok) in [
            ("dolar blue", dolar_blue.is_some()),
            ("dolar cripto", dolar_cripto.is_some()),
            ("historical blue", historical_blue.is_some()),
            ("historical cripto", historical_cripto.is_some()),
        ] {
            if !ok {
                warn!("No data for {}", name);
            }
        }

        self.dolar_blue = dolar_blue.or(self.dolar_blue.take());
        self.dolar_cripto = dolar_cripto.or(self.dolar_cripto.take());
        self.historical_blue = historical_blue.or(self.historical_blue.take());
        self.historical_cripto = historical_cripto.or(self.historical_cripto.take());

        self.recompute_chart_at(now);
    }

    /// Drop every cached query and load again
    pub async fn refresh(&mut self) {
        info!("🔄 Refreshing quotes");
        self.queries.invalidate_all().await;
        self.load().await;
    }

    /// Full recomputation from both histories; a missing history leaves the
    /// previous chart data in place.
    pub fn recompute_chart_at(&mut self, now: DateTime<Utc>) {
        if let (Some(blue), Some(cripto)) = (&self.historical_blue, &self.historical_cripto) {
            self.chart_data = chart_service::build_chart_data(blue, cripto, self.window, now);
        } else {
            debug!("Skipping chart rebuild, history incomplete");
        }
    }

    /// Card click
    pub fn select_market(&mut self, market: Market) {
        self.selection = self.selection.toggle(market);
        debug!("Selection is now {:?}", self.selection);
    }

    pub fn set_window(&mut self, window: TimeWindow) {
        self.set_window_at(window, Utc::now());
    }

    pub fn set_window_at(&mut self, window: TimeWindow, now: DateTime<Utc>) {
        self.window = window;
        self.recompute_chart_at(now);
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }

    pub fn chart_data(&self) -> &[ChartPoint] {
        &self.chart_data
    }

    pub fn render_cards(&self) -> Option<String> {
        card_service::render_cards(
            self.dolar_blue.as_ref(),
            self.dolar_cripto.as_ref(),
            self.selection,
        )
    }

    pub fn render_buttons(&self) -> String {
        view_service::render_window_buttons(self.window, self.theme)
    }

    pub fn render_table(&self) -> String {
        view_service::render_table(&self.chart_data, self.selection)
    }

    pub fn render_tooltip(&self, fecha: &str) -> Option<String> {
        self.chart_data
            .iter()
            .find(|p| p.fecha == fecha)
            .map(|p| view_service::render_tooltip(p, self.selection, self.theme))
    }

    /// Cards, window buttons and a one-line chart summary
    pub fn render(&self) -> String {
        let mut sections = Vec::new();
        if let Some(cards) = self.render_cards() {
            sections.push(cards);
        }
        sections.push(self.render_buttons());

        let summary = match (self.chart_data.first(), self.chart_data.last()) {
            (Some(first), Some(last)) => format!(
                "📈 {} points from {} to {}",
                self.chart_data.len(),
                first.fecha,
                last.fecha
            ),
            _ => "📈 No chart data".to_string(),
        };
        sections.push(summary);

        sections.join("\n\n")
    }

    /// Export the chart as PNG, to `path` or the configured output
    pub fn export_chart(&self, path: Option<&Path>) -> Result<PathBuf, ChartError> {
        let target = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.chart_settings.output.clone());

        chart_service::generate_chart(
            &self.chart_data,
            self.selection,
            self.theme,
            &target,
            self.chart_settings.width,
            self.chart_settings.height,
        )?;

        info!("Chart exported to {}", target.display());
        Ok(target)
    }
}
