use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use plotters::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::models::history::parse_fecha;
use crate::models::{ChartPoint, DollarSelection, HistoricalQuote, Market, Theme, TimeWindow};

pub const BLUE_SERIES_COLOR: RGBColor = RGBColor(0x3b, 0x82, 0xf6);
pub const CRYPTO_SERIES_COLOR: RGBColor = RGBColor(0x10, 0xb9, 0x81);

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Not enough data to generate chart")]
    NotEnoughData,
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}

/// Merge both histories into one row per distinct `fecha` string.
///
/// Rows are created in first-seen order; `casa == "blue"` fills the blue
/// column and any other `casa` fills the crypto column. Dates only join when
/// their strings are identical.
pub fn merge_historical(blue: &[HistoricalQuote], cripto: &[HistoricalQuote]) -> Vec<ChartPoint> {
    let mut merged: Vec<ChartPoint> = Vec::new();
    let mut index_by_fecha: HashMap<&str, usize> = HashMap::new();

    for point in blue.iter().chain(cripto.iter()) {
        let index = *index_by_fecha
            .entry(point.fecha.as_str())
            .or_insert_with(|| {
                merged.push(ChartPoint::new(&point.fecha));
                merged.len() - 1
            });

        let entry = &mut merged[index];
        if point.casa == Market::Blue.as_str() {
            entry.blue_dollar = Some(point.venta);
        } else {
            entry.crypto_dollar = Some(point.venta);
        }
    }

    merged
}

/// Stable ascending sort by parsed date; unparseable dates go last
pub fn sort_by_fecha(points: &mut [ChartPoint]) {
    points.sort_by_cached_key(|p| {
        let parsed = parse_fecha(&p.fecha);
        (parsed.is_none(), parsed)
    });
}

/// Keep the points whose age relative to `now` is within the window.
/// Points with unparseable dates only survive `TimeWindow::All`.
pub fn filter_by_window(
    points: &[ChartPoint],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Vec<ChartPoint> {
    let Some(threshold) = window.threshold() else {
        return points.to_vec();
    };

    points
        .iter()
        .filter(|p| match parse_fecha(&p.fecha) {
            Some(date) => now - date <= threshold,
            None => false,
        })
        .cloned()
        .collect()
}

/// Merge, sort and window in one pass. Always a full recomputation.
pub fn build_chart_data(
    blue: &[HistoricalQuote],
    cripto: &[HistoricalQuote],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Vec<ChartPoint> {
    let mut merged = merge_historical(blue, cripto);
    sort_by_fecha(&mut merged);
    let filtered = filter_by_window(&merged, window, now);
    debug!(
        "Chart data rebuilt: {} blue + {} cripto -> {} merged -> {} in window {:?}",
        blue.len(),
        cripto.len(),
        merged.len(),
        filtered.len(),
        window
    );
    filtered
}

pub fn series_color(market: Market) -> RGBColor {
    match market {
        Market::Blue => BLUE_SERIES_COLOR,
        Market::Cripto => CRYPTO_SERIES_COLOR,
    }
}

pub fn series_value(point: &ChartPoint, market: Market) -> Option<f64> {
    match market {
        Market::Blue => point.blue_dollar,
        Market::Cripto => point.crypto_dollar,
    }
}

/// Split a series into runs of consecutive present values, keyed by row index
pub fn contiguous_runs(values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) => current.push((i as f64, *v)),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

/// Padded Y range over the visible series, `None` if nothing is visible
pub fn y_range(points: &[ChartPoint], selection: DollarSelection) -> Option<(f64, f64)> {
    let values: Vec<f64> = points
        .iter()
        .flat_map(|p| {
            Market::ALL
                .iter()
                .filter(|m| selection.shows(**m))
                .filter_map(move |m| series_value(p, *m))
        })
        .collect();

    if values.is_empty() {
        return None;
    }

    let min_price = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max_price = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let price_range = (max_price - min_price).max(1e-8);
    let padding = price_range * 0.1;
    Some(((min_price - padding).max(0.0), max_price + padding))
}

struct Palette {
    background: RGBColor,
    foreground: RGBColor,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                background: WHITE,
                foreground: RGBColor(0x0f, 0x17, 0x2a),
            },
            Theme::Dark => Palette {
                background: RGBColor(0x0f, 0x17, 0x2a),
                foreground: RGBColor(0xe5, 0xe7, 0xeb),
            },
        }
    }
}

fn drawing_error<E: std::fmt::Display>(context: &'static str) -> impl FnOnce(E) -> ChartError {
    move |e| ChartError::Drawing(format!("{}: {}", context, e))
}

/// Render the area chart to a PNG file
pub fn generate_chart(
    points: &[ChartPoint],
    selection: DollarSelection,
    theme: Theme,
    path: &Path,
    width: u32,
    height: u32,
) -> Result<(), ChartError> {
    let (y_min, y_max) = y_range(points, selection).ok_or(ChartError::NotEnoughData)?;
    let palette = Palette::for_theme(theme);
    let labels: Vec<&str> = points.iter().map(|p| p.fecha.as_str()).collect();
    let x_max = (points.len().saturating_sub(1) as f64).max(1.0);

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&palette.background)
        .map_err(drawing_error("Failed to fill canvas"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Dólar Blue vs Dólar Cripto",
            ("sans-serif", 28).into_font().color(&palette.foreground),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)
        .map_err(drawing_error("Failed to build chart"))?;

    let x_formatter = |x: &f64| {
        let index = x.round();
        if index < 0.0 {
            return String::new();
        }
        labels
            .get(index as usize)
            .map(|label| label.to_string())
            .unwrap_or_default()
    };
    let y_formatter = |y: &f64| format!("{:.0}", y);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(6)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .label_style(("sans-serif", 12).into_font().color(&palette.foreground))
        .axis_style(&palette.foreground)
        .draw()
        .map_err(drawing_error("Failed to draw mesh"))?;

    for market in Market::ALL.iter().copied().filter(|m| selection.shows(*m)) {
        let color = series_color(market);
        let values: Vec<Option<f64>> = points.iter().map(|p| series_value(p, market)).collect();

        for (i, run) in contiguous_runs(&values).into_iter().enumerate() {
            let series = chart
                .draw_series(AreaSeries::new(run, y_min, color.mix(0.6)).border_style(color))
                .map_err(drawing_error("Failed to draw series"))?;

            if i == 0 {
                series
                    .label(market.series_name())
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
            }
        }
    }

    chart
        .configure_series_labels()
        .background_style(palette.background.mix(0.8))
        .border_style(&palette.foreground)
        .label_font(("sans-serif", 14).into_font().color(&palette.foreground))
        .draw()
        .map_err(drawing_error("Failed to draw legend"))?;

    root.present()
        .map_err(drawing_error("Failed to render chart"))?;

    debug!("Chart written to {}", path.display());
    Ok(())
}
