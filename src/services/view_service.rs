use crate::models::{ChartPoint, DollarSelection, Market, Theme, TimeWindow};
use crate::services::chart_service::series_value;
use crate::utils::Table;

/// The five window buttons on one line, active one highlighted per theme
pub fn render_window_buttons(active: TimeWindow, theme: Theme) -> String {
    TimeWindow::ALL
        .iter()
        .map(|window| {
            let label = window.label();
            match (*window == active, theme) {
                (true, Theme::Light) => format!("[{}]", label),
                (true, Theme::Dark) => format!("«{}»", label),
                (false, _) => format!(" {} ", label),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tooltip lines for one chart row: the label, then one line per visible series with a value
pub fn tooltip_lines(point: &ChartPoint, selection: DollarSelection) -> Vec<String> {
    let mut lines = vec![point.fecha.clone()];
    for market in Market::ALL.iter().copied().filter(|m| selection.shows(*m)) {
        if let Some(value) = series_value(point, market) {
            lines.push(format!("{}: ${:.2}", market.series_name(), value));
        }
    }
    lines
}

/// Tooltips are drawn inverted relative to the theme
pub fn render_tooltip(point: &ChartPoint, selection: DollarSelection, theme: Theme) -> String {
    let marker = match theme {
        Theme::Light => "▌",
        Theme::Dark => "│",
    };
    tooltip_lines(point, selection)
        .iter()
        .map(|line| format!("{} {}", marker, line))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_table(points: &[ChartPoint], selection: DollarSelection) -> String {
    let visible: Vec<Market> = Market::ALL
        .iter()
        .copied()
        .filter(|m| selection.shows(*m))
        .collect();

    let mut headers = vec!["Fecha"];
    headers.extend(visible.iter().map(|m| m.series_name()));
    let mut table = Table::new(headers);

    for point in points {
        let mut row = vec![point.fecha.clone()];
        for market in &visible {
            row.push(
                series_value(point, *market)
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_else(|| "-".to_string()),
            );
        }
        table.add_row(row);
    }

    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> ChartPoint {
        ChartPoint {
            fecha: "2024-01-01".to_string(),
            blue_dollar: Some(1000.0),
            crypto_dollar: Some(1010.5),
        }
    }

    #[test]
    fn test_window_buttons_highlight_active() {
        let light = render_window_buttons(TimeWindow::OneWeek, Theme::Light);
        assert!(light.contains("[1 Week]"));
        assert!(light.contains(" Today "));

        let dark = render_window_buttons(TimeWindow::All, Theme::Dark);
        assert!(dark.contains("«All»"));
        assert!(!dark.contains('['));
    }

    #[test]
    fn test_tooltip_lines_follow_selection() {
        assert_eq!(
            tooltip_lines(&point(), DollarSelection::Both),
            vec!["2024-01-01", "Dólar Blue: $1000.00", "Dólar Crypto: $1010.50"]
        );
        assert_eq!(
            tooltip_lines(&point(), DollarSelection::Cripto),
            vec!["2024-01-01", "Dólar Crypto: $1010.50"]
        );
    }

    #[test]
    fn test_tooltip_skips_missing_values() {
        let p = ChartPoint { crypto_dollar: None, ..point() };
        assert_eq!(tooltip_lines(&p, DollarSelection::Both).len(), 2);
    }

    #[test]
    fn test_render_table() {
        let p2 = ChartPoint { fecha: "2024-01-02".into(), blue_dollar: None, crypto_dollar: Some(1.0) };
        let rendered = render_table(&[point(), p2], DollarSelection::Both);
        assert!(rendered.contains("Dólar Blue"));
        assert!(rendered.contains("1010.50"));
        assert!(rendered.lines().any(|l| l.starts_with("2024-01-02") && l.contains(" - ")));

        let blue_only = render_table(&[point()], DollarSelection::Blue);
        assert!(!blue_only.contains("Dólar Crypto"));
    }
}
