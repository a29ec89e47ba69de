use std::path::Path;

use crate::dashboard::Dashboard;

/// `chart [path]`: export the PNG
pub fn execute(dashboard: &Dashboard, args: &[&str]) -> Result<String, String> {
    tracing::info!("💹 Chart command called with args: {:?}", args);

    let path = args.first().map(Path::new);
    let written = dashboard
        .export_chart(path)
        .map_err(|e| e.to_string())?;

    Ok(format!(
        "🖼️ Chart saved to {} ({} points, {})",
        written.display(),
        dashboard.chart_data().len(),
        dashboard.window.label()
    ))
}

pub fn execute_table(dashboard: &Dashboard) -> Result<String, String> {
    if dashboard.chart_data().is_empty() {
        return Err("No chart data in the selected window.".to_string());
    }
    Ok(dashboard.render_table())
}

/// `tooltip <fecha>`
pub fn execute_tooltip(dashboard: &Dashboard, args: &[&str]) -> Result<String, String> {
    let fecha = args
        .first()
        .ok_or("Usage: `tooltip <fecha>`".to_string())?;

    dashboard
        .render_tooltip(fecha)
        .ok_or(format!("No chart point for '{}'", fecha))
}
