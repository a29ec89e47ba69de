use crate::dashboard::Dashboard;
use crate::models::TimeWindow;

pub fn execute(dashboard: &mut Dashboard, args: &[&str]) -> Result<String, String> {
    let arg = args
        .first()
        .ok_or("Usage: `window <all|6m|1m|1w|1d>`".to_string())?;

    let window = TimeWindow::parse(arg)?;
    dashboard.set_window(window);
    tracing::info!("🕒 Window set to {}", window.label());

    Ok(format!(
        "{}\n📈 {} points",
        dashboard.render_buttons(),
        dashboard.chart_data().len()
    ))
}
