use crate::dashboard::Dashboard;

pub fn execute(dashboard: &mut Dashboard) -> Result<String, String> {
    dashboard.toggle_theme();
    Ok(format!("🎨 Theme: {:?}\n{}", dashboard.theme, dashboard.render_buttons()))
}
