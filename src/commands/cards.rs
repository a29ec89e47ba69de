use crate::dashboard::Dashboard;

pub fn execute(dashboard: &Dashboard) -> Result<String, String> {
    dashboard
        .render_cards()
        .ok_or("Quotes are not available yet. Try `refresh`.".to_string())
}
