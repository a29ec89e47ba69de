use crate::dashboard::Dashboard;

pub async fn execute(dashboard: &mut Dashboard) -> Result<String, String> {
    dashboard.refresh().await;
    Ok(dashboard.render())
}
