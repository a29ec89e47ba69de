use crate::dashboard::Dashboard;
use crate::models::Market;

/// `blue`, `cripto`, or `select <market>`
pub fn execute(dashboard: &mut Dashboard, command: &str, args: &[&str]) -> Result<String, String> {
    let name = if command == "select" {
        args.first()
            .copied()
            .ok_or("Usage: `select <blue|cripto>`".to_string())?
    } else {
        command
    };

    let market = Market::parse(name)
        .ok_or(format!("Unknown market '{}'. Use: blue, cripto", name))?;

    dashboard.select_market(market);
    tracing::info!("🃏 Card {} clicked, selection {:?}", market, dashboard.selection);

    Ok(dashboard
        .render_cards()
        .unwrap_or_else(|| format!("Selection: {:?}", dashboard.selection)))
}
