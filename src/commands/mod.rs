pub mod help;
pub mod select;
pub mod window;
pub mod theme;
pub mod cards;
pub mod chart;
pub mod refresh;

use tracing::{debug, warn};

use crate::dashboard::Dashboard;

/// What the input loop should do after a line
#[derive(Debug, PartialEq)]
pub enum CommandOutcome {
    Output(String),
    Error(String),
    Quit,
    Nothing,
}

pub async fn handle_line(dashboard: &mut Dashboard, line: &str) -> CommandOutcome {
    // Parse command and arguments
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return CommandOutcome::Nothing;
    }

    let command = parts[0].to_lowercase();
    let args = &parts[1..];
    debug!("Command '{}' with args {:?}", command, args);

    let result = match command.as_str() {
        "help" | "?" => help::execute(),
        "blue" | "cripto" | "crypto" | "select" => select::execute(dashboard, &command, args),
        "window" | "w" => window::execute(dashboard, args),
        "all" | "6m" | "1m" | "1w" | "1d" | "today" => window::execute(dashboard, &[command.as_str()]),
        "theme" => theme::execute(dashboard),
        "cards" | "show" => cards::execute(dashboard),
        "table" => chart::execute_table(dashboard),
        "tooltip" | "tt" => chart::execute_tooltip(dashboard, args),
        "chart" => chart::execute(dashboard, args),
        "refresh" | "r" => refresh::execute(dashboard).await,
        "quit" | "exit" | "q" => return CommandOutcome::Quit,
        _ => Err(format!("Unknown command '{}'. Type `help` for the command list.", parts[0])),
    };

    match result {
        Ok(output) => CommandOutcome::Output(output),
        Err(e) => {
            warn!("Command {} failed: {}", command, e);
            CommandOutcome::Error(format!("❌ {}", e))
        }
    }
}
