use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod dashboard;
mod models;
mod query;
mod services;
mod utils;

use api::DolarApiClient;
use commands::CommandOutcome;
use config::Config;
use dashboard::Dashboard;
use models::Market;
use query::{DolarQueries, QueryState};

fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    for directive in ["dolar_dashboard=info", "reqwest=warn", "hyper=warn"] {
        if let Ok(d) = directive.parse() {
            filter = filter.add_directive(d);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Log every state transition of one query until its cache goes away
fn spawn_state_logger<V>(name: String, mut rx: tokio::sync::watch::Receiver<QueryState<V>>)
where
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let (loading, failed, has_data) = {
                let state = rx.borrow_and_update();
                (state.is_loading, state.is_error, state.data.is_some())
            };
            if failed {
                warn!("Query {} failed (stale data kept: {})", name, has_data);
            } else {
                debug!("Query {} loading: {}, has data: {}", name, loading, has_data);
            }
        }
    });
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    info!("💵 Starting Dólar Dashboard...");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    info!(
        "Quotes from {}, history from {}",
        config.dolar_api_url, config.historical_api_url
    );

    let client = DolarApiClient::with_base_urls(
        config.dolar_api_url.clone(),
        config.historical_api_url.clone(),
    );
    let queries = DolarQueries::new(Arc::new(client));
    for market in Market::ALL {
        let quote_rx = queries.watch_dolar_value(market.as_str()).await;
        let history_rx = queries.watch_historical_dolar_value(market.as_str()).await;
        spawn_state_logger(format!("dolar {}", market), quote_rx);
        spawn_state_logger(format!("historical {}", market), history_rx);
    }
    let mut dashboard = Dashboard::new(queries, config.chart.clone());

    dashboard.load().await;
    println!("{}", dashboard.render());
    println!("\nType `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        match commands::handle_line(&mut dashboard, &line).await {
            CommandOutcome::Output(text) => println!("{}", text),
            CommandOutcome::Error(text) => println!("{}", text),
            CommandOutcome::Quit => break,
            CommandOutcome::Nothing => {}
        }
    }

    info!("👋 Bye");
}
