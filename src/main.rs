use std::sync::Arc;
use std::time::Duration;

use cachet::config::Config;
use cachet::http::connection::ServerContext;
use cachet::server::{self, clock::ServerClock};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()>{
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let clock = Arc::new(ServerClock::new());
    let updater = server::clock::spawn_updater(
        clock.clone(),
        Duration::from_secs(cfg.resource.update_interval_secs),
    );
    let ctx = Arc::new(ServerContext::new(&cfg, clock));

    tokio::select! {
        res = server::listener::run(&cfg, ctx) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    updater.abort();
    Ok(())
}
