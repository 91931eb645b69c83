//! Poe2Scout price sync daemon
//!
//! Keeps the local price cache for one league fresh, either once or on an
//! interval; the staleness policy decides whether a tick actually hits the
//! web.

use clap::Parser;
use scout_sync::{ScoutSync, SyncConfig, SyncSettings};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

/// Poe2Scout price sync - keeps per-league category prices fresh on disk
#[derive(Parser, Debug)]
#[command(name = "scout_sync")]
#[command(version, about, long_about = None)]
struct Args {
    /// League to fetch prices for
    #[arg(short, long, default_value = "Standard")]
    league: String,

    /// Directory for per-league backups and metadata
    #[arg(short, long, default_value_t = default_data_dir())]
    data_dir: String,

    /// Run a single refresh and exit (default: run continuously)
    #[arg(long, default_value_t = false)]
    once: bool,

    /// Check interval in minutes when running continuously
    #[arg(long, default_value_t = 30)]
    interval_minutes: u64,

    /// Age in minutes after which cached data is refreshed from the web
    #[arg(long, default_value_t = 30)]
    reload_period_minutes: u64,

    /// Skip the staleness check and always fetch from the web
    #[arg(long, default_value_t = false)]
    force: bool,

    /// Forward verbose diagnostics to the status sink
    #[arg(long, default_value_t = false)]
    debug: bool,
}

/// Returns the default data path: ~/.local/share/scout_sync
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scout_sync")
        .to_string_lossy()
        .to_string()
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = SyncConfig::new(&args.data_dir);
    config.settings = SyncSettings {
        auto_reload: true,
        reload_period_minutes: args.reload_period_minutes,
        debug_logging: args.debug,
    };

    log::info!("Starting scout_sync for league '{}'", args.league);
    log::info!("Data directory: {}", args.data_dir);

    let sync = ScoutSync::new(config);
    let token = CancellationToken::new();

    if args.once {
        sync.request_refresh(&args.league, args.force, token);
        sync.wait_until_idle().await;
        report(&sync);
        return;
    }

    log::info!(
        "Running in daemon mode, checking every {} minute(s)",
        args.interval_minutes
    );
    let mut ticker = interval(Duration::from_secs(args.interval_minutes * 60));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                log::info!("Scheduled check triggered");
                sync.request_refresh(&args.league, args.force, token.child_token());
                sync.wait_until_idle().await;
                report(&sync);
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Shutting down");
                token.cancel();
                sync.wait_until_idle().await;
                break;
            }
        }
    }
}

/// Logs a short summary of the published dataset
fn report(sync: &ScoutSync) {
    if let Some(data) = sync.data() {
        log::info!("Collected {} priced items", data.item_count());
        match data.divine_value() {
            Some(value) => log::info!("Divine Orb value: {value}"),
            None => log::info!("Divine Orb value unavailable"),
        }
    }
}
