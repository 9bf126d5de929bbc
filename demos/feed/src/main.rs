//! `feed` — live wildlife-tracker telemetry around Nairobi.
//!
//! Five simulated collars report position, temperature, motion, and battery
//! every tick.  Readings go to an in-memory store (or an SQLite file with
//! `--db`), and a live-map watcher logs where every tracker is now.
//!
//! Run with:
//!   cargo run -p feed --release -- [config.json] [--db readings.db]
//!
//! `RUST_LOG` controls verbosity (default `info`).  Ctrl-C stops the clock
//! after the tick in progress.

mod config;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use wt_aggregate::{LiveSnapshot, LiveView, ReadingSource};
use wt_core::SensorId;
use wt_output::MemoryStore;
use wt_sim::{ClockBuilder, NoopObserver, ReadingSink};

use config::FeedConfig;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Readings kept by the in-memory store.
const MEMORY_CAPACITY: usize = 10_000;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    db:     Option<PathBuf>,
}

fn parse_args<I>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut out = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                let path = args.next().context("--db needs a path")?;
                out.db = Some(path.into());
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            _ if out.config.is_some() => bail!("more than one config path given"),
            _ => out.config = Some(arg.into()),
        }
    }
    Ok(out)
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    let config = FeedConfig::load(args.config.as_deref())
        .with_context(|| format!("loading config {:?}", args.config))?;

    let stop = CancellationToken::new();
    {
        let stop = stop.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "cannot listen for Ctrl-C");
            }
            info!("shutdown requested");
            stop.cancel();
        });
    }

    match args.db {
        #[cfg(feature = "sqlite")]
        Some(path) => {
            let store = Arc::new(wt_output::SqliteStore::open(&path)?);
            info!(db = %path.display(), "storing readings in sqlite");
            run_feed(Arc::clone(&store), config, &stop).await?;
            store.checkpoint().await?;
        }
        #[cfg(not(feature = "sqlite"))]
        Some(_) => bail!("--db requires building with `--features sqlite`"),
        None => {
            let store = Arc::new(MemoryStore::bounded(MEMORY_CAPACITY));
            run_feed(store, config, &stop).await?;
        }
    }
    Ok(())
}

/// Run the clock into `store` and watch it until `stop` fires.
async fn run_feed<S>(store: Arc<S>, config: FeedConfig, stop: &CancellationToken) -> Result<()>
where
    S: ReadingSink + ReadingSource + 'static,
{
    let period = config.telemetry.tick_interval();
    let names: HashMap<SensorId, String> =
        config.sensors.iter().map(|p| (p.id.clone(), p.name.clone())).collect();

    let mut clock = ClockBuilder::from_profiles(config.telemetry, config.sensors)?.build()?;

    let watcher = {
        let store = Arc::clone(&store);
        let stop = stop.clone();
        tokio::spawn(async move {
            let mut live = LiveView::new(store);
            live.watch(period, &stop, |snapshot| log_map(snapshot, &names)).await
        })
    };

    let summary = clock.run(&*store, &mut NoopObserver, stop).await;
    let refreshes = watcher.await?;

    info!(
        ticks      = summary.ticks,
        dispatched = summary.dispatched,
        failed     = summary.failed,
        refreshes,
        "feed finished"
    );
    Ok(())
}

fn log_map(snapshot: &LiveSnapshot, names: &HashMap<SensorId, String>) {
    if snapshot.stale {
        warn!(failures = snapshot.failures, "live map is stale; showing last known positions");
    }
    for r in snapshot.view.sorted() {
        let name = names.get(&r.sensor_id).map_or("unknown tracker", String::as_str);
        info!(
            sensor  = %r.sensor_id,
            name,
            lat     = r.latitude,
            lon     = r.longitude,
            temp_c  = r.temperature,
            battery = r.battery_level,
            motion  = r.motion_detected,
            at      = %r.timestamp,
            "position"
        );
    }
}
