//! App orchestration.
//!
//! Wires the configured adapters into a [`Dashboard`] and drives it from a
//! refresh timer, interactive commands and a shutdown signal.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::command::Command;
use super::config::Config;
use super::dashboard::{CycleData, Dashboard, RefreshOutcome, Sources};
use super::sequencer::Ticket;
use crate::adapter::catalog::{
    CachedCatalogSource, FileCatalogSource, FileCatalogStore, HttpCatalogSource,
};
use crate::adapter::hypixel::BazaarClient;
use crate::error::Result;
use crate::port::{CatalogSource, Presenter};

/// Main application struct.
pub struct App;

impl App {
    /// Run the polling dashboard until quit or Ctrl-C.
    ///
    /// Commands are read line by line from stdin.
    pub async fn run<P: Presenter>(config: Config, presenter: P) -> Result<()> {
        let sources = build_sources(&config)?;
        let dashboard = Dashboard::new(sources, presenter, &config);

        let (command_tx, command_rx) = mpsc::channel(16);
        spawn_command_reader(command_tx);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = shutdown_tx.send(true);
            }
        });

        info!(
            mode = %config.dashboard.mode,
            interval_secs = config.market.poll_interval_secs,
            "Dashboard started"
        );

        Self::drive(
            dashboard,
            config.market.poll_interval(),
            command_rx,
            shutdown_rx,
        )
        .await;

        info!("Dashboard stopped");
        Ok(())
    }

    /// Fetch once, render once, and hand the presenter back.
    pub async fn scan<P: Presenter>(config: Config, presenter: P) -> Result<P> {
        let sources = build_sources(&config)?;
        let mut dashboard = Dashboard::new(sources, presenter, &config);

        match dashboard.refresh().await {
            RefreshOutcome::Degraded { opportunities } => {
                warn!(opportunities, "Scan completed with missing data");
            }
            outcome => debug!(?outcome, "Scan completed"),
        }

        Ok(dashboard.into_presenter())
    }

    /// Event loop: one timer, one command stream, one shutdown signal.
    ///
    /// The first tick fires immediately. Ticks that arrive while a fetch is
    /// still in flight are skipped; a `Refresh` command always issues a new
    /// fetch and the older one's result is discarded when it lands.
    pub async fn drive<P: Presenter>(
        mut dashboard: Dashboard<P>,
        poll_interval: Duration,
        mut commands: mpsc::Receiver<Command>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Dashboard<P> {
        let (done_tx, mut done_rx) = mpsc::channel::<(Ticket, CycleData)>(4);

        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut commands_open = true;

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    match result {
                        Ok(()) => {
                            if *shutdown.borrow() {
                                info!("Shutdown signal received");
                                break;
                            }
                        }
                        Err(_) => {
                            info!("Shutdown channel closed");
                            break;
                        }
                    }
                }
                _ = ticker.tick() => {
                    if dashboard.in_flight() {
                        debug!("Refresh still in flight, skipping tick");
                        continue;
                    }
                    spawn_refresh(&mut dashboard, &done_tx);
                }
                Some((ticket, data)) = done_rx.recv() => {
                    dashboard.complete_refresh(ticket, data);
                }
                command = commands.recv(), if commands_open => {
                    match command {
                        Some(Command::Toggle) => {
                            dashboard.toggle_mode();
                        }
                        Some(Command::Select(mode)) => {
                            dashboard.select_mode(mode);
                        }
                        Some(Command::Refresh) => {
                            spawn_refresh(&mut dashboard, &done_tx);
                            ticker.reset();
                        }
                        Some(Command::Quit) => {
                            info!("Quit requested");
                            break;
                        }
                        None => {
                            debug!("Command input closed");
                            commands_open = false;
                        }
                    }
                }
            }
        }

        dashboard
    }
}

/// Build the market and catalog sources from configuration.
pub fn build_sources(config: &Config) -> Result<Sources> {
    let timeout = config.market.request_timeout();
    let market = Arc::new(BazaarClient::new(config.market.api_url.clone(), timeout)?);

    let catalog: Arc<dyn CatalogSource> = if config.catalog.is_remote() {
        with_cache(HttpCatalogSource::new(&config.catalog.location, timeout)?, config)
    } else {
        with_cache(FileCatalogSource::new(&config.catalog.location), config)
    };

    Ok(Sources::new(market, catalog))
}

fn with_cache<S>(source: S, config: &Config) -> Arc<dyn CatalogSource>
where
    S: CatalogSource + 'static,
{
    if !config.catalog.cache_enabled {
        return Arc::new(source);
    }

    let path = config
        .catalog
        .cache_path
        .clone()
        .or_else(FileCatalogStore::default_path);

    match path {
        Some(path) => {
            debug!(path = %path.display(), "Catalog cache enabled");
            Arc::new(CachedCatalogSource::new(
                source,
                FileCatalogStore::new(path),
                config.catalog.max_age(),
            ))
        }
        None => {
            warn!("No cache directory available, catalog cache disabled");
            Arc::new(source)
        }
    }
}

fn spawn_refresh<P: Presenter>(
    dashboard: &mut Dashboard<P>,
    done: &mpsc::Sender<(Ticket, CycleData)>,
) {
    let pending = dashboard.begin_refresh();
    let sources = dashboard.sources().clone();
    let done = done.clone();

    tokio::spawn(async move {
        let data = sources.fetch(pending.with_catalog).await;
        if done.send((pending.ticket, data)).await.is_err() {
            debug!(
                ticket = pending.ticket.value(),
                "Dashboard gone, dropping refresh result"
            );
        }
    });
}

/// Read commands from stdin until EOF.
fn spawn_command_reader(commands: mpsc::Sender<Command>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match Command::parse(&line) {
                    Some(command) => {
                        if commands.send(command).await.is_err() {
                            break;
                        }
                    }
                    None => warn!(input = %line.trim(), "Unknown command"),
                },
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to read command input");
                    break;
                }
            }
        }
    });
}
