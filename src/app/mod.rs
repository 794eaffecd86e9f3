pub mod shutdown;

pub use shutdown::ShutdownManager;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use bitlings_core::{command_channel, AppConfig, LoggingSink, Metrics, Scheduler, World};
use bitlings_server::ObserverHub;
use tokio::net::TcpListener;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Tick loop plus the websocket observer server
    #[default]
    Server,
    /// Tick loop only, snapshots are logged and dropped
    Headless,
}

pub struct App {
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub metrics: Arc<Metrics>,
}

impl App {
    /// Loads `path`, falling back to defaults when it is unreadable or
    /// invalid. A missing file is created with the defaults.
    pub fn load_config(path: &Path) -> AppConfig {
        if let Ok(content) = std::fs::read_to_string(path) {
            match AppConfig::from_toml(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load {}: {:#}, using defaults", path.display(), e);
                }
            }
        }
        let default = AppConfig::default();
        if !path.exists() {
            match toml::to_string(&default) {
                Ok(toml_str) => {
                    if let Err(e) = std::fs::write(path, toml_str) {
                        tracing::warn!("Could not write default config to {}: {}", path.display(), e);
                    } else {
                        tracing::info!("Wrote default configuration to {}", path.display());
                    }
                }
                Err(e) => tracing::warn!("Could not serialise default config: {}", e),
            }
        }
        default
    }

    pub fn new(config_path: impl Into<PathBuf>, seed: Option<u64>) -> Result<Self> {
        let config_path = config_path.into();
        let mut config = Self::load_config(&config_path);
        if seed.is_some() {
            config.world.seed = seed;
        }
        config.validate().context("invalid configuration")?;
        Ok(Self {
            config,
            config_path,
            metrics: Arc::new(Metrics::new()),
        })
    }

    pub async fn run(&self, mode: RunMode) -> Result<()> {
        let shutdown = ShutdownManager::new();
        shutdown.listen_for_ctrl_c();
        self.run_until(mode, &shutdown).await
    }

    /// Runs in `mode` until `shutdown` fires.
    pub async fn run_until(&self, mode: RunMode, shutdown: &ShutdownManager) -> Result<()> {
        let world = World::new(self.config.clone());
        let (commands, queue) = command_channel();

        match mode {
            RunMode::Headless => {
                tracing::info!("Running in headless mode");
                let mut scheduler =
                    Scheduler::new(world, queue, LoggingSink).with_metrics(self.metrics.clone());
                scheduler.run(shutdown.wait()).await;
            }
            RunMode::Server => {
                let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
                let listener = TcpListener::bind(&addr)
                    .await
                    .with_context(|| format!("failed to bind {addr}"))?;
                let hub = Arc::new(ObserverHub::new(self.config.server.broadcast_capacity));
                let server = tokio::spawn(bitlings_server::serve(
                    listener,
                    hub.clone(),
                    commands,
                    shutdown.wait(),
                ));

                let mut scheduler =
                    Scheduler::new(world, queue, hub).with_metrics(self.metrics.clone());
                scheduler.run(shutdown.wait()).await;
                server.await.context("server task panicked")??;
            }
        }

        tracing::info!(
            ticks = self.metrics.tick_count(),
            elapsed_s = self.metrics.elapsed().as_secs_f64(),
            food_eaten = self.metrics.counter(bitlings_core::metrics::FOOD_EATEN),
            deaths = self.metrics.counter(bitlings_core::metrics::CREATURE_DIED),
            "Simulation finished"
        );
        Ok(())
    }
}
