use std::path::Path;

use log::info;

use crate::config::Settings;
use crate::dashboard::DashboardController;
use crate::errors::{Error, Result};
use crate::feed::{Endpoints, PushChannel, RestOrderSource};
use crate::selection::SelectionStore;
use crate::server;

/// Runner for the dashboard process
pub struct DashboardRunner {
    config: Settings,
}

impl DashboardRunner {
    /// Create a new runner from a configuration file
    pub fn new(config_path: impl AsRef<Path>) -> Result<Self> {
        let path = config_path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| Error::InvalidConfig(format!("Config path is not UTF-8: {:?}", path)))?;
        let config = Settings::new(path_str)?;
        Ok(Self::from_settings(config))
    }

    /// Create a runner from already loaded settings
    pub fn from_settings(config: Settings) -> Self {
        Self { config }
    }

    /// Run the dashboard until Ctrl-C
    pub async fn run(self) -> Result<()> {
        // 1. Setup Logging
        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| self.config.log.level.clone());
        env_logger::Builder::new().parse_filters(&filter).try_init().ok();

        info!("Starting DashboardRunner...");

        // 2. Resolve upstream endpoints
        let endpoints = Endpoints::from_origin(&self.config.feed.origin)?;
        let source = RestOrderSource::new(endpoints.orders_url);
        let push = PushChannel::new(endpoints.push_url, self.config.feed.reconnect_delay());
        info!("Orders endpoint: {}", source.url());
        info!("Push channel: {}", push.url());

        // 3. Start the controller
        let selection = SelectionStore::new(self.config.state.path.clone());
        let controller = DashboardController::start(self.config.dashboard.clone(), selection, source, push);

        // 4. Serve until Ctrl-C
        let result = if self.config.server.enabled {
            server::start_server(
                controller.handle(),
                &self.config.server.host,
                self.config.server.port,
                wait_for_ctrl_c(),
            )
            .await
        } else {
            info!("Dashboard server disabled");
            wait_for_ctrl_c().await;
            Ok(())
        };

        controller.shutdown().await;
        info!("Dashboard stopped");
        result
    }
}

async fn wait_for_ctrl_c() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl-C, shutting down");
    }
}
