//! # Blue Carbon Registry Node Runtime
//!
//! The main entry point of the registry service.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging and metrics
//! 2. Load configuration from the environment
//! 3. Open the result store, connect the ledger, build the orchestrator
//! 4. Serve the HTTP API until Ctrl+C
//!
//! A missing scorer or ledger configuration is logged and the node starts
//! in degraded mode; only an unusable data directory or port stops startup.

use anyhow::{Context, Result};
use bc_telemetry::{init_logging, register_metrics, TelemetryConfig};
use tracing::{error, info};

use node_runtime::{load_config, NodeConfig, SubsystemContainer};

/// The node runtime: all subsystems plus the HTTP gateway.
struct NodeRuntime {
    container: SubsystemContainer,
}

impl NodeRuntime {
    async fn new(config: NodeConfig) -> Result<Self> {
        let container = SubsystemContainer::new(config).await?;
        Ok(Self { container })
    }

    /// Serve until the shutdown signal.
    async fn run(self) -> Result<()> {
        let config = &self.container.config;
        info!("===========================================");
        info!("  Blue Carbon Registry v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");
        info!("HTTP Port: {}", config.gateway.port);
        info!("Data Dir: {:?}", config.data_dir);
        info!("Max evidence: {} bytes", config.gateway.max_evidence_bytes);
        info!(
            "Ledger: {}",
            if self.container.ledger.is_enabled() {
                "enabled"
            } else {
                "disabled"
            }
        );

        self.container
            .gateway()
            .start(shutdown_signal())
            .await
            .context("HTTP gateway failed")?;

        info!("Shutdown complete");
        Ok(())
    }
}

/// Resolves on Ctrl+C. If the handler cannot be installed the node runs
/// until killed.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal, draining connections..."),
        Err(e) => {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_logging(&telemetry).context("failed to initialize logging")?;
    register_metrics().context("failed to register metrics")?;
    info!(service = %telemetry.service_name, "Starting node runtime");

    let config = load_config();
    let runtime = NodeRuntime::new(config).await?;
    runtime.run().await
}
