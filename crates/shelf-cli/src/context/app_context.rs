use anyhow::Context;
use shelf_config::ShelfConfig;
use shelf_db::ShelfDb;
use shelf_db::service::ShelfService;
use shelf_engine::LendingEngine;

/// Shared application resources initialized once at startup.
///
/// The catalog service and the lending engine share one database handle, so
/// their reads and writes go through the same gate.
pub struct AppContext {
    pub service: ShelfService,
    pub engine: LendingEngine<ShelfDb>,
    pub config: ShelfConfig,
}

impl AppContext {
    /// Open the configured database and wire the engine to it.
    pub async fn init(config: ShelfConfig) -> anyhow::Result<Self> {
        if let Some(parent) = config.database.parent_dir() {
            std::fs::create_dir_all(&parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let service = ShelfService::new_local(&config.database.path)
            .await
            .with_context(|| format!("failed to open database {}", config.database.path))?;
        let engine = LendingEngine::new(service.db().clone());

        tracing::debug!(path = %config.database.path, "application context ready");
        Ok(Self {
            service,
            engine,
            config,
        })
    }
}
