use crate::catalog_actor::{self, CatalogError, CatalogManager};
use crate::clients::{CatalogClient, OrderClient};
use crate::config::AppSettings;
use crate::order_actor::{self, OrderManager};
use crate::seed;
use crate::storage::{Database, StorageError};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::info;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Seeding failed: {0}")]
    Seed(#[from] CatalogError),

    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}

/// The running pizzeria: both actors, their clients and the shared database.
pub struct PizzeriaSystem {
    pub catalog_client: CatalogClient,
    pub order_client: OrderClient,
    database: Database,
    handles: Vec<JoinHandle<()>>,
}

impl PizzeriaSystem {
    /// Connects, migrates, spawns the actors and seeds the demo catalog when asked to.
    pub async fn start(settings: &AppSettings) -> Result<Self, SystemError> {
        let database = Database::connect(settings).await?;
        database.migrate().await?;

        let system = Self::with_database(database, settings.channel_capacity);
        if settings.seed_demo_data {
            seed::seed_catalog(&system.catalog_client).await?;
        }
        Ok(system)
    }

    /// Spawns both actors on an already migrated database.
    ///
    /// Must be called from within a Tokio runtime. `channel_capacity` must be non-zero.
    pub fn with_database(database: Database, channel_capacity: usize) -> Self {
        let (catalog_actor, catalog_client) = catalog_actor::new(channel_capacity);
        let (order_actor, order_client) = order_actor::new(channel_capacity);

        let catalog_handle = tokio::spawn(catalog_actor.run(CatalogManager::new(database.clone())));
        let order_handle = tokio::spawn(order_actor.run(OrderManager::new(database.clone())));
        info!(channel_capacity, "Pizzeria started");

        Self {
            catalog_client,
            order_client,
            database,
            handles: vec![catalog_handle, order_handle],
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down pizzeria");
        drop(self.catalog_client);
        drop(self.order_client);

        let mut outcome = Ok(());
        for handle in self.handles {
            if let Err(e) = handle.await {
                outcome = Err(SystemError::ActorTask(e));
            }
        }

        self.database.close().await;
        info!("Pizzeria stopped");
        outcome
    }
}
