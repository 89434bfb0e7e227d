//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    config::AppConfig,
    image_store::FsImageStore,
    ports::{CatalogRepo, ImageStore, RepoError, RosterRepo},
    sqlite::{self, SqliteCatalogRepo, SqliteRosterRepo},
};
use crate::use_cases::{CatalogOps, RosterOps};

/// Main application state.
///
/// Holds the ports and the use cases built on them.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Port traits injected directly.
pub struct Repositories {
    pub roster: Arc<dyn RosterRepo>,
    pub catalog: Arc<dyn CatalogRepo>,
    pub images: Arc<dyn ImageStore>,
}

/// Container for all use cases.
pub struct UseCases {
    pub roster: RosterOps,
    pub catalog: CatalogOps,
}

impl App {
    pub fn new(
        roster: Arc<dyn RosterRepo>,
        catalog: Arc<dyn CatalogRepo>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        let use_cases = UseCases {
            roster: RosterOps::new(roster.clone()),
            catalog: CatalogOps::new(catalog.clone(), images.clone()),
        };

        Self {
            repositories: Repositories {
                roster,
                catalog,
                images,
            },
            use_cases,
        }
    }

    /// Connect to the configured database, ensure the schema and wire the
    /// SQLite and file-system adapters.
    pub async fn from_config(config: &AppConfig) -> Result<Self, RepoError> {
        let pool = sqlite::connect(&config.database_url, config.database_max_connections).await?;
        sqlite::ensure_schema(&pool).await?;

        Ok(Self::new(
            Arc::new(SqliteRosterRepo::new(pool.clone())),
            Arc::new(SqliteCatalogRepo::new(pool)),
            Arc::new(FsImageStore::new(config.image_root.clone())),
        ))
    }
}
