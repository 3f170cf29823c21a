//! Application state - shared across all handlers.

use std::sync::Arc;

use blogly_core::ports::{PostRepository, TagRepository, UserRepository};
use blogly_infra::database::{
    DatabaseConfig, DatabaseHandle, SqlPostRepository, SqlTagRepository, SqlUserRepository,
};
use migration::{DbErr, Migrator, MigratorTrait};

use crate::views::{MiniJinjaEngine, TemplateEngine};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub views: Arc<dyn TemplateEngine>,
    pub db: DatabaseHandle,
}

impl AppState {
    /// Connect to the database, optionally migrate it, and wire up the repositories.
    pub async fn new(db_config: &DatabaseConfig, auto_migrate: bool) -> Result<Self, DbErr> {
        let db = DatabaseHandle::connect(db_config).await?;

        if auto_migrate {
            Migrator::up(&db.conn, None).await?;
            tracing::info!("Database migrations applied");
        }

        let state = Self::from_handle(db);
        tracing::info!("Application state initialized");
        Ok(state)
    }

    pub fn from_handle(db: DatabaseHandle) -> Self {
        Self {
            users: Arc::new(SqlUserRepository::new(db.conn.clone())),
            posts: Arc::new(SqlPostRepository::new(db.conn.clone())),
            tags: Arc::new(SqlTagRepository::new(db.conn.clone())),
            views: Arc::new(MiniJinjaEngine::new()),
            db,
        }
    }
}
