//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{ForestRepository, HunterRepository, MushroomRepository, VisitRepository};
use crate::infrastructure::{
    Config, SeaOrmForestRepository, SeaOrmHunterRepository, SeaOrmMushroomRepository,
    SeaOrmVisitRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Visit repository
    pub visit_repo: Arc<dyn VisitRepository>,
    /// Forest repository
    pub forest_repo: Arc<dyn ForestRepository>,
    /// Mushroom repository
    pub mushroom_repo: Arc<dyn MushroomRepository>,
    /// Hunter repository
    pub hunter_repo: Arc<dyn HunterRepository>,
    /// Idle time after which a session expires
    pub session_ttl: Duration,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection, config: &Config) -> Self {
        Self {
            visit_repo: Arc::new(SeaOrmVisitRepository::new(db.clone())),
            forest_repo: Arc::new(SeaOrmForestRepository::new(db.clone())),
            mushroom_repo: Arc::new(SeaOrmMushroomRepository::new(db.clone())),
            hunter_repo: Arc::new(SeaOrmHunterRepository::new(db.clone())),
            session_ttl: config.session_ttl,
            db,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
