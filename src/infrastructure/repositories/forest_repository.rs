//! SeaORM implementation of ForestRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::{DomainError, Forest, ForestRepository, NewForest};
use crate::models::forest::{self, ActiveModel, Entity as ForestEntity};

impl From<forest::Model> for Forest {
    fn from(model: forest::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}

/// SeaORM-based implementation of ForestRepository
pub struct SeaOrmForestRepository {
    db: DatabaseConnection,
}

impl SeaOrmForestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ForestRepository for SeaOrmForestRepository {
    async fn find_all(&self) -> Result<Vec<Forest>, DomainError> {
        let forests = ForestEntity::find()
            .order_by_asc(forest::Column::Name)
            .all(&self.db)
            .await?;

        Ok(forests.into_iter().map(Forest::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Forest>, DomainError> {
        let forest = ForestEntity::find_by_id(id).one(&self.db).await?;
        Ok(forest.map(Forest::from))
    }

    async fn create(&self, input: NewForest) -> Result<Forest, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let forest = ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = forest.insert(&self.db).await?;
        Ok(Forest::from(result))
    }
}
