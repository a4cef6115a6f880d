//! SeaORM implementation of MushroomRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::{DomainError, Mushroom, MushroomRepository, NewMushroom};
use crate::models::mushroom::{self, ActiveModel, Entity as MushroomEntity};

impl TryFrom<mushroom::Model> for Mushroom {
    type Error = DomainError;

    fn try_from(model: mushroom::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            kind: model.kind.parse()?,
            name: model.name,
            description: model.description,
        })
    }
}

/// SeaORM-based implementation of MushroomRepository
pub struct SeaOrmMushroomRepository {
    db: DatabaseConnection,
}

impl SeaOrmMushroomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MushroomRepository for SeaOrmMushroomRepository {
    async fn find_all(&self) -> Result<Vec<Mushroom>, DomainError> {
        MushroomEntity::find()
            .order_by_asc(mushroom::Column::Name)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Mushroom::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Mushroom>, DomainError> {
        MushroomEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Mushroom::try_from)
            .transpose()
    }

    async fn create(&self, input: NewMushroom) -> Result<Mushroom, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let mushroom = ActiveModel {
            name: Set(input.name),
            kind: Set(input.kind.as_str().to_string()),
            description: Set(input.description),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = mushroom.insert(&self.db).await?;
        Mushroom::try_from(result)
    }
}
