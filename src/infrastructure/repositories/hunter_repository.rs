//! SeaORM implementation of HunterRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{DomainError, HunterCredentials, HunterIdentity, HunterRepository, NewHunter};
use crate::models::hunter::{self, ActiveModel, Entity as HunterEntity};

impl From<hunter::Model> for HunterIdentity {
    fn from(model: hunter::Model) -> Self {
        Self {
            id: model.id,
            nickname: model.nickname,
            admin: model.admin,
        }
    }
}

/// SeaORM-based implementation of HunterRepository
pub struct SeaOrmHunterRepository {
    db: DatabaseConnection,
}

impl SeaOrmHunterRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HunterRepository for SeaOrmHunterRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<HunterIdentity>, DomainError> {
        let hunter = HunterEntity::find_by_id(id).one(&self.db).await?;
        Ok(hunter.map(HunterIdentity::from))
    }

    async fn find_credentials(
        &self,
        nickname: &str,
    ) -> Result<Option<HunterCredentials>, DomainError> {
        let hunter = HunterEntity::find()
            .filter(hunter::Column::Nickname.eq(nickname))
            .one(&self.db)
            .await?;

        Ok(hunter.map(|h| HunterCredentials {
            password_hash: h.password_hash.clone(),
            identity: HunterIdentity::from(h),
        }))
    }

    async fn create(&self, input: NewHunter) -> Result<HunterIdentity, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let hunter = ActiveModel {
            nickname: Set(input.nickname),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            password_hash: Set(input.password_hash),
            admin: Set(input.admin),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = hunter.insert(&self.db).await?;
        Ok(HunterIdentity::from(result))
    }
}
