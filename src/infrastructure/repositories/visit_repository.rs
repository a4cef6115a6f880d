//! SeaORM implementation of VisitRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::{
    DomainError, Forest, HunterIdentity, Mushroom, Visit, VisitInput, VisitRepository,
};
use crate::models::forest::{self, Entity as ForestEntity};
use crate::models::hunter::{self, Entity as HunterEntity};
use crate::models::mushroom::{self, Entity as MushroomEntity};
use crate::models::visit::{self, ActiveModel, Entity as VisitEntity};
use crate::models::visit_mushrooms::{self, Entity as VisitMushroomEntity};

/// SeaORM-based implementation of VisitRepository
pub struct SeaOrmVisitRepository {
    db: DatabaseConnection,
}

impl SeaOrmVisitRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load(&self, id: i32) -> Result<Visit, DomainError> {
        self.find_by_id(id).await?.ok_or(DomainError::NotFound)
    }
}

/// Resolve hunters, forests and mushrooms for a batch of visit rows
async fn assemble<C: ConnectionTrait>(
    db: &C,
    visits: Vec<visit::Model>,
) -> Result<Vec<Visit>, DomainError> {
    if visits.is_empty() {
        return Ok(Vec::new());
    }

    let hunter_ids: Vec<i32> = visits.iter().map(|v| v.hunter_id).collect();
    let forest_ids: Vec<i32> = visits.iter().map(|v| v.forest_id).collect();
    let visit_ids: Vec<i32> = visits.iter().map(|v| v.id).collect();

    let hunters: HashMap<i32, HunterIdentity> = HunterEntity::find()
        .filter(hunter::Column::Id.is_in(hunter_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|h| (h.id, HunterIdentity::from(h)))
        .collect();

    let forests: HashMap<i32, Forest> = ForestEntity::find()
        .filter(forest::Column::Id.is_in(forest_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|f| (f.id, Forest::from(f)))
        .collect();

    let links = VisitMushroomEntity::find()
        .filter(visit_mushrooms::Column::VisitId.is_in(visit_ids))
        .all(db)
        .await?;

    let mut mushrooms_by_visit: HashMap<i32, Vec<Mushroom>> = HashMap::new();

    if !links.is_empty() {
        let mushroom_ids: Vec<i32> = links.iter().map(|l| l.mushroom_id).collect();
        let mushrooms: HashMap<i32, Mushroom> = MushroomEntity::find()
            .filter(mushroom::Column::Id.is_in(mushroom_ids))
            .order_by_asc(mushroom::Column::Name)
            .all(db)
            .await?
            .into_iter()
            .map(|m| Mushroom::try_from(m).map(|m| (m.id, m)))
            .collect::<Result<_, _>>()?;

        for link in links {
            if let Some(m) = mushrooms.get(&link.mushroom_id) {
                mushrooms_by_visit
                    .entry(link.visit_id)
                    .or_default()
                    .push(m.clone());
            }
        }

        for list in mushrooms_by_visit.values_mut() {
            list.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }

    visits
        .into_iter()
        .map(|v| {
            let hunter = hunters.get(&v.hunter_id).cloned().ok_or_else(|| {
                DomainError::Internal(format!(
                    "Visit {} references missing hunter {}",
                    v.id, v.hunter_id
                ))
            })?;
            let forest = forests.get(&v.forest_id).cloned().ok_or_else(|| {
                DomainError::Internal(format!(
                    "Visit {} references missing forest {}",
                    v.id, v.forest_id
                ))
            })?;

            Ok(Visit {
                id: v.id,
                hunter,
                forest,
                date: v.date,
                note: v.note,
                mushrooms: mushrooms_by_visit.remove(&v.id).unwrap_or_default(),
            })
        })
        .collect()
}

async fn link_mushrooms<C: ConnectionTrait>(
    db: &C,
    visit_id: i32,
    mushroom_ids: &[i32],
) -> Result<(), DomainError> {
    if mushroom_ids.is_empty() {
        return Ok(());
    }

    let links = mushroom_ids.iter().map(|mushroom_id| visit_mushrooms::ActiveModel {
        visit_id: Set(visit_id),
        mushroom_id: Set(*mushroom_id),
    });

    VisitMushroomEntity::insert_many(links).exec(db).await?;
    Ok(())
}

#[async_trait]
impl VisitRepository for SeaOrmVisitRepository {
    async fn find_all(&self) -> Result<Vec<Visit>, DomainError> {
        let visits = VisitEntity::find()
            .order_by_desc(visit::Column::Date)
            .order_by_asc(visit::Column::Id)
            .all(&self.db)
            .await?;

        assemble(&self.db, visits).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Visit>, DomainError> {
        let Some(visit) = VisitEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        Ok(assemble(&self.db, vec![visit]).await?.pop())
    }

    async fn find_id_by_natural_key(
        &self,
        hunter_id: i32,
        forest_id: i32,
        date: NaiveDate,
    ) -> Result<Option<i32>, DomainError> {
        let visit = VisitEntity::find()
            .filter(visit::Column::HunterId.eq(hunter_id))
            .filter(visit::Column::ForestId.eq(forest_id))
            .filter(visit::Column::Date.eq(date))
            .one(&self.db)
            .await?;

        Ok(visit.map(|v| v.id))
    }

    async fn create(&self, input: VisitInput) -> Result<Visit, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();
        let txn = self.db.begin().await?;

        let visit = ActiveModel {
            hunter_id: Set(input.hunter_id),
            forest_id: Set(input.forest_id),
            date: Set(input.date),
            note: Set(input.note),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = visit.insert(&txn).await?;
        link_mushrooms(&txn, result.id, &input.mushroom_ids).await?;
        txn.commit().await?;

        self.load(result.id).await
    }

    async fn update(&self, id: i32, input: VisitInput) -> Result<Visit, DomainError> {
        let txn = self.db.begin().await?;

        let existing = VisitEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut visit: ActiveModel = existing.into();
        visit.hunter_id = Set(input.hunter_id);
        visit.forest_id = Set(input.forest_id);
        visit.date = Set(input.date);
        visit.note = Set(input.note);
        visit.updated_at = Set(chrono::Utc::now().to_rfc3339());
        visit.update(&txn).await?;

        VisitMushroomEntity::delete_many()
            .filter(visit_mushrooms::Column::VisitId.eq(id))
            .exec(&txn)
            .await?;
        link_mushrooms(&txn, id, &input.mushroom_ids).await?;
        txn.commit().await?;

        self.load(id).await
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        VisitMushroomEntity::delete_many()
            .filter(visit_mushrooms::Column::VisitId.eq(id))
            .exec(&txn)
            .await?;

        let result = VisitEntity::delete_by_id(id).exec(&txn).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        txn.commit().await?;
        Ok(())
    }
}
