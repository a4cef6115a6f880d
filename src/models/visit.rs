use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A hunter's visit to a forest on a given day.
///
/// `(hunter_id, forest_id, date)` is unique at the storage layer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "visits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub hunter_id: i32,
    pub forest_id: i32,
    pub date: Date,
    pub note: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::hunter::Entity",
        from = "Column::HunterId",
        to = "super::hunter::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Hunter,
    #[sea_orm(
        belongs_to = "super::forest::Entity",
        from = "Column::ForestId",
        to = "super::forest::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Forest,
}

impl Related<super::hunter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hunter.def()
    }
}

impl Related<super::forest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Forest.def()
    }
}

impl Related<super::mushroom::Entity> for Entity {
    fn to() -> RelationDef {
        super::visit_mushrooms::Relation::Mushroom.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::visit_mushrooms::Relation::Visit.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
