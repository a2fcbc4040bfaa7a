use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::seminar::Entity")]
    Seminars,
}

impl Related<super::seminar::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seminars.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
