use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seminars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub topic: String,
    pub lecturer: String,
    pub details: String,
    /// Set once at creation, never changed by edits
    pub organizer_id: String,
    pub date_and_time: DateTime,
    /// Minutes
    pub duration: i32,
    pub category_id: i32,
    /// Soft-delete flag; once set the seminar is invisible to every query
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OrganizerId",
        to = "super::user::Column::Id"
    )]
    Organizer,
    #[sea_orm(has_many = "super::seminar_participant::Entity")]
    SeminarParticipants,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organizer.def()
    }
}

impl Related<super::seminar_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeminarParticipants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
