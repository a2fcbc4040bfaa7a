use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Junction table for many-to-many relationship between seminars and participants
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seminar_participants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub seminar_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub participant_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seminar::Entity",
        from = "Column::SeminarId",
        to = "super::seminar::Column::Id"
    )]
    Seminar,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ParticipantId",
        to = "super::user::Column::Id"
    )]
    Participant,
}

impl Related<super::seminar::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seminar.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
