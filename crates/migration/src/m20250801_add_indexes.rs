use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Every read filters on the soft-delete flag
        manager
            .create_index(
                Index::create()
                    .name("idx_seminars_is_deleted")
                    .table(Seminars::Table)
                    .col(Seminars::IsDeleted)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_seminars_category_id")
                    .table(Seminars::Table)
                    .col(Seminars::CategoryId)
                    .to_owned(),
            )
            .await?;

        // The primary key covers seminar_id lookups; "joined" lists go by participant
        manager
            .create_index(
                Index::create()
                    .name("idx_seminar_participants_participant_id")
                    .table(SeminarParticipants::Table)
                    .col(SeminarParticipants::ParticipantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_seminar_participants_participant_id")
                    .table(SeminarParticipants::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_seminars_category_id")
                    .table(Seminars::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_seminars_is_deleted")
                    .table(Seminars::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Seminars {
    Table,
    IsDeleted,
    CategoryId,
}

#[derive(Iden)]
enum SeminarParticipants {
    Table,
    ParticipantId,
}
