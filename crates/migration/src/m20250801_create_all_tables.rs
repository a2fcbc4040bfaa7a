use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create categories table
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string_len(50).not_null())
                    .to_owned(),
            )
            .await?;

        // Mirror of the identity provider's users, only read here
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::UserName).string())
                    .to_owned(),
            )
            .await?;

        // Create seminars table
        manager
            .create_table(
                Table::create()
                    .table(Seminars::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Seminars::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Seminars::Topic).string_len(100).not_null())
                    .col(ColumnDef::new(Seminars::Lecturer).string_len(60).not_null())
                    .col(ColumnDef::new(Seminars::Details).string_len(500).not_null())
                    .col(ColumnDef::new(Seminars::OrganizerId).string().not_null())
                    .col(ColumnDef::new(Seminars::DateAndTime).date_time().not_null())
                    .col(ColumnDef::new(Seminars::Duration).integer().not_null())
                    .col(ColumnDef::new(Seminars::CategoryId).integer().not_null())
                    .col(
                        ColumnDef::new(Seminars::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-seminars-category_id")
                            .from(Seminars::Table, Seminars::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create seminar_participants junction table (many-to-many). The composite
        // primary key is what makes a second join of the same pair fail.
        manager
            .create_table(
                Table::create()
                    .table(SeminarParticipants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SeminarParticipants::SeminarId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeminarParticipants::ParticipantId)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk-seminar_participants")
                            .col(SeminarParticipants::SeminarId)
                            .col(SeminarParticipants::ParticipantId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-seminar_participants-seminar_id")
                            .from(SeminarParticipants::Table, SeminarParticipants::SeminarId)
                            .to(Seminars::Table, Seminars::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(SeminarParticipants::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Seminars::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    UserName,
}

#[derive(Iden)]
enum Seminars {
    Table,
    Id,
    Topic,
    Lecturer,
    Details,
    OrganizerId,
    DateAndTime,
    Duration,
    CategoryId,
    IsDeleted,
}

#[derive(Iden)]
enum SeminarParticipants {
    Table,
    SeminarId,
    ParticipantId,
}
