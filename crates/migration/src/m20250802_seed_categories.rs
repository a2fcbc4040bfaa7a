use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

const CATEGORY_NAMES: [&str; 4] = ["Technology", "Business", "Science", "Arts"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Categories::Table)
            .columns([Categories::Name]);

        for name in CATEGORY_NAMES {
            insert.values_panic([name.into()]);
        }

        let db = manager.get_connection();
        db.execute(db.get_database_backend().build(&insert)).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Categories::Table)
            .and_where(Expr::col(Categories::Name).is_in(CATEGORY_NAMES))
            .to_owned();

        let db = manager.get_connection();
        db.execute(db.get_database_backend().build(&delete)).await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Categories {
    Table,
    Name,
}
