//! Create `lists` table.
//! One auto-incrementing key plus the single 200-character text column.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lists::Table)
                    .if_not_exists()
                    .col(pk_auto(Lists::Id))
                    .col(string_len(Lists::List, 200).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Lists::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Lists {
    Table,
    Id,
    List,
}
