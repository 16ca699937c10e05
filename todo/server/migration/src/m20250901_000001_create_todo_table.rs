use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Longest task content the table accepts.
const MAX_CONTENT_LENGTH: u32 = 200;

#[derive(DeriveIden)]
enum Todo {
    Table,
    Id,
    Content,
    DateCreated,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Todo::Table)
                    .if_not_exists()
                    .col(pk_auto(Todo::Id))
                    .col(
                        string_len(Todo::Content, MAX_CONTENT_LENGTH).check(Expr::cust(format!(
                            "length(content) BETWEEN 1 AND {MAX_CONTENT_LENGTH}"
                        ))),
                    )
                    .col(timestamp_with_time_zone(Todo::DateCreated).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Todo::Table).to_owned())
            .await
    }
}
