use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vendors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Vendors::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Vendors::Name).string().not_null())
                    .col(ColumnDef::new(Vendors::ContactPerson).string().not_null())
                    .col(ColumnDef::new(Vendors::Email).string().not_null())
                    .col(ColumnDef::new(Vendors::Phone).string().not_null())
                    .col(ColumnDef::new(Vendors::Address).text().null())
                    .col(
                        ColumnDef::new(Vendors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Vendors::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_vendors_name")
                    .table(Vendors::Table)
                    .col(Vendors::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_vendors_email")
                    .table(Vendors::Table)
                    .col(Vendors::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vendors::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Vendors {
    Table,
    Id,
    Name,
    ContactPerson,
    Email,
    Phone,
    Address,
    CreatedAt,
    UpdatedAt,
}
