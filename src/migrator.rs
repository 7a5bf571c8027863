use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_promotions_table::Migration)]
    }
}

mod m20240101_000001_create_promotions_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_promotions_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Promotions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Promotions::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Promotions::Name).string().not_null())
                        .col(ColumnDef::new(Promotions::Category).string().not_null())
                        .col(ColumnDef::new(Promotions::DiscountX).integer().not_null())
                        .col(ColumnDef::new(Promotions::DiscountY).integer().null())
                        .col(ColumnDef::new(Promotions::ProductId).integer().not_null())
                        .col(ColumnDef::new(Promotions::Description).string().not_null())
                        .col(ColumnDef::new(Promotions::Validity).boolean().not_null())
                        .col(ColumnDef::new(Promotions::StartDate).date().not_null())
                        .col(ColumnDef::new(Promotions::EndDate).date().not_null())
                        .col(
                            ColumnDef::new(Promotions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Promotions::LastUpdated)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Promotions::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Promotions {
        Table,
        Id,
        Name,
        Category,
        DiscountX,
        DiscountY,
        ProductId,
        Description,
        Validity,
        StartDate,
        EndDate,
        CreatedAt,
        LastUpdated,
    }
}
