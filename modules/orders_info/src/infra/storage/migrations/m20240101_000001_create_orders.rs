use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    CustomerName,
    OrderDate,
    OrderType,
    TrackingId,
    OrderTotal,
    Action,
    Status,
    Description,
    CustomerEmail,
    CustomerPhone,
    ShippingStreet,
    ShippingCity,
    ShippingState,
    ShippingZipCode,
    ShippingCountry,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Orders::CustomerName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Orders::OrderDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Orders::OrderType)
                            .string_len(16)
                            .not_null()
                            .default("online"),
                    )
                    .col(ColumnDef::new(Orders::TrackingId).string_len(64).not_null())
                    .col(ColumnDef::new(Orders::OrderTotal).decimal_len(14, 2).not_null())
                    .col(
                        ColumnDef::new(Orders::Action)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Orders::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Orders::Description).string_len(500).null())
                    .col(ColumnDef::new(Orders::CustomerEmail).string().null())
                    .col(ColumnDef::new(Orders::CustomerPhone).string().null())
                    .col(ColumnDef::new(Orders::ShippingStreet).string().null())
                    .col(ColumnDef::new(Orders::ShippingCity).string().null())
                    .col(ColumnDef::new(Orders::ShippingState).string().null())
                    .col(ColumnDef::new(Orders::ShippingZipCode).string().null())
                    .col(ColumnDef::new(Orders::ShippingCountry).string().null())
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Orders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_orders_tracking_id")
                    .table(Orders::Table)
                    .col(Orders::TrackingId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_status")
                    .table(Orders::Table)
                    .col(Orders::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_order_date")
                    .table(Orders::Table)
                    .col(Orders::OrderDate)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}
