use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Zone::Table)
                    .if_not_exists()
                    .col(
                        uuid(Zone::Id)
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(string_len(Zone::Name, 100).not_null())
                    .col(double(Zone::CenterLat).not_null())
                    .col(double(Zone::CenterLng).not_null())
                    .col(double(Zone::RadiusKm).not_null())
                    .col(big_integer(Zone::DeliveryCharge).not_null().default(0))
                    .col(big_integer(Zone::MinOrderAmount).not_null().default(0))
                    .col(boolean(Zone::IsActive).not_null().default(true))
                    .col(
                        json_binary(Zone::DeliverySlots)
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        timestamp_with_time_zone(Zone::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Zone::RadiusKm).gt(0.0))
                    .check(Expr::col(Zone::DeliveryCharge).gte(0))
                    .check(Expr::col(Zone::MinOrderAmount).gte(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_zone_active_radius")
                    .table(Zone::Table)
                    .col(Zone::IsActive)
                    .col(Zone::RadiusKm)
                    .to_owned(),
            )
            .await?;

        // Seed the Chennai reference zones, all sharing the city center
        let insert = Query::insert()
            .into_table(Zone::Table)
            .columns([
                Zone::Name,
                Zone::CenterLat,
                Zone::CenterLng,
                Zone::RadiusKm,
                Zone::DeliveryCharge,
                Zone::MinOrderAmount,
            ])
            .values_panic(["Chennai Central".into(), 13.0827.into(), 80.2707.into(), 5.0.into(), 0i64.into(), 30000i64.into()])
            .values_panic(["Chennai Inner Ring".into(), 13.0827.into(), 80.2707.into(), 10.0.into(), 3000i64.into(), 40000i64.into()])
            .values_panic(["Chennai Outer Ring".into(), 13.0827.into(), 80.2707.into(), 15.0.into(), 5000i64.into(), 50000i64.into()])
            .values_panic(["Chennai Suburbs".into(), 13.0827.into(), 80.2707.into(), 25.0.into(), 8000i64.into(), 70000i64.into()])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Zone::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Zone {
    Table,
    Id,
    Name,
    CenterLat,
    CenterLng,
    RadiusKm,
    DeliveryCharge,
    MinOrderAmount,
    IsActive,
    DeliverySlots,
    CreatedAt,
}
