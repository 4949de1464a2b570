use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Car: available-fleet listing
        manager
            .create_index(
                Index::create()
                    .name("idx_car_available")
                    .table(Car::Table)
                    .col(Car::Available)
                    .to_owned(),
            )
            .await?;

        // Booking: per-user listing
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_user_id")
                    .table(Booking::Table)
                    .col(Booking::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_car_id")
                    .table(Booking::Table)
                    .col(Booking::CarId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_booking_car_id").table(Booking::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_booking_user_id").table(Booking::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_car_available").table(Car::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Car { Table, Available }

#[derive(DeriveIden)]
enum Booking { Table, UserId, CarId }
