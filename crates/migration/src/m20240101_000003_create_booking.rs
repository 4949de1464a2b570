//! Create `booking` table with FKs to `user` and `car`.
//!
//! Deletes are restricted: a car or user with booking history cannot be removed.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_auto(Booking::Id))
                    .col(integer(Booking::UserId).not_null())
                    .col(integer(Booking::CarId).not_null())
                    .col(date(Booking::StartDate).not_null())
                    .col(date(Booking::EndDate).not_null())
                    .col(double(Booking::TotalPrice).not_null())
                    .col(string_len(Booking::Status, 16).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_user")
                            .from(Booking::Table, Booking::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_car")
                            .from(Booking::Table, Booking::CarId)
                            .to(Car::Table, Car::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Booking::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Booking { Table, Id, UserId, CarId, StartDate, EndDate, TotalPrice, Status }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Car { Table, Id }
