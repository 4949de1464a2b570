//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_car;
mod m20240101_000002_create_user;
mod m20240101_000003_create_booking;
mod m20240101_000004_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_car::Migration),
            Box::new(m20240101_000002_create_user::Migration),
            // booking references both car and user
            Box::new(m20240101_000003_create_booking::Migration),
            Box::new(m20240101_000004_add_indexes::Migration),
        ]
    }
}
