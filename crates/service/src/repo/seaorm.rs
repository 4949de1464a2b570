use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

use models::{booking, car, user};

use crate::booking::{domain::NewBooking, repository::BookingRepository};
use crate::car::{domain::CarInput, repository::CarRepository};
use crate::errors::ServiceError;
use crate::user::repository::{NewUser, UserRepository};

/// Constraint violations become `Conflict`; `RecordNotUpdated` means the row is gone.
fn map_db_err(e: DbErr, entity: &str) -> ServiceError {
    if matches!(e, DbErr::RecordNotUpdated) {
        return ServiceError::not_found(entity);
    }
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => ServiceError::Conflict(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            ServiceError::Conflict(format!("{} is still referenced by existing bookings.", entity))
        }
        _ => ServiceError::Db(e.to_string()),
    }
}

pub struct SeaOrmCarRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl CarRepository for SeaOrmCarRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<car::Model>, ServiceError> {
        car::Entity::find_by_id(id).one(&self.db).await.map_err(|e| map_db_err(e, "Car"))
    }

    async fn find_available(&self) -> Result<Vec<car::Model>, ServiceError> {
        car::Entity::find()
            .filter(car::Column::Available.eq(true))
            .order_by_asc(car::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(e, "Car"))
    }

    async fn insert(&self, input: CarInput) -> Result<car::Model, ServiceError> {
        let am = car::ActiveModel {
            make: Set(input.make),
            model: Set(input.model),
            price_per_day: Set(input.price_per_day),
            available: Set(input.available),
            ..Default::default()
        };
        am.insert(&self.db).await.map_err(|e| map_db_err(e, "Car"))
    }

    async fn save(&self, car: car::Model) -> Result<car::Model, ServiceError> {
        let am: car::ActiveModel = car.into();
        am.reset_all().update(&self.db).await.map_err(|e| map_db_err(e, "Car"))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = car::Entity::delete_by_id(id).exec(&self.db).await.map_err(|e| map_db_err(e, "Car"))?;
        Ok(res.rows_affected > 0)
    }
}

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>, ServiceError> {
        user::Entity::find_by_id(id).one(&self.db).await.map_err(|e| map_db_err(e, "User"))
    }

    async fn find_by_email_ignore_case(&self, email: &str) -> Result<Option<user::Model>, ServiceError> {
        user::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(user::Column::Email))).eq(email.to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| map_db_err(e, "User"))
    }

    async fn insert(&self, new_user: NewUser) -> Result<user::Model, ServiceError> {
        let am = user::ActiveModel {
            name: Set(new_user.name),
            email: Set(new_user.email),
            password: Set(new_user.password_hash),
            role: Set(new_user.role),
            ..Default::default()
        };
        am.insert(&self.db).await.map_err(|e| map_db_err(e, "User"))
    }
}

pub struct SeaOrmBookingRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<booking::Model>, ServiceError> {
        booking::Entity::find_by_id(id).one(&self.db).await.map_err(|e| map_db_err(e, "Booking"))
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<booking::Model>, ServiceError> {
        booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .order_by_asc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(e, "Booking"))
    }

    async fn insert(&self, new_booking: NewBooking) -> Result<booking::Model, ServiceError> {
        let am = booking::ActiveModel {
            user_id: Set(new_booking.user_id),
            car_id: Set(new_booking.car_id),
            start_date: Set(new_booking.start_date),
            end_date: Set(new_booking.end_date),
            total_price: Set(new_booking.total_price),
            status: Set(new_booking.status),
            ..Default::default()
        };
        am.insert(&self.db).await.map_err(|e| map_db_err(e, "Booking"))
    }

    async fn save(&self, booking: booking::Model) -> Result<booking::Model, ServiceError> {
        let am: booking::ActiveModel = booking.into();
        am.reset_all().update(&self.db).await.map_err(|e| map_db_err(e, "Booking"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingService;
    use crate::test_support::get_db;
    use chrono::NaiveDate;
    use models::{booking::BookingStatus, user::Role};
    use std::sync::Arc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn car_input(make: &str, available: bool) -> CarInput {
        CarInput { make: make.into(), model: "M".into(), price_per_day: 50.0, available }
    }

    fn new_user(email: &str) -> NewUser {
        NewUser { name: "Ann".into(), email: email.into(), password_hash: "h".into(), role: Role::Customer }
    }

    #[tokio::test]
    async fn car_repository_crud() -> anyhow::Result<()> {
        let db = get_db().await?;
        let repo = SeaOrmCarRepository { db };

        let a = repo.insert(car_input("Audi", true)).await?;
        let b = repo.insert(car_input("BMW", false)).await?;
        assert_eq!(repo.find_available().await?, vec![a.clone()]);

        let mut b2 = b.clone();
        b2.available = true;
        b2.price_per_day = 99.0;
        let saved = repo.save(b2.clone()).await?;
        assert_eq!(saved, b2);
        assert_eq!(repo.find_available().await?.len(), 2);

        assert!(repo.delete(a.id).await?);
        assert!(!repo.delete(a.id).await?);
        assert!(repo.find_by_id(a.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn saving_a_deleted_car_is_not_found() -> anyhow::Result<()> {
        let db = get_db().await?;
        let repo = SeaOrmCarRepository { db };
        let car = repo.insert(car_input("Ghost", true)).await?;
        repo.delete(car.id).await?;
        let err = repo.save(car).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn user_lookup_ignores_case_and_unique_key_conflicts() -> anyhow::Result<()> {
        let db = get_db().await?;
        let repo = SeaOrmUserRepository { db };
        let u = repo.insert(new_user("ann@example.com")).await?;

        let found = repo.find_by_email_ignore_case("ANN@Example.COM").await?;
        assert_eq!(found.map(|f| f.id), Some(u.id));
        assert!(repo.find_by_email_ignore_case("bob@example.com").await?.is_none());

        let err = repo.insert(new_user("ann@example.com")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        Ok(())
    }

    #[tokio::test]
    async fn booked_car_cannot_be_deleted() -> anyhow::Result<()> {
        let db = get_db().await?;
        let cars = Arc::new(SeaOrmCarRepository { db: db.clone() });
        let users = Arc::new(SeaOrmUserRepository { db: db.clone() });
        let bookings = Arc::new(SeaOrmBookingRepository { db });
        let car = cars.insert(car_input("Seat", true)).await?;
        let user = users.insert(new_user("fk@example.com")).await?;
        bookings
            .insert(NewBooking {
                user_id: user.id,
                car_id: car.id,
                start_date: d(2024, 1, 1),
                end_date: d(2024, 1, 2),
                total_price: 50.0,
                status: BookingStatus::Booked,
            })
            .await?;

        let err = cars.delete(car.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        Ok(())
    }

    #[tokio::test]
    async fn booking_workflow_against_database() -> anyhow::Result<()> {
        let db = get_db().await?;
        let cars = Arc::new(SeaOrmCarRepository { db: db.clone() });
        let users = Arc::new(SeaOrmUserRepository { db: db.clone() });
        let svc = BookingService::new(Arc::new(SeaOrmBookingRepository { db }), users.clone(), cars.clone());

        let car = cars.insert(car_input("Skoda", true)).await?;
        let user = users.insert(new_user("flow@example.com")).await?;

        let b = svc.book_car(user.id, car.id, d(2024, 1, 1), d(2024, 1, 4)).await?;
        assert_eq!(b.total_price, 150.0);
        assert!(!cars.find_by_id(car.id).await?.unwrap().available);

        let moved = svc.update_booking(b.id, d(2024, 6, 1), d(2024, 6, 30)).await?;
        assert_eq!(moved.total_price, 150.0);

        let cancelled = svc.cancel_booking(b.id).await?;
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert!(cars.find_by_id(car.id).await?.unwrap().available);

        let listed = svc.get_user_bookings(user.id).await?;
        assert_eq!(listed, vec![cancelled]);
        Ok(())
    }
}
