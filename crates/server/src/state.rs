use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auth::AuthService;
use service::booking::BookingService;
use service::car::CarService;
use service::repo::{SeaOrmBookingRepository, SeaOrmCarRepository, SeaOrmUserRepository};

pub type Cars = CarService<SeaOrmCarRepository>;
pub type Auth = AuthService<SeaOrmUserRepository>;
pub type Bookings = BookingService<SeaOrmBookingRepository, SeaOrmUserRepository, SeaOrmCarRepository>;

/// Services shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub cars: Arc<Cars>,
    pub auth: Arc<Auth>,
    pub bookings: Arc<Bookings>,
}

impl AppState {
    /// Wire every service to stores sharing one connection pool.
    pub fn from_db(db: DatabaseConnection) -> Self {
        let car_repo = Arc::new(SeaOrmCarRepository { db: db.clone() });
        let user_repo = Arc::new(SeaOrmUserRepository { db: db.clone() });
        let booking_repo = Arc::new(SeaOrmBookingRepository { db });
        Self {
            cars: Arc::new(CarService::new(car_repo.clone())),
            auth: Arc::new(AuthService::new(user_repo.clone())),
            bookings: Arc::new(BookingService::new(booking_repo, user_repo, car_repo)),
        }
    }
}
