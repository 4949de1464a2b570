use async_trait::async_trait;
use models::booking;

use super::domain::NewBooking;
use crate::errors::ServiceError;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<booking::Model>, ServiceError>;
    /// All bookings of a user, ascending id.
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<booking::Model>, ServiceError>;
    async fn insert(&self, new_booking: NewBooking) -> Result<booking::Model, ServiceError>;
    /// Overwrite every column of an existing row.
    async fn save(&self, booking: booking::Model) -> Result<booking::Model, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicI32, Ordering};
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockBookingRepository {
        bookings: Mutex<BTreeMap<i32, booking::Model>>,
        // ids are never reused, like an autoincrement column
        last_id: AtomicI32,
    }

    #[async_trait]
    impl BookingRepository for MockBookingRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<booking::Model>, ServiceError> {
            Ok(self.bookings.lock().await.get(&id).cloned())
        }

        async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<booking::Model>, ServiceError> {
            let bookings = self.bookings.lock().await;
            Ok(bookings.values().filter(|b| b.user_id == user_id).cloned().collect())
        }

        async fn insert(&self, new_booking: NewBooking) -> Result<booking::Model, ServiceError> {
            let mut bookings = self.bookings.lock().await;
            let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
            let booking = booking::Model {
                id,
                user_id: new_booking.user_id,
                car_id: new_booking.car_id,
                start_date: new_booking.start_date,
                end_date: new_booking.end_date,
                total_price: new_booking.total_price,
                status: new_booking.status,
            };
            bookings.insert(id, booking.clone());
            Ok(booking)
        }

        async fn save(&self, booking: booking::Model) -> Result<booking::Model, ServiceError> {
            let mut bookings = self.bookings.lock().await;
            match bookings.get_mut(&booking.id) {
                Some(slot) => {
                    *slot = booking.clone();
                    Ok(booking)
                }
                None => Err(ServiceError::not_found("Booking")),
            }
        }
    }
}
