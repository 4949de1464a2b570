//! SeaORM entities for the rental fleet, its users and their bookings.

pub mod errors;
pub mod db;
pub mod car;
pub mod user;
pub mod booking;
