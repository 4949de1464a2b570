//! Database-backed store implementations.
pub mod seaorm;

pub use seaorm::{SeaOrmBookingRepository, SeaOrmCarRepository, SeaOrmUserRepository};
