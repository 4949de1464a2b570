//! Booking workflow: availability check, pricing and the BOOKED -> CANCELLED lifecycle.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::BookingService;
