//! User store: lookup by id and by email, registration inserts.

pub mod repository;

pub use repository::{NewUser, UserRepository};
