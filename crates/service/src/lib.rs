//! Service layer providing the rental workflows on top of `models`.
//! - Stores are traits (`*Repository`) with SeaORM and in-memory implementations.
//! - Services take their stores as constructor parameters.
//! - Each layer reports failures through its own error type.

pub mod errors;
pub mod auth;
pub mod car;
pub mod user;
pub mod booking;
pub mod repo;
#[cfg(test)]
pub mod test_support;
