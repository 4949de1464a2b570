//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration and login business logic; persistence goes through
//! [`crate::user::UserRepository`] and hashing through [`password::PasswordEncoder`].

pub mod domain;
pub mod errors;
pub mod password;
pub mod service;

pub use service::AuthService;
