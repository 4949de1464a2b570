//! Fleet management: the car store and the service that lists and edits it.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::CarService;
