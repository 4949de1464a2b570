use std::sync::Arc;

use models::car;
use tracing::{info, instrument};

use super::domain::CarInput;
use super::repository::CarRepository;
use crate::errors::ServiceError;

/// Application service for the fleet. No validation beyond what the store enforces.
pub struct CarService<R: CarRepository> {
    repo: Arc<R>,
}

impl<R: CarRepository> CarService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn get_available_cars(&self) -> Result<Vec<car::Model>, ServiceError> {
        self.repo.find_available().await
    }

    pub async fn get_car(&self, id: i32) -> Result<car::Model, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("Car"))
    }

    #[instrument(skip(self, input), fields(make = %input.make, model = %input.model))]
    pub async fn add_car(&self, input: CarInput) -> Result<car::Model, ServiceError> {
        let created = self.repo.insert(input).await?;
        info!(car_id = created.id, "car_added");
        Ok(created)
    }

    /// Overwrite make, model, availability and price of an existing car.
    #[instrument(skip(self, updated))]
    pub async fn update_car(&self, id: i32, updated: CarInput) -> Result<car::Model, ServiceError> {
        let mut car = self.get_car(id).await?;
        car.make = updated.make;
        car.model = updated.model;
        car.available = updated.available;
        car.price_per_day = updated.price_per_day;
        let saved = self.repo.save(car).await?;
        info!(car_id = saved.id, "car_updated");
        Ok(saved)
    }

    /// Delete a car and hand back the record as it was before removal.
    #[instrument(skip(self))]
    pub async fn delete_car(&self, id: i32) -> Result<car::Model, ServiceError> {
        let car = self.get_car(id).await?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("Car"));
        }
        info!(car_id = id, "car_deleted");
        Ok(car)
    }
}
