use async_trait::async_trait;
use models::car;

use super::domain::CarInput;
use crate::errors::ServiceError;

#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<car::Model>, ServiceError>;
    /// Cars with `available = true`, ascending id.
    async fn find_available(&self) -> Result<Vec<car::Model>, ServiceError>;
    async fn insert(&self, input: CarInput) -> Result<car::Model, ServiceError>;
    /// Overwrite every column of an existing row.
    async fn save(&self, car: car::Model) -> Result<car::Model, ServiceError>;
    /// Returns false when no row had that id.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicI32, Ordering};
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockCarRepository {
        cars: Mutex<BTreeMap<i32, car::Model>>,
        // ids are never reused, like an autoincrement column
        last_id: AtomicI32,
    }

    #[async_trait]
    impl CarRepository for MockCarRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<car::Model>, ServiceError> {
            Ok(self.cars.lock().await.get(&id).cloned())
        }

        async fn find_available(&self) -> Result<Vec<car::Model>, ServiceError> {
            let cars = self.cars.lock().await;
            Ok(cars.values().filter(|c| c.available).cloned().collect())
        }

        async fn insert(&self, input: CarInput) -> Result<car::Model, ServiceError> {
            let mut cars = self.cars.lock().await;
            let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
            let car = car::Model {
                id,
                make: input.make,
                model: input.model,
                price_per_day: input.price_per_day,
                available: input.available,
            };
            cars.insert(id, car.clone());
            Ok(car)
        }

        async fn save(&self, car: car::Model) -> Result<car::Model, ServiceError> {
            let mut cars = self.cars.lock().await;
            match cars.get_mut(&car.id) {
                Some(slot) => {
                    *slot = car.clone();
                    Ok(car)
                }
                None => Err(ServiceError::not_found("Car")),
            }
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.cars.lock().await.remove(&id).is_some())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockCarRepository;
    use super::*;

    fn input(make: &str) -> CarInput {
        CarInput { make: make.into(), model: "Base".into(), price_per_day: 10.0, available: true }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = MockCarRepository::default();
        let first = repo.insert(input("Audi")).await.unwrap();
        let second = repo.insert(input("BMW")).await.unwrap();
        assert!(repo.delete(second.id).await.unwrap());

        let third = repo.insert(input("Citroen")).await.unwrap();
        assert!(third.id > second.id);
        assert_ne!(third.id, first.id);
        assert!(repo.find_by_id(second.id).await.unwrap().is_none());
    }
}
