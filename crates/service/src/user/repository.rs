use async_trait::async_trait;
use models::user::{self, Role};

use crate::errors::ServiceError;

/// Fields of a user about to be stored; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Repository abstraction for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>, ServiceError>;
    /// Case-insensitive email lookup.
    async fn find_by_email_ignore_case(&self, email: &str) -> Result<Option<user::Model>, ServiceError>;
    /// Fails with `ServiceError::Conflict` when the email is already taken.
    async fn insert(&self, new_user: NewUser) -> Result<user::Model, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicI32, Ordering};
    use tokio::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<BTreeMap<i32, user::Model>>, // key: id
        // ids are never reused, like an autoincrement column
        last_id: AtomicI32,
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>, ServiceError> {
            Ok(self.users.lock().await.get(&id).cloned())
        }

        async fn find_by_email_ignore_case(&self, email: &str) -> Result<Option<user::Model>, ServiceError> {
            let users = self.users.lock().await;
            Ok(users.values().find(|u| u.email.eq_ignore_ascii_case(email)).cloned())
        }

        async fn insert(&self, new_user: NewUser) -> Result<user::Model, ServiceError> {
            let mut users = self.users.lock().await;
            if users.values().any(|u| u.email.eq_ignore_ascii_case(&new_user.email)) {
                return Err(ServiceError::Conflict("duplicate key: user.email".into()));
            }
            let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
            let user = user::Model {
                id,
                name: new_user.name,
                email: new_user.email,
                password: new_user.password_hash,
                role: new_user.role,
            };
            users.insert(id, user.clone());
            Ok(user)
        }
    }
}
