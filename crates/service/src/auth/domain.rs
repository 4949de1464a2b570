use models::user::{self, Role};
use serde::{Deserialize, Serialize};

/// Registration input. Fields are optional on the wire so that a missing
/// field reports the same "is required" message as a blank one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Result of a successful register or login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub message: String,
}

impl AuthResponse {
    pub fn from_user(user: &user::Model, message: &str) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            message: message.to_string(),
        }
    }
}
