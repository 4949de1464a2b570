use std::sync::Arc;

use models::user::Role;
use tracing::{debug, info, instrument};

use super::domain::{AuthResponse, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::password::{Argon2PasswordEncoder, PasswordEncoder};
use crate::user::repository::{NewUser, UserRepository};

const MIN_PASSWORD_LEN: usize = 6;

/// Auth business service independent of web framework
pub struct AuthService<R: UserRepository, E: PasswordEncoder = Argon2PasswordEncoder> {
    repo: Arc<R>,
    encoder: E,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo, encoder: Argon2PasswordEncoder::default() }
    }
}

impl<R: UserRepository, E: PasswordEncoder> AuthService<R, E> {
    pub fn with_encoder(repo: Arc<R>, encoder: E) -> Self { Self { repo, encoder } }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::AuthService, domain::RegisterInput};
    /// use service::user::repository::mock::MockUserRepository;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockUserRepository::default()));
    /// let input = RegisterInput {
    ///     name: Some("Test".into()),
    ///     email: Some("User@Example.com".into()),
    ///     password: Some("Secret123".into()),
    ///     role: Some("customer".into()),
    /// };
    /// let resp = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(resp.email, "user@example.com");
    /// assert_eq!(resp.message, "Registration successful.");
    /// ```
    #[instrument(skip(self, input), fields(email = ?input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthResponse, AuthError> {
        let name = required(input.name.as_deref(), "Name")?;
        let email = normalize_email(input.email.as_deref())?;
        let password = required(input.password.as_deref(), "Password")?;
        let role = normalize_role(input.role.as_deref())?;

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidInput("Password must be at least 6 characters.".into()));
        }

        if let Some(existing) = self.repo.find_by_email_ignore_case(&email).await? {
            debug!(user_id = existing.id, "email already registered");
            return Err(AuthError::Conflict);
        }

        let password_hash = self.encoder.encode(&password)?;
        // a concurrent registration can still win the race; the unique key reports it as Conflict
        let user = self
            .repo
            .insert(NewUser { name, email, password_hash, role })
            .await?;
        info!(user_id = user.id, email = %user.email, role = %user.role, "user_registered");
        Ok(AuthResponse::from_user(&user, "Registration successful."))
    }

    /// Authenticate a user by email and password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::AuthService, domain::{RegisterInput, LoginInput}};
    /// use service::user::repository::mock::MockUserRepository;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockUserRepository::default()));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput {
    ///     name: Some("N".into()), email: Some("u@e.com".into()), password: Some("Passw0rd".into()), role: Some("ADMIN".into()),
    /// }));
    /// let resp = tokio_test::block_on(svc.login(LoginInput { email: Some(" U@E.com ".into()), password: Some("Passw0rd".into()) })).unwrap();
    /// assert_eq!(resp.message, "Login successful.");
    /// ```
    #[instrument(skip(self, input), fields(email = ?input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthResponse, AuthError> {
        let email = normalize_email(input.email.as_deref())?;
        let password = required(input.password.as_deref(), "Password")?;

        let user = self
            .repo
            .find_by_email_ignore_case(&email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !self.encoder.matches(&password, &user.password) {
            return Err(AuthError::Unauthorized);
        }

        info!(user_id = user.id, "user_logged_in");
        Ok(AuthResponse::from_user(&user, "Login successful."))
    }
}

/// Trimmed value, or `"<Field> is required."` when missing or blank.
fn required(value: Option<&str>, field_name: &str) -> Result<String, AuthError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AuthError::InvalidInput(format!("{} is required.", field_name))),
    }
}

fn normalize_email(email: Option<&str>) -> Result<String, AuthError> {
    Ok(required(email, "Email")?.to_lowercase())
}

fn normalize_role(role: Option<&str>) -> Result<Role, AuthError> {
    let normalized = required(role, "Role")?.to_uppercase();
    normalized
        .parse::<Role>()
        .map_err(|_| AuthError::InvalidInput("Role must be CUSTOMER or ADMIN.".into()))
}
