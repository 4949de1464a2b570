use axum::{extract::State, Json};
use service::auth::domain::{AuthResponse, LoginInput, RegisterInput};

use crate::errors::ApiError;
use crate::extract::ApiJson;
use crate::openapi::{AuthResponseDoc, ErrorBody, LoginRequest, RegisterRequest};
use crate::state::AppState;

#[utoipa::path(post, path = "/api/auth/register", tag = "auth", request_body = RegisterRequest, responses((status = 200, description = "Registered", body = AuthResponseDoc), (status = 400, description = "Bad Request", body = ErrorBody), (status = 409, description = "Conflict", body = ErrorBody)))]
pub async fn register(State(state): State<AppState>, ApiJson(input): ApiJson<RegisterInput>) -> Result<Json<AuthResponse>, ApiError> {
    Ok(Json(state.auth.register(input).await?))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = LoginRequest, responses((status = 200, description = "Logged In", body = AuthResponseDoc), (status = 401, description = "Unauthorized", body = ErrorBody)))]
pub async fn login(State(state): State<AppState>, ApiJson(input): ApiJson<LoginInput>) -> Result<Json<AuthResponse>, ApiError> {
    Ok(Json(state.auth.login(input).await?))
}
