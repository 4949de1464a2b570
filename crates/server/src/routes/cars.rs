use axum::{extract::State, Json};
use models::car;
use service::car::domain::CarInput;

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::openapi::{CarDoc, CarInputDoc, ErrorBody};
use crate::state::AppState;

#[utoipa::path(get, path = "/api/cars", tag = "cars", responses((status = 200, description = "Available cars", body = [CarDoc])))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<car::Model>>, ApiError> {
    Ok(Json(state.cars.get_available_cars().await?))
}

#[utoipa::path(post, path = "/api/cars", tag = "cars", request_body = CarInputDoc, responses((status = 200, description = "Created", body = CarDoc), (status = 400, description = "Bad Request", body = ErrorBody)))]
pub async fn create(State(state): State<AppState>, ApiJson(input): ApiJson<CarInput>) -> Result<Json<car::Model>, ApiError> {
    Ok(Json(state.cars.add_car(input).await?))
}

#[utoipa::path(get, path = "/api/cars/{id}", tag = "cars", params(("id" = i32, Path, description = "Car id")), responses((status = 200, description = "Car", body = CarDoc), (status = 404, description = "Not Found", body = ErrorBody)))]
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<car::Model>, ApiError> {
    Ok(Json(state.cars.get_car(id).await?))
}

#[utoipa::path(put, path = "/api/cars/{id}", tag = "cars", params(("id" = i32, Path, description = "Car id")), request_body = CarInputDoc, responses((status = 200, description = "Updated", body = CarDoc), (status = 404, description = "Not Found", body = ErrorBody)))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<CarInput>,
) -> Result<Json<car::Model>, ApiError> {
    Ok(Json(state.cars.update_car(id, input).await?))
}

#[utoipa::path(delete, path = "/api/cars/{id}", tag = "cars", params(("id" = i32, Path, description = "Car id")), responses((status = 200, description = "Deleted car as it was", body = CarDoc), (status = 404, description = "Not Found", body = ErrorBody), (status = 409, description = "Car has bookings", body = ErrorBody)))]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<car::Model>, ApiError> {
    Ok(Json(state.cars.delete_car(id).await?))
}
