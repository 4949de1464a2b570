use axum::{extract::State, Json};
use models::booking;
use service::booking::domain::{BookCarInput, UpdateBookingInput};

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::openapi::{BookCarRequest, BookingDoc, ErrorBody, UpdateBookingRequest};
use crate::state::AppState;

#[utoipa::path(
    post, path = "/api/bookings", tag = "bookings",
    request_body = BookCarRequest,
    responses(
        (status = 200, description = "Booked", body = BookingDoc),
        (status = 404, description = "User or car not found", body = ErrorBody),
        (status = 409, description = "Car is not available", body = ErrorBody)
    )
)]
pub async fn create(State(state): State<AppState>, ApiJson(input): ApiJson<BookCarInput>) -> Result<Json<booking::Model>, ApiError> {
    let booking = state
        .bookings
        .book_car(input.user_id, input.car_id, input.start_date, input.end_date)
        .await?;
    Ok(Json(booking))
}

#[utoipa::path(
    get, path = "/api/bookings/{id}", tag = "bookings",
    params(("id" = i32, Path, description = "Booking id")),
    responses((status = 200, description = "Booking", body = BookingDoc), (status = 404, description = "Not Found", body = ErrorBody))
)]
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<booking::Model>, ApiError> {
    Ok(Json(state.bookings.get_booking(id).await?))
}

#[utoipa::path(
    put, path = "/api/bookings/{id}", tag = "bookings",
    params(("id" = i32, Path, description = "Booking id")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Dates changed, price unchanged", body = BookingDoc),
        (status = 404, description = "Not Found", body = ErrorBody),
        (status = 409, description = "Booking is cancelled", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateBookingInput>,
) -> Result<Json<booking::Model>, ApiError> {
    Ok(Json(state.bookings.update_booking(id, input.start_date, input.end_date).await?))
}

#[utoipa::path(
    post, path = "/api/bookings/{id}/cancel", tag = "bookings",
    params(("id" = i32, Path, description = "Booking id")),
    responses((status = 200, description = "Cancelled", body = BookingDoc), (status = 404, description = "Not Found", body = ErrorBody))
)]
pub async fn cancel(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<booking::Model>, ApiError> {
    Ok(Json(state.bookings.cancel_booking(id).await?))
}

#[utoipa::path(
    get, path = "/api/users/{id}/bookings", tag = "bookings",
    params(("id" = i32, Path, description = "User id")),
    responses((status = 200, description = "Bookings of the user, empty when none", body = [BookingDoc]))
)]
pub async fn list_for_user(State(state): State<AppState>, ApiPath(user_id): ApiPath<i32>) -> Result<Json<Vec<booking::Model>>, ApiError> {
    Ok(Json(state.bookings.get_user_bookings(user_id).await?))
}
