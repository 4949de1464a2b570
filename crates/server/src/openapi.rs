use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBody {
    #[schema(example = "not_found")]
    pub error: String,
    #[schema(example = "Car not found")]
    pub message: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CarDoc {
    pub id: i32,
    pub make: String,
    pub model: String,
    pub price_per_day: f64,
    pub available: bool,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CarInputDoc {
    pub make: String,
    pub model: String,
    pub price_per_day: f64,
    /// Defaults to true.
    pub available: Option<bool>,
}

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[schema(example = "CUSTOMER")]
    pub role: String,
}

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct AuthResponseDoc {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[schema(example = "CUSTOMER")]
    pub role: String,
    #[schema(example = "Login successful.")]
    pub message: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct BookCarRequest {
    pub user_id: i32,
    pub car_id: i32,
    #[schema(example = "2024-01-01")]
    pub start_date: String,
    #[schema(example = "2024-01-04")]
    pub end_date: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    #[schema(example = "2024-02-01")]
    pub start_date: String,
    #[schema(example = "2024-02-05")]
    pub end_date: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct BookingDoc {
    pub id: i32,
    pub user_id: i32,
    pub car_id: i32,
    pub start_date: String,
    pub end_date: String,
    pub total_price: f64,
    #[schema(example = "BOOKED")]
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::cars::list,
        crate::routes::cars::create,
        crate::routes::cars::get,
        crate::routes::cars::update,
        crate::routes::cars::delete,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::bookings::create,
        crate::routes::bookings::get,
        crate::routes::bookings::update,
        crate::routes::bookings::cancel,
        crate::routes::bookings::list_for_user,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            CarDoc,
            CarInputDoc,
            RegisterRequest,
            LoginRequest,
            AuthResponseDoc,
            BookCarRequest,
            UpdateBookingRequest,
            BookingDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "cars"),
        (name = "auth"),
        (name = "bookings")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/health",
            "/api/cars",
            "/api/cars/{id}",
            "/api/auth/register",
            "/api/auth/login",
            "/api/bookings",
            "/api/bookings/{id}",
            "/api/bookings/{id}/cancel",
            "/api/users/{id}/bookings",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
