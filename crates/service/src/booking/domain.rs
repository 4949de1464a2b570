use chrono::NaiveDate;
use models::booking::BookingStatus;
use serde::{Deserialize, Serialize};

/// Request to book a car for a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCarInput {
    pub user_id: i32,
    pub car_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// New dates for an existing booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Fields of a booking about to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub user_id: i32,
    pub car_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: f64,
    pub status: BookingStatus,
}

/// `price_per_day` times the number of nights between the two dates.
/// A zero or inverted range yields zero or a negative total; callers are
/// expected to pass `end > start`.
pub fn total_price(price_per_day: f64, start: NaiveDate, end: NaiveDate) -> f64 {
    price_per_day * (end - start).num_days() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn three_days_at_fifty() {
        assert_eq!(total_price(50.0, d(2024, 1, 1), d(2024, 1, 4)), 150.0);
    }

    #[test]
    fn spans_month_and_leap_day() {
        assert_eq!(total_price(10.0, d(2024, 2, 28), d(2024, 3, 1)), 20.0);
    }

    #[test]
    fn degenerate_ranges_are_not_rejected() {
        assert_eq!(total_price(50.0, d(2024, 1, 4), d(2024, 1, 4)), 0.0);
        assert_eq!(total_price(50.0, d(2024, 1, 4), d(2024, 1, 1)), -150.0);
    }
}
