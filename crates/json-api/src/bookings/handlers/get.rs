//! Get Booking Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    bookings::{
        errors::{LOAD_FAILED, into_status_error},
        models::BookingResponse,
    },
    extensions::*,
    state::State,
};

/// Get Booking Handler
#[endpoint(
    tags("admin"),
    summary = "Get Booking",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Booking found"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in as an administrator"),
    ),
)]
pub(crate) async fn handler(
    booking: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let booking = state
        .app
        .bookings
        .get_booking(booking.into_inner().into())
        .await
        .map_err(|error| into_status_error(error, LOAD_FAILED))?;

    Ok(Json(booking.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use temple_app::domain::bookings::{
        BookingsServiceError, MockBookingsService, records::BookingUuid,
    };

    use crate::test_helpers::{admin_service, make_booking};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        admin_service(bookings, Router::with_path("admin/bookings/{booking}").get(handler))
    }

    #[tokio::test]
    async fn test_get_booking_success() -> TestResult {
        let uuid = BookingUuid::new();

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_get_booking()
            .once()
            .withf(move |booking| *booking == uuid)
            .return_once(move |_| Ok(make_booking(uuid)));

        let mut res = TestClient::get(format!("http://example.com/admin/bookings/{uuid}"))
            .send(&make_service(bookings))
            .await;

        let body: BookingResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.name, "王小明");
        assert_eq!(body.birth_date, "民國75年8月15日");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_booking_returns_404() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_get_booking()
            .once()
            .return_once(|_| Err(BookingsServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/admin/bookings/{}",
            BookingUuid::new()
        ))
        .send(&make_service(bookings))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_invalid_uuid_returns_400() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings.expect_get_booking().never();

        let res = TestClient::get("http://example.com/admin/bookings/123")
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
