//! Create Booking Handler

use std::{str::FromStr, sync::Arc};

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use temple_app::domain::bookings::data::{BookingSubmission, NewBooking};

use crate::{bookings::errors::SUBMIT_FAILED, extensions::*, state::State};

/// Create Booking Request
///
/// Every field is read as text so that an absent field and a blank one are
/// reported the same way. Properties outside this shape, such as `status`,
/// are ignored.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CreateBookingRequest {
    pub name: String,
    pub phone: String,

    /// Free text; any calendar system is accepted
    pub birth_date: String,

    /// One of the values listed by `GET /bookings/options`
    pub consultation_type: String,

    /// `YYYY-MM-DD`
    pub booking_date: String,

    /// One of the values listed by `GET /bookings/options`
    pub booking_time: String,

    pub notes: Option<String>,
}

impl CreateBookingRequest {
    fn into_submission(self) -> Result<BookingSubmission, StatusError> {
        Ok(BookingSubmission {
            consultation_type: choice(&self.consultation_type)?,
            booking_time: choice(&self.booking_time)?,
            name: self.name,
            phone: self.phone,
            birth_date: self.birth_date,
            booking_date: self.booking_date,
            notes: self.notes,
        })
    }
}

/// A blank choice is left for required-field validation to report.
fn choice<T>(value: &str) -> Result<Option<T>, StatusError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = value.trim();

    if value.is_empty() {
        return Ok(None);
    }

    value.parse::<T>().map(Some).or_400("invalid booking payload")
}

/// Booking Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingCreatedResponse {
    /// Created booking UUID
    pub uuid: Uuid,
}

/// Create Booking Handler
///
/// Public intake endpoint. Stores the submission as a new `pending` booking.
/// Any failure to store it gets the same retry-later answer.
#[endpoint(
    tags("bookings"),
    summary = "Submit Booking",
    responses(
        (status_code = StatusCode::CREATED, description = "Booking submitted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid fields"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Submission failed"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBookingRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BookingCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let booking = NewBooking::try_from(json.into_inner().into_submission()?)
        .or_400("invalid booking payload")?;

    let uuid = state
        .app
        .bookings
        .create_booking(booking)
        .await
        .map_err(|source| {
            error!("failed to store booking: {source}");

            StatusError::internal_server_error().brief(SUBMIT_FAILED)
        })?
        .uuid;

    res.add_header(LOCATION, format!("/admin/bookings/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(booking_uuid = %uuid, "booking submitted");

    Ok(Json(BookingCreatedResponse { uuid: uuid.into() }))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use temple_app::domain::bookings::{
        BookingsServiceError, MockBookingsService, consultation_type::ConsultationType,
        records::BookingUuid, time_slot::TimeSlot,
    };

    use crate::test_helpers::{bookings_service, make_booking};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(bookings, Router::with_path("bookings").post(handler))
    }

    fn wang_xiaoming() -> Value {
        json!({
            "name": "王小明",
            "phone": "0912345678",
            "birth_date": "民國75年8月15日",
            "consultation_type": "career",
            "booking_date": "2024-05-01",
            "booking_time": "morning",
        })
    }

    #[tokio::test]
    async fn test_create_booking_success() -> TestResult {
        let uuid = BookingUuid::new();

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_create_booking()
            .once()
            .withf(|new| {
                new.name == "王小明"
                    && new.phone == "0912345678"
                    && new.birth_date == "民國75年8月15日"
                    && new.consultation_type == ConsultationType::Career
                    && new.booking_date == date(2024, 5, 1)
                    && new.booking_time == TimeSlot::Morning
                    && new.notes.is_none()
            })
            .return_once(move |_| Ok(make_booking(uuid)));

        let mut res = TestClient::post("http://example.com/bookings")
            .json(&wang_xiaoming())
            .send(&make_service(bookings))
            .await;

        let body: BookingCreatedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/admin/bookings/{uuid}").as_str()));
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_status_in_payload_is_ignored() -> TestResult {
        let uuid = BookingUuid::new();

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_create_booking()
            .once()
            .return_once(move |_| Ok(make_booking(uuid)));

        let mut payload = wang_xiaoming();

        if let Some(fields) = payload.as_object_mut() {
            fields.insert("status".to_string(), json!("completed"));
        }

        let res = TestClient::post("http://example.com/bookings")
            .json(&payload)
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_fields_never_reach_the_store() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings.expect_create_booking().never();

        let mut res = TestClient::post("http://example.com/bookings")
            .json(&json!({
                "name": "  ",
                "phone": "0912345678",
                "birth_date": "民國75年8月15日",
                "booking_date": "2024-05-01",
            }))
            .send(&make_service(bookings))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(body.contains("name, consultation_type, booking_time"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_consultation_type_returns_400() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings.expect_create_booking().never();

        let mut payload = wang_xiaoming();

        if let Some(fields) = payload.as_object_mut() {
            fields.insert("consultation_type".to_string(), json!("astrology"));
        }

        let res = TestClient::post("http://example.com/bookings")
            .json(&payload)
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unparseable_booking_date_returns_400() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings.expect_create_booking().never();

        let mut payload = wang_xiaoming();

        if let Some(fields) = payload.as_object_mut() {
            fields.insert("booking_date".to_string(), json!("next Tuesday"));
        }

        let res = TestClient::post("http://example.com/bookings")
            .json(&payload)
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_failure_returns_retry_message() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_create_booking()
            .once()
            .return_once(|_| Err(BookingsServiceError::AlreadyExists));

        let mut res = TestClient::post("http://example.com/bookings")
            .json(&wang_xiaoming())
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(res.take_string().await?.contains(SUBMIT_FAILED));

        Ok(())
    }
}
