//! Booking Stats Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use temple_app::domain::bookings::stats::{BookingStats, StatusCounts};

use crate::{
    bookings::errors::{LOAD_FAILED, into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatusCountsResponse {
    pub pending: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl From<StatusCounts> for StatusCountsResponse {
    fn from(counts: StatusCounts) -> Self {
        StatusCountsResponse {
            pending: counts.pending,
            confirmed: counts.confirmed,
            completed: counts.completed,
            cancelled: counts.cancelled,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TypeCountResponse {
    pub consultation_type: String,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DailyCountResponse {
    /// UTC calendar day, `YYYY-MM-DD`
    pub date: String,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StatsResponse {
    pub total: usize,
    pub by_status: StatusCountsResponse,

    /// Every consultation type, including those with no bookings
    pub by_type: Vec<TypeCountResponse>,

    /// Bookings created on each of the last seven days, oldest first
    pub daily: Vec<DailyCountResponse>,
}

impl From<BookingStats> for StatsResponse {
    fn from(stats: BookingStats) -> Self {
        StatsResponse {
            total: stats.total,
            by_status: stats.by_status.into(),
            by_type: stats
                .by_type
                .into_iter()
                .map(|entry| TypeCountResponse {
                    consultation_type: entry.consultation_type.as_str().to_string(),
                    label: entry.consultation_type.label().to_string(),
                    count: entry.count,
                })
                .collect(),
            daily: stats
                .daily
                .into_iter()
                .map(|day| DailyCountResponse {
                    date: day.date.to_string(),
                    count: day.count,
                })
                .collect(),
        }
    }
}

/// Booking Stats Handler
///
/// Dashboard aggregates. `at` moves the end of the daily trend; it defaults
/// to now.
#[endpoint(
    tags("admin"),
    summary = "Booking Stats",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Stats computed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed \"at\""),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in as an administrator"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<StatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let stats = state
        .app
        .bookings
        .booking_stats(point_in_time)
        .await
        .map_err(|error| into_status_error(error, LOAD_FAILED))?;

    Ok(Json(stats.into()))
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use temple_app::domain::bookings::{
        MockBookingsService,
        records::BookingUuid,
        status::BookingStatus,
    };

    use crate::test_helpers::{admin_service, make_booking};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        admin_service(bookings, Router::with_path("admin/stats").get(handler))
    }

    #[tokio::test]
    async fn test_stats_for_given_instant() -> TestResult {
        let at: Timestamp = "2024-05-07T12:00:00Z".parse()?;

        let mut confirmed = make_booking(BookingUuid::new());

        confirmed.status = BookingStatus::Confirmed;
        confirmed.created_at = "2024-05-07T01:00:00Z".parse()?;

        let stats = BookingStats::from_bookings(
            &[make_booking(BookingUuid::new()), confirmed],
            date(2024, 5, 7),
        );

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_booking_stats()
            .once()
            .withf(move |requested| *requested == at)
            .return_once(move |_| Ok(stats));

        let mut res = TestClient::get("http://example.com/admin/stats?at=2024-05-07T12:00:00Z")
            .send(&make_service(bookings))
            .await;

        let body: StatsResponse = res.take_json().await?;
        let by_status = &body.by_status;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.total, 2);
        assert_eq!(
            by_status.pending + by_status.confirmed + by_status.completed + by_status.cancelled,
            body.total
        );
        assert_eq!(body.by_type.len(), 6);
        assert_eq!(body.daily.len(), 7);
        assert_eq!(
            body.daily.last().map(|day| (day.date.as_str(), day.count)),
            Some(("2024-05-07", 1))
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_stats_malformed_at_returns_400() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings.expect_booking_stats().never();

        let res = TestClient::get("http://example.com/admin/stats?at=tomorrow")
            .send(&make_service(bookings))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
