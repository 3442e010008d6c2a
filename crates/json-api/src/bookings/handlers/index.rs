//! Booking Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use temple_app::domain::bookings::query::{BookingFilter, StatusFilter};

use crate::{
    bookings::{
        errors::{LOAD_FAILED, into_status_error},
        models::BookingResponse,
    },
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingsResponse {
    /// Matching bookings, newest first
    pub bookings: Vec<BookingResponse>,
}

/// Booking Index Handler
///
/// Returns every booking, newest first, optionally narrowed by `status`
/// (`all` or a status value) and by `search`, a case-sensitive match against
/// the requester name or phone.
#[endpoint(
    tags("admin"),
    summary = "List Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Bookings listed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status filter"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in as an administrator"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    search: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<BookingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = status
        .into_inner()
        .filter(|value| !value.is_empty())
        .map(|value| value.parse::<StatusFilter>())
        .transpose()
        .or_400("could not parse \"status\" query parameter")?
        .unwrap_or_default();

    let bookings = state
        .app
        .bookings
        .list_bookings(BookingFilter::new(status, search.into_inner()))
        .await
        .map_err(|error| into_status_error(error, LOAD_FAILED))?;

    Ok(Json(BookingsResponse {
        bookings: bookings.into_iter().map(Into::into).collect(),
    }))
}
