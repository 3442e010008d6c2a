//! Update Booking Status Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use temple_app::domain::bookings::{data::BookingStatusUpdate, status::BookingStatus};

use crate::{
    bookings::{
        errors::{SAVE_FAILED, into_status_error},
        models::BookingResponse,
    },
    extensions::*,
    state::State,
};

/// Update Booking Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusRequest {
    /// Target status; the current one may be sent again to edit the note only
    pub status: String,

    /// Internal note. Blank or absent clears it.
    #[serde(default)]
    pub admin_notes: Option<String>,

    /// `updated_at` of the booking as last loaded. When given, the update is
    /// refused if the booking has changed since.
    #[serde(default)]
    pub expected_updated_at: Option<String>,
}

/// Update Booking Status Handler
#[endpoint(
    tags("admin"),
    summary = "Update Booking Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in as an administrator"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed or booking changed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "bookings.update_status",
    skip(booking, json, depot),
    fields(
        booking_uuid = tracing::field::Empty,
        status = tracing::field::Empty,
        handled_by = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    booking: PathParam<Uuid>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_session_or_401()?;
    let request = json.into_inner();
    let booking = booking.into_inner();

    let status = request
        .status
        .trim()
        .parse::<BookingStatus>()
        .or_400("could not parse \"status\"")?;

    let expected_updated_at = request
        .expected_updated_at
        .map(|value| value.parse::<Timestamp>())
        .transpose()
        .or_400("could not parse \"expected_updated_at\"")?;

    let span = tracing::Span::current();

    span.record("booking_uuid", tracing::field::display(booking));
    span.record("status", status.as_str());
    span.record("handled_by", admin.email.as_str());

    let update = BookingStatusUpdate::new(status, request.admin_notes, admin.email.clone())
        .expecting(expected_updated_at);

    let updated = state
        .app
        .bookings
        .update_status(booking.into(), update)
        .await
        .map_err(|error| into_status_error(error, SAVE_FAILED))?;

    Ok(Json(updated.into()))
}
