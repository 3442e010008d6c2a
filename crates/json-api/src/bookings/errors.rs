//! Booking Errors

use salvo::http::StatusError;
use tracing::error;

use temple_app::domain::bookings::BookingsServiceError;

/// Shown when an intake submission could not be stored.
pub(crate) const SUBMIT_FAILED: &str = "預約提交失敗，請檢查網路或稍後再試。";

/// Shown when back-office data could not be read.
pub(crate) const LOAD_FAILED: &str = "載入失敗";

/// Shown when a back-office change could not be written.
pub(crate) const SAVE_FAILED: &str = "儲存失敗";

/// Map a service error to a response. Unexpected failures are logged and
/// answered with `failure`, never with the underlying cause.
pub(crate) fn into_status_error(error: BookingsServiceError, failure: &str) -> StatusError {
    match error {
        BookingsServiceError::NotFound => StatusError::not_found().brief("Booking not found"),
        BookingsServiceError::IllegalTransition(transition) => {
            StatusError::conflict().brief(transition.to_string())
        }
        BookingsServiceError::StaleVersion => StatusError::conflict()
            .brief("Booking was changed by someone else, reload it and try again"),
        BookingsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Booking already exists")
        }
        BookingsServiceError::InvalidReference
        | BookingsServiceError::MissingRequiredData
        | BookingsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid booking payload")
        }
        BookingsServiceError::Sql(source) => {
            error!("booking storage failure: {source}");

            StatusError::internal_server_error().brief(failure)
        }
    }
}
