//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use temple_app::auth::AuthServiceError;

/// Shown for a wrong email or password, and nothing else.
pub(crate) const INVALID_CREDENTIALS: &str = "帳號或密碼錯誤";

/// Shown for every other sign-in failure.
pub(crate) const LOGIN_FAILED: &str = "登入失敗，請稍後再試";

pub(crate) fn login_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief(INVALID_CREDENTIALS)
        }
        other => {
            error!("failed to sign in: {other}");

            StatusError::internal_server_error().brief(LOGIN_FAILED)
        }
    }
}

pub(crate) fn gate_status_error(error: AuthServiceError) -> StatusError {
    error!("failed to resolve auth gate: {error}");

    StatusError::internal_server_error()
}
