//! Login Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use temple_app::auth::LoginCredentials;

use crate::{
    auth::{errors::login_status_error, models::GateResponse},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

impl From<LoginRequest> for LoginCredentials {
    fn from(request: LoginRequest) -> Self {
        LoginCredentials::new(request.email, request.password)
    }
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Bearer token for subsequent requests. Only ever returned here.
    pub token: String,

    pub expires_at: String,

    /// Whether the new session carries admin access
    pub gate: GateResponse,
}

/// Login Handler
///
/// Opens a session for a valid email and password. Accounts that are not on
/// the admin allow-list still receive a session, but their gate is
/// `unauthenticated` and admin routes reject them.
#[endpoint(
    tags("auth"),
    summary = "Sign In",
    responses(
        (status_code = StatusCode::CREATED, description = "Session opened"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Wrong email or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let issued = state
        .app
        .auth
        .login(json.into_inner().into())
        .await
        .map_err(login_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at.to_string(),
        gate: issued.gate.into(),
    }))
}
