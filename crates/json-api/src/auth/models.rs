//! Auth response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use temple_app::auth::{AdminSession, AuthGate};

/// The signed-in administrator.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdminResponse {
    pub session_uuid: Uuid,
    pub email: String,
    pub name: String,

    /// When the session stops being accepted
    pub expires_at: String,
}

impl From<AdminSession> for AdminResponse {
    fn from(session: AdminSession) -> Self {
        AdminResponse {
            session_uuid: session.session_uuid.into(),
            email: session.email,
            name: session.name,
            expires_at: session.expires_at.to_string(),
        }
    }
}

/// Gate state of the caller.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GateResponse {
    /// One of `loading`, `unauthenticated` or `admin`
    pub state: String,

    /// Present only when `state` is `admin`
    pub admin: Option<AdminResponse>,
}

impl From<AuthGate> for GateResponse {
    fn from(gate: AuthGate) -> Self {
        GateResponse {
            state: gate.as_str().to_string(),
            admin: gate.into_admin().map(Into::into),
        }
    }
}
