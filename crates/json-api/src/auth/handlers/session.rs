//! Current Session Handler

use std::sync::Arc;

use salvo::prelude::*;

use temple_app::auth::AuthGate;

use crate::{
    auth::{errors::gate_status_error, middleware::extract_bearer_token, models::GateResponse},
    extensions::*,
    state::State,
};

/// Current Session Handler
///
/// Resolves the caller's gate. A missing, expired or revoked token is not an
/// error here; it simply resolves to `unauthenticated`.
#[endpoint(
    tags("auth"),
    summary = "Resolve Session",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Gate resolved"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<GateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let gate = match extract_bearer_token(req) {
        Some(token) => state
            .app
            .auth
            .resolve_gate(token)
            .await
            .map_err(gate_status_error)?,
        None => AuthGate::Unauthenticated,
    };

    Ok(Json(gate.into()))
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use temple_app::auth::MockAuthService;

    use crate::test_helpers::{TEST_TOKEN, admin_session, state_with_auth};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with_auth(auth)))
                .push(Router::with_path("auth/session").get(handler)),
        )
    }

    #[tokio::test]
    async fn test_without_token_is_unauthenticated() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_resolve_gate().never();

        let mut res = TestClient::get("http://example.com/auth/session")
            .send(&make_service(auth))
            .await;

        let body: GateResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.state, "unauthenticated");

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_session_is_reported() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_resolve_gate()
            .once()
            .withf(|token| token == TEST_TOKEN)
            .return_once(|_| Ok(AuthGate::Admin(admin_session())));

        let mut res = TestClient::get("http://example.com/auth/session")
            .add_header(AUTHORIZATION, format!("Bearer {TEST_TOKEN}"), true)
            .send(&make_service(auth))
            .await;

        let body: GateResponse = res.take_json().await?;

        assert_eq!(body.state, "admin");
        assert_eq!(body.admin.map(|admin| admin.name), Some(admin_session().name));

        Ok(())
    }
}
