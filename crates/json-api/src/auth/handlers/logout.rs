//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use temple_app::auth::AuthGate;

use crate::{
    auth::{errors::gate_status_error, middleware::extract_bearer_token, models::GateResponse},
    extensions::*,
    state::State,
};

/// Logout Handler
///
/// Revokes the caller's session. Always answers with the signed-out gate.
#[endpoint(
    tags("auth"),
    summary = "Sign Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Signed out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.sign_out", skip_all, err)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<GateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let gate = match extract_bearer_token(req) {
        Some(token) => state
            .app
            .auth
            .sign_out(token)
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

    use crate::test_helpers::{TEST_TOKEN, state_with_auth};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with_auth(auth)))
                .push(Router::with_path("auth/session").delete(handler)),
        )
    }

    #[tokio::test]
    async fn test_sign_out_revokes_and_resets_gate() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_sign_out()
            .once()
            .withf(|token| token == TEST_TOKEN)
            .return_once(|_| Ok(AuthGate::Unauthenticated));

        let mut res = TestClient::delete("http://example.com/auth/session")
            .add_header(AUTHORIZATION, format!("Bearer {TEST_TOKEN}"), true)
            .send(&make_service(auth))
            .await;

        let body: GateResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.state, "unauthenticated");
        assert!(body.admin.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_out_without_token_does_not_touch_sessions() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_sign_out().never();

        let res = TestClient::delete("http://example.com/auth/session")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
