//! App Router

use salvo::Router;

use crate::{auth, bookings};

/// Public intake and sign-in routes, plus the admin back-office behind the
/// auth middleware.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("bookings")
                .post(bookings::create::handler)
                .push(Router::with_path("options").get(bookings::options::handler)),
        )
        .push(
            Router::with_path("auth")
                .push(Router::with_path("sessions").post(auth::login::handler))
                .push(
                    Router::with_path("session")
                        .get(auth::session::handler)
                        .delete(auth::logout::handler),
                ),
        )
        .push(
            Router::with_path("admin")
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("bookings")
                        .get(bookings::index::handler)
                        .push(
                            Router::with_path("{booking}")
                                .get(bookings::get::handler)
                                .push(
                                    Router::with_path("status")
                                        .put(bookings::update_status::handler),
                                ),
                        ),
                )
                .push(Router::with_path("stats").get(bookings::stats::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::{StatusCode, header::AUTHORIZATION},
        prelude::Service,
        test::TestClient,
    };
    use testresult::TestResult;

    use temple_app::auth::{AuthGate, MockAuthService};

    use crate::test_helpers::{TEST_TOKEN, state_with_auth};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        Service::new(Router::new().hoop(inject(state_with_auth(auth))).push(app_router()))
    }

    #[tokio::test]
    async fn test_signed_in_non_admin_cannot_list_bookings() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_resolve_gate()
            .once()
            .withf(|token| token == TEST_TOKEN)
            .return_once(|_| Ok(AuthGate::Unauthenticated));

        let res = TestClient::get("http://example.com/admin/bookings")
            .add_header(AUTHORIZATION, format!("Bearer {TEST_TOKEN}"), true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_routes_require_a_token() -> TestResult {
        for (method, path) in [
            ("GET", "/admin/bookings"),
            ("GET", "/admin/stats"),
            ("PUT", "/admin/bookings/0190d7f4-5a3b-7c2e-9d1f-2b3c4d5e6f70/status"),
        ] {
            let mut auth = MockAuthService::new();

            auth.expect_resolve_gate().never();

            let url = format!("http://example.com{path}");
            let request = match method {
                "PUT" => TestClient::put(url),
                _ => TestClient::get(url),
            };

            let res = request.send(&make_service(auth)).await;

            assert_eq!(
                res.status_code,
                Some(StatusCode::UNAUTHORIZED),
                "{method} {path}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_options_are_public() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_resolve_gate().never();

        let res = TestClient::get("http://example.com/bookings/options")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
