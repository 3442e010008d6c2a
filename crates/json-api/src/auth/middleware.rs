//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use temple_app::auth::AuthGate;

use crate::{extensions::*, state::State};

/// Let a request through only when its bearer token resolves to an
/// administrator. Anything short of that, including a valid session for an
/// account missing from the allow-list, is answered with 401.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let session = match state.app.auth.resolve_gate(token).await {
        Ok(AuthGate::Admin(session)) => session,
        Ok(AuthGate::Loading | AuthGate::Unauthenticated) => {
            res.render(StatusError::unauthorized().brief("Not signed in as an administrator"));

            return;
        }
        Err(source) => {
            error!("failed to resolve auth gate: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_admin_session(session);

    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
