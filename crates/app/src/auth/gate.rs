//! Authentication gate state.

use jiff::Timestamp;

use crate::{
    auth::models::{AccountUuid, SessionRecord, SessionUuid},
    domain::admins::records::AdminRecord,
};

/// The acting administrator behind an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub session_uuid: SessionUuid,
    pub account_uuid: AccountUuid,
    pub email: String,
    pub name: String,
    pub expires_at: Timestamp,
}

/// Resolved authentication and authorization state of a caller.
///
/// A gate starts out `Loading` while the session and allow-list lookups are in
/// flight, settles on `Unauthenticated` or `Admin`, and drops back to
/// `Unauthenticated` on sign-out. A signed-in account that is not on the admin
/// allow-list is indistinguishable from an anonymous caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthGate {
    #[default]
    Loading,
    Unauthenticated,
    Admin(AdminSession),
}

impl AuthGate {
    /// Settle the gate from the session lookup and the allow-list lookup.
    #[must_use]
    pub fn resolve(session: Option<SessionRecord>, admin: Option<AdminRecord>) -> Self {
        match (session, admin) {
            (Some(session), Some(admin)) if admin.email == session.email => {
                Self::Admin(AdminSession {
                    session_uuid: session.uuid,
                    account_uuid: session.account_uuid,
                    email: session.email,
                    name: admin.name,
                    expires_at: session.expires_at,
                })
            }
            _ => Self::Unauthenticated,
        }
    }

    /// Drop whatever access the gate held.
    #[must_use]
    pub fn sign_out(self) -> Self {
        Self::Unauthenticated
    }

    /// Only a settled `Admin` gate grants access; `Loading` does not.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin(_))
    }

    #[must_use]
    pub fn into_admin(self) -> Option<AdminSession> {
        match self {
            Self::Admin(session) => Some(session),
            Self::Loading | Self::Unauthenticated => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Unauthenticated => "unauthenticated",
            Self::Admin(_) => "admin",
        }
    }
}
