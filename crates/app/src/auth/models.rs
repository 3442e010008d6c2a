//! Auth data models.

use std::fmt;

use jiff::Timestamp;
use zeroize::Zeroize;

use crate::{
    auth::{gate::AuthGate, token::SessionTokenVersion},
    uuids::TypedUuid,
};

/// Account UUID
pub type AccountUuid = TypedUuid<AccountRecord>;

/// Session UUID
pub type SessionUuid = TypedUuid<SessionRecord>;

/// Login account persisted in storage.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub uuid: AccountUuid,
    pub email: String,

    /// OpenBao HMAC verifier over the account id and password.
    pub(crate) password_hash: String,

    pub created_at: Timestamp,
}

/// New account persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewAccount {
    pub uuid: AccountUuid,
    pub email: String,
    pub password_hash: String,
}

/// An unrevoked, unexpired session joined with its account email.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub uuid: SessionUuid,
    pub account_uuid: AccountUuid,
    pub email: String,
    pub version: SessionTokenVersion,

    /// OpenBao HMAC verifier for the token secret material.
    pub(crate) token_hash: String,

    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Timestamp,
}

/// New session persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewSession {
    pub uuid: SessionUuid,
    pub account_uuid: AccountUuid,
    pub version: SessionTokenVersion,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// Email and password submitted to the login form.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

impl Drop for LoginCredentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Result of a successful login: the one-time raw token and the caller's gate.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub session_uuid: SessionUuid,
    pub expires_at: Timestamp,
    pub gate: AuthGate,
}
