//! Auth service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::{
    auth::{
        AuthServiceError, SessionToken,
        gate::AuthGate,
        models::{
            AccountRecord, AccountUuid, IssuedSession, LoginCredentials, NewAccount, NewSession,
            SessionRecord,
        },
        openbao::TransitHmac,
        repository::PgAuthRepository,
        token::password_verifier_input,
    },
    domain::admins::{data::normalize_email, repository::PgAdminsRepository},
};

/// Default lifetime of a login session.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(12);

/// Well-formed verifier no password can match, checked when an email has no
/// account so both login failures cost one Transit round-trip.
const UNKNOWN_ACCOUNT_VERIFIER: &str = "vault:v1:AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

#[derive(Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    admins: PgAdminsRepository,
    openbao: Arc<dyn TransitHmac>,
    session_ttl: SignedDuration,
}

impl fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgAuthService")
            .field("repository", &self.repository)
            .field("session_ttl", &self.session_ttl)
            .finish_non_exhaustive()
    }
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, openbao: impl TransitHmac + 'static) -> Self {
        Self {
            repository: PgAuthRepository::new(pool.clone()),
            admins: PgAdminsRepository::new(pool),
            openbao: Arc::new(openbao),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }

    #[must_use]
    pub fn with_session_ttl(mut self, session_ttl: SignedDuration) -> Self {
        self.session_ttl = session_ttl;
        self
    }

    /// Create a login account whose password verifier is held by OpenBao.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is taken, or HMAC computation or the
    /// database insert fails.
    pub async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccountRecord, AuthServiceError> {
        let uuid = AccountUuid::new();
        let password_hash = self
            .openbao
            .hmac(&password_verifier_input(uuid, password))
            .await?;

        let account = self
            .repository
            .create_account(NewAccount {
                uuid,
                email: normalize_email(email),
                password_hash,
            })
            .await?;

        info!(account_uuid = %account.uuid, "created account");

        Ok(account)
    }

    /// The active session a bearer token proves, if any.
    async fn authenticate(
        &self,
        bearer_token: &str,
    ) -> Result<Option<SessionRecord>, AuthServiceError> {
        let Ok(token) = bearer_token.parse::<SessionToken>() else {
            return Ok(None);
        };

        let Some(session) = self
            .repository
            .find_active_session(token.session_uuid, token.version)
            .await?
        else {
            return Ok(None);
        };

        let valid = self
            .openbao
            .verify(&token.verifier_input(session.account_uuid), &session.token_hash)
            .await?;

        if !valid {
            warn!(session_uuid = %session.uuid, "session secret did not verify");

            return Ok(None);
        }

        Ok(Some(session))
    }

    async fn settle_gate(
        &self,
        session: Option<SessionRecord>,
    ) -> Result<AuthGate, AuthServiceError> {
        let admin = match &session {
            Some(session) => self.admins.find_admin_by_email(&session.email).await?,
            None => None,
        };

        Ok(AuthGate::resolve(session, admin))
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    #[tracing::instrument(name = "auth.service.login", skip_all, err)]
    async fn login(&self, credentials: LoginCredentials) -> Result<IssuedSession, AuthServiceError> {
        let email = normalize_email(&credentials.email);

        if email.is_empty() || credentials.password.is_empty() {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let Some(account) = self.repository.find_account_by_email(&email).await? else {
            self.openbao
                .verify(
                    &password_verifier_input(AccountUuid::new(), &credentials.password),
                    UNKNOWN_ACCOUNT_VERIFIER,
                )
                .await?;

            return Err(AuthServiceError::InvalidCredentials);
        };

        let valid = self
            .openbao
            .verify(
                &password_verifier_input(account.uuid, &credentials.password),
                &account.password_hash,
            )
            .await?;

        if !valid {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = SessionToken::generate();

        let expires_at = Timestamp::now()
            .checked_add(self.session_ttl)
            .map_err(AuthServiceError::SessionExpiry)?;

        let token_hash = self
            .openbao
            .hmac(&token.verifier_input(account.uuid))
            .await?;

        self.repository
            .create_session(NewSession {
                uuid: token.session_uuid,
                account_uuid: account.uuid,
                version: token.version,
                token_hash: token_hash.clone(),
                expires_at,
            })
            .await?;

        let session = SessionRecord {
            uuid: token.session_uuid,
            account_uuid: account.uuid,
            email: account.email,
            version: token.version,
            token_hash,
            created_at: Timestamp::now(),
            last_used_at: None,
            expires_at,
        };

        let gate = self.settle_gate(Some(session)).await?;

        info!(
            account_uuid = %account.uuid,
            session_uuid = %token.session_uuid,
            gate = gate.as_str(),
            "signed in"
        );

        Ok(IssuedSession {
            token: token.to_string(),
            session_uuid: token.session_uuid,
            expires_at,
            gate,
        })
    }

    #[tracing::instrument(name = "auth.service.resolve_gate", skip_all, err)]
    async fn resolve_gate(&self, bearer_token: &str) -> Result<AuthGate, AuthServiceError> {
        let session = self.authenticate(bearer_token).await?;

        if let Some(session) = &session {
            // Best-effort metadata update; auth success should not depend on this write.
            if let Err(error) = self.repository.touch_session(session.uuid).await {
                warn!(session_uuid = %session.uuid, error = %error, "failed to touch session");
            }
        }

        self.settle_gate(session).await
    }

    #[tracing::instrument(name = "auth.service.sign_out", skip_all, err)]
    async fn sign_out(&self, bearer_token: &str) -> Result<AuthGate, AuthServiceError> {
        let Some(session) = self.authenticate(bearer_token).await? else {
            return Ok(AuthGate::Unauthenticated);
        };

        let session_uuid = session.uuid;
        let gate = self.settle_gate(Some(session)).await?;

        self.repository.revoke_session(session_uuid).await?;

        info!(session_uuid = %session_uuid, was_admin = gate.is_admin(), "signed out");

        Ok(gate.sign_out())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify an email and password and open a new session.
    ///
    /// The session is issued for any valid account; the returned gate says
    /// whether it carries admin access.
    async fn login(&self, credentials: LoginCredentials) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve the gate for a bearer token. Malformed, unknown, expired and
    /// revoked tokens all resolve to [`AuthGate::Unauthenticated`].
    async fn resolve_gate(&self, bearer_token: &str) -> Result<AuthGate, AuthServiceError>;

    /// Revoke the session behind a bearer token, if it is still active.
    async fn sign_out(&self, bearer_token: &str) -> Result<AuthGate, AuthServiceError>;
}
