//! Session token formatting, parsing, and HMAC input construction.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use uuid::Uuid;
use zeroize::{Zeroize, Zeroizing};

use crate::auth::models::{AccountUuid, SessionUuid};

/// Session token prefix.
pub const SESSION_TOKEN_PREFIX: &str = "tp";

/// Number of secret bytes encoded in a token.
pub const SESSION_SECRET_BYTES: usize = 32;

const SESSION_SECRET_HEX_CHARS: usize = SESSION_SECRET_BYTES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTokenVersion {
    V1,
}

impl SessionTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for SessionTokenVersion {
    type Error = SessionTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for SessionTokenVersion {
    type Err = SessionTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct SessionSecret {
    bytes: [u8; SESSION_SECRET_BYTES],
}

impl SessionSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SESSION_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; SESSION_SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self::from_bytes(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SESSION_SECRET_BYTES] {
        &self.bytes
    }

    fn to_hex(&self) -> String {
        self.bytes.iter().map(|byte| format!("{byte:02x}")).collect()
    }

    fn from_hex(secret_hex: &str) -> Option<Self> {
        if secret_hex.len() != SESSION_SECRET_HEX_CHARS {
            return None;
        }

        let mut bytes = [0_u8; SESSION_SECRET_BYTES];

        for (byte, pair) in bytes.iter_mut().zip(secret_hex.as_bytes().chunks_exact(2)) {
            let [hi, lo] = pair else {
                return None;
            };

            *byte = (decode_hex_nibble(*hi)? << 4) | decode_hex_nibble(*lo)?;
        }

        Some(Self::from_bytes(bytes))
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(**redacted**)")
    }
}

impl Drop for SessionSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// A bearer token of the form `tp_v1_{session_uuid}.{secret_hex}`.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub session_uuid: SessionUuid,
    pub version: SessionTokenVersion,
    pub secret: SessionSecret,
}

impl SessionToken {
    /// A fresh token for a new session.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            session_uuid: SessionUuid::new(),
            version: SessionTokenVersion::V1,
            secret: SessionSecret::generate(),
        }
    }

    /// HMAC input binding the secret to its session and owning account.
    ///
    /// Format: `{session_uuid_hex}:{version_i16}:{account_uuid_hex}:{secret_hex}`
    #[must_use]
    pub fn verifier_input(&self, account: AccountUuid) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(
            format!(
                "{}:{}:{}:{}",
                self.session_uuid.simple(),
                self.version.as_i16(),
                account.simple(),
                self.secret.to_hex(),
            )
            .into_bytes(),
        )
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SESSION_TOKEN_PREFIX}_{}_{}.{}",
            self.version.segment(),
            self.session_uuid.simple(),
            self.secret.to_hex()
        )
    }
}

impl FromStr for SessionToken {
    type Err = SessionTokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (prefix_and_id, secret_hex) = token
            .split_once('.')
            .ok_or(SessionTokenError::InvalidFormat)?;

        let mut id_parts = prefix_and_id.splitn(3, '_');

        let prefix = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
        let version_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
        let uuid_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;

        if prefix != SESSION_TOKEN_PREFIX {
            return Err(SessionTokenError::InvalidFormat);
        }

        let version = version_segment.parse::<SessionTokenVersion>()?;

        let session_uuid =
            Uuid::try_parse(uuid_segment).map_err(|_parse| SessionTokenError::InvalidFormat)?;

        let secret =
            SessionSecret::from_hex(secret_hex).ok_or(SessionTokenError::InvalidSecretEncoding)?;

        Ok(Self {
            session_uuid: SessionUuid::from_uuid(session_uuid),
            version,
            secret,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token uses an unsupported version")]
    UnsupportedVersion,

    #[error("session token secret encoding is invalid")]
    InvalidSecretEncoding,
}

/// HMAC input for a password verifier, salted with the account id.
#[must_use]
pub fn password_verifier_input(account: AccountUuid, password: &str) -> Zeroizing<Vec<u8>> {
    Zeroizing::new(format!("{}:{password}", account.simple()).into_bytes())
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_prefix_version_and_simple_uuid() {
        let token = SessionToken {
            session_uuid: SessionUuid::from_uuid(Uuid::nil()),
            version: SessionTokenVersion::V1,
            secret: SessionSecret::from_bytes([0xAB; SESSION_SECRET_BYTES]),
        };

        let formatted = token.to_string();

        assert_eq!(
            formatted,
            format!("tp_v1_{}.{}", "0".repeat(32), "ab".repeat(32))
        );
    }

    #[test]
    fn generated_token_parses_back() -> Result<(), SessionTokenError> {
        let token = SessionToken::generate();
        let parsed = token.to_string().parse::<SessionToken>()?;

        assert_eq!(parsed.session_uuid, token.session_uuid);
        assert_eq!(parsed.version, SessionTokenVersion::V1);
        assert_eq!(parsed.secret.as_bytes(), token.secret.as_bytes());

        Ok(())
    }

    #[test]
    fn rejects_foreign_prefix() {
        let token = format!("lt_v1_{}.{}", Uuid::nil().simple(), "ab".repeat(32));

        assert_eq!(
            token.parse::<SessionToken>().err(),
            Some(SessionTokenError::InvalidFormat)
        );
    }

    #[test]
    fn rejects_unknown_version() {
        let token = format!("tp_v9_{}.{}", Uuid::nil().simple(), "ab".repeat(32));

        assert_eq!(
            token.parse::<SessionToken>().err(),
            Some(SessionTokenError::UnsupportedVersion)
        );
    }

    #[test]
    fn rejects_short_or_non_hex_secret() {
        let short = format!("tp_v1_{}.abcd", Uuid::nil().simple());
        let non_hex = format!("tp_v1_{}.{}", Uuid::nil().simple(), "zz".repeat(32));

        assert_eq!(
            short.parse::<SessionToken>().err(),
            Some(SessionTokenError::InvalidSecretEncoding)
        );
        assert_eq!(
            non_hex.parse::<SessionToken>().err(),
            Some(SessionTokenError::InvalidSecretEncoding)
        );
    }

    #[test]
    fn verifier_input_binds_account() {
        let token = SessionToken::generate();

        let account = AccountUuid::new();

        let first = token.verifier_input(account);
        let again = token.verifier_input(account);
        let other = token.verifier_input(AccountUuid::new());

        assert_eq!(*first, *again, "verifier input must be deterministic");
        assert_ne!(*first, *other, "verifier input must depend on the account");
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = SessionSecret::from_bytes([0x11; SESSION_SECRET_BYTES]);

        assert_eq!(format!("{secret:?}"), "SessionSecret(**redacted**)");
    }
}
