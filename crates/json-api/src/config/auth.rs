//! Auth Config

use clap::Args;
use jiff::SignedDuration;

/// OpenBao and login session settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// `OpenBao` server address
    #[arg(long = "openbao-addr", env = "OPENBAO_ADDR")]
    pub addr: String,

    /// `OpenBao` authentication token
    #[arg(long = "openbao-token", env = "OPENBAO_TOKEN", hide_env_values = true)]
    pub token: String,

    /// `OpenBao` Transit key name
    #[arg(long = "openbao-transit-key", env = "OPENBAO_TRANSIT_KEY")]
    pub transit_key: String,

    /// Lifetime of an admin login session in hours
    #[arg(
        long,
        env = "SESSION_TTL_HOURS",
        default_value_t = 12,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub session_ttl_hours: u16,
}

impl AuthConfig {
    #[must_use]
    pub fn session_ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(i64::from(self.session_ttl_hours))
    }
}
