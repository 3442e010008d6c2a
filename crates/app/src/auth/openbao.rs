//! OpenBao Transit client.
//!
//! Password and session verifiers are keyed HMACs computed by the Transit
//! engine, so the key never leaves OpenBao and the database only ever holds
//! `vault:v1:...` verifier strings.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use thiserror::Error;

/// Configuration for connecting to an OpenBao instance.
#[derive(Debug, Clone)]
pub struct OpenBaoConfig {
    /// Server address, e.g. `"http://localhost:8200"`.
    pub addr: String,

    /// OpenBao authentication token.
    pub token: String,

    /// Transit key used for every HMAC.
    pub transit_key: String,
}

#[derive(Debug, Clone)]
pub struct OpenBaoClient {
    config: OpenBaoConfig,
    http: Client,
}

impl OpenBaoClient {
    #[must_use]
    pub fn new(config: OpenBaoConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn endpoint(&self, operation: &str) -> String {
        format!(
            "{}/v1/transit/{operation}/{}",
            self.config.addr.trim_end_matches('/'),
            self.config.transit_key
        )
    }

    async fn transit<T: DeserializeOwned>(
        &self,
        operation: &str,
        body: Value,
    ) -> Result<T, OpenBaoError> {
        let response = self
            .http
            .post(self.endpoint(operation))
            .header("X-Vault-Token", &self.config.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(OpenBaoError::UnexpectedResponse(format!(
                "{operation} request failed with status {status}: {text}"
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl TransitHmac for OpenBaoClient {
    async fn hmac(&self, input: &[u8]) -> Result<String, OpenBaoError> {
        let response: TransitResponse<HmacData> = self
            .transit("hmac", json!({ "input": BASE64.encode(input) }))
            .await?;

        Ok(response.data.hmac)
    }

    async fn verify(&self, input: &[u8], hmac: &str) -> Result<bool, OpenBaoError> {
        let response: TransitResponse<VerifyData> = self
            .transit(
                "verify",
                json!({ "input": BASE64.encode(input), "hmac": hmac }),
            )
            .await?;

        Ok(response.data.valid)
    }
}

/// Keyed HMAC operations behind password and session verifiers.
#[automock]
#[async_trait]
pub trait TransitHmac: Send + Sync {
    /// Compute the verifier string to store for `input`.
    async fn hmac(&self, input: &[u8]) -> Result<String, OpenBaoError>;

    /// Check `input` against a stored verifier. A mismatch is `Ok(false)`.
    async fn verify(&self, input: &[u8], hmac: &str) -> Result<bool, OpenBaoError>;
}

#[derive(Debug, Deserialize)]
struct TransitResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct HmacData {
    hmac: String,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    valid: bool,
}

#[derive(Debug, Error)]
pub enum OpenBaoError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from OpenBao: {0}")]
    UnexpectedResponse(String),
}
