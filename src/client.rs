//! HTTP client for the GMH registration API.
//!
//! One thin method per remote capability: token issuance, record
//! create/upsert, record read and location-based lookup. Every method maps a
//! non-2xx response to [`GmhError::Api`] carrying the response body as
//! message; connection-level failures become [`GmhError::Transport`]. No
//! call is ever retried.

use crate::config::{AuthConfig, GmhConfig};
use anyhow::{bail, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client, Response, StatusCode, Url,
};
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Failure of a single remote call
#[derive(Error, Debug)]
pub enum GmhError {
    /// The service answered with a non-success status
    #[error("GMH service responded {status}: {message}")]
    Api { status: StatusCode, message: String },
    /// The request never produced a usable response
    #[error("request to GMH service failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// An NBN record as it travels over the wire: the identifier plus the
/// ordered locations it resolves to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NbnLocationsObject {
    pub identifier: String,
    pub locations: Vec<String>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

pub struct GmhClient {
    base_url: Url,
    client: Client,
}

impl GmhClient {
    pub fn new(cfg: &GmhConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        match &cfg.auth {
            AuthConfig::None => {}
            AuthConfig::Basic {
                username,
                password_env,
            } => {
                let pw = env::var(password_env)?;
                let token = base64::encode_config(format!("{}:{}", username, pw), base64::STANDARD);
                let hv = HeaderValue::from_str(&format!("Basic {}", token))?;
                headers.insert(AUTHORIZATION, hv);
            }
            AuthConfig::Token { token_env } => {
                let tok = env::var(token_env)?;
                let hv = HeaderValue::from_str(&tok)?;
                headers.insert(AUTHORIZATION, hv);
            }
            AuthConfig::Bearer { token_env } => {
                let tok = env::var(token_env)?;
                let hv = HeaderValue::from_str(&format!("Bearer {}", tok))?;
                headers.insert(AUTHORIZATION, hv);
            }
        }

        let base_url = Url::parse(cfg.url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            bail!("GMH url '{}' cannot serve as a base URL", cfg.url);
        }
        log::debug!("GMH client for {}", base_url);
        let client = Client::builder().default_headers(headers).build()?;
        Ok(GmhClient { base_url, client })
    }

    /// Build an endpoint URL; each segment is percent-encoded, which matters
    /// for NBNs (colons) and for locations (full URLs in a path segment).
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("base url is validated on construction")
            .pop_if_empty()
            .extend(segments);
        url
    }

    async fn checked(resp: Response) -> Result<Response, GmhError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        } else {
            body.trim().to_string()
        };
        Err(GmhError::Api { status, message })
    }

    /// Exchange username/password for a fresh API token. The service
    /// invalidates any previously issued token for the same user.
    pub async fn token(&self, username: &str, password: &str) -> Result<String, GmhError> {
        let url = self.endpoint(&["token"]);
        let resp = self
            .client
            .post(url)
            .json(&Credentials { username, password })
            .send()
            .await?;
        let parsed: TokenResponse = Self::checked(resp).await?.json().await?;
        Ok(parsed.token)
    }

    /// Register a new NBN with its locations. Fails when the NBN is already
    /// registered.
    pub async fn create_nbn_locations(&self, record: &NbnLocationsObject) -> Result<(), GmhError> {
        let url = self.endpoint(&["nbn"]);
        let resp = self.client.post(url).json(record).send().await?;
        Self::checked(resp).await?;
        Ok(())
    }

    /// Replace the locations of an NBN, registering it first if needed.
    pub async fn update_nbn_record(
        &self,
        identifier: &str,
        locations: &[String],
    ) -> Result<(), GmhError> {
        let url = self.endpoint(&["nbn", identifier]);
        let resp = self.client.put(url).json(&locations).send().await?;
        Self::checked(resp).await?;
        Ok(())
    }

    /// Fetch the full record for an NBN.
    pub async fn get_nbn_record(&self, identifier: &str) -> Result<NbnLocationsObject, GmhError> {
        let url = self.endpoint(&["nbn", identifier]);
        let resp = self.client.get(url).send().await?;
        Ok(Self::checked(resp).await?.json().await?)
    }

    /// Fetch only the locations an NBN resolves to, in registration order.
    pub async fn get_locations(&self, identifier: &str) -> Result<Vec<String>, GmhError> {
        let url = self.endpoint(&["nbn", identifier, "locations"]);
        let resp = self.client.get(url).send().await?;
        Ok(Self::checked(resp).await?.json().await?)
    }

    /// Find all NBNs that resolve to the given location. An empty answer is
    /// not an error.
    pub async fn find_by_location(&self, location: &str) -> Result<Vec<String>, GmhError> {
        let url = self.endpoint(&["location", location]);
        let resp = self.client.get(url).send().await?;
        Ok(Self::checked(resp).await?.json().await?)
    }
}
