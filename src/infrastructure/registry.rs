//! Container registry operations
//!
//! Resolves task bundle tags to manifest digests through the Quay
//! repository tag API:
//!
//! ```text
//! GET <api_url>/<namespace>/<task>/tag/?specificTag=<tag>
//! {"tags": [{"manifest_digest": "sha256:...", "expiration": "..."}]}
//! ```
//!
//! A tag that was moved keeps its old entries around with an `expiration`
//! set, so the live digest is the first entry without one.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::domain::{Digest, ReferenceKey};
use crate::error::{RefreshError, RegistryError};

/// Looks up the current digest for a bundle reference
#[allow(async_fn_in_trait)]
pub trait DigestResolver {
    async fn resolve(&self, key: &ReferenceKey) -> Result<Digest, RegistryError>;
}

/// Tag listing response body
#[derive(Debug, Deserialize)]
struct TagListResponse {
    #[serde(default)]
    tags: Vec<TagInfo>,
}

/// One tag history entry
///
/// Both fields record key presence: `"expiration": null` still counts as
/// expired, and `"manifest_digest": null` still counts as present.
#[derive(Debug, Deserialize)]
struct TagInfo {
    #[serde(default, deserialize_with = "present")]
    manifest_digest: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    expiration: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Pick the live digest out of a tag history
///
/// Takes the first entry that has no `expiration` and has a
/// `manifest_digest`. Later entries are never consulted, even when the
/// chosen entry's digest turns out to be malformed.
fn select_digest(tags: &[TagInfo]) -> Result<Digest, RegistryError> {
    let live = tags
        .iter()
        .find(|t| t.expiration.is_none() && t.manifest_digest.is_some())
        .ok_or(RegistryError::NoQualifyingDigest)?;

    match &live.manifest_digest {
        Some(Value::String(digest)) => Digest::parse(digest),
        other => Err(RegistryError::MalformedDigest {
            value: other
                .as_ref()
                .map(Value::to_string)
                .unwrap_or_default(),
        }),
    }
}

/// Client for the Quay repository tag API
pub struct QuayClient {
    http: reqwest::Client,
    config: RegistryConfig,
}

impl QuayClient {
    /// Create a new registry client
    pub fn new(config: RegistryConfig) -> Result<Self, RefreshError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("bundle-refresh/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RefreshError::Client)?;
        Ok(Self { http, config })
    }

    /// Fetch the live digest for one task bundle tag
    ///
    /// Issues exactly one GET. Any non-2xx status is an error.
    pub async fn fetch_digest(&self, task_name: &str, tag: &str) -> Result<Digest, RegistryError> {
        let url = self.config.tag_url(task_name, tag);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| RegistryError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| RegistryError::Transport {
                url: url.clone(),
                source,
            })?;

        let listing: TagListResponse =
            serde_json::from_str(&body).map_err(|e| RegistryError::Decode {
                url,
                message: e.to_string(),
            })?;

        select_digest(&listing.tags)
    }
}

impl DigestResolver for QuayClient {
    async fn resolve(&self, key: &ReferenceKey) -> Result<Digest, RegistryError> {
        self.fetch_digest(&key.task_name, &key.tag).await
    }
}
