use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};

use crate::error::FragmentError;

/// Hint passed along with a `uris_to_eri` call so the xref database can
/// mint the enrichment URI under the right entity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Compound,
    Reaction,
    Protein,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Compound => write!(f, "Compound"),
            EntityKind::Reaction => write!(f, "Reaction"),
            EntityKind::Protein => write!(f, "Protein"),
        }
    }
}

/// Bidirectional translation between enrichment URIs and the native URIs
/// (xrefs) they stand for.
#[async_trait]
pub trait XrefClient: Send + Sync {
    async fn uris_to_eri(&self, uris: &[String], kind: EntityKind)
    -> Result<String, FragmentError>;

    async fn eri_to_uris(&self, eri: &str) -> Result<Vec<String>, FragmentError>;
}

#[derive(Debug, Serialize)]
struct UrisToEriRequest<'a> {
    uris: &'a [String],
    kind: EntityKind,
}

#[derive(Debug, Deserialize)]
struct UrisToEriResponse {
    eri: String,
}

#[derive(Debug, Serialize)]
struct EriToUrisRequest<'a> {
    eri: &'a str,
}

#[derive(Debug, Deserialize)]
struct EriToUrisResponse {
    #[serde(default)]
    uris: Vec<String>,
}

#[derive(Clone)]
pub struct XrefDbHttpClient {
    client: Client,
    base_url: String,
}

impl XrefDbHttpClient {
    pub fn new(base_url: &str) -> Result<Self, FragmentError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("rhea-fragments/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| FragmentError::XrefHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| FragmentError::XrefHttp(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn handle_status(response: reqwest::Response) -> Result<reqwest::Response, FragmentError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "xrefdb request failed".to_string());
        Err(FragmentError::XrefStatus { status, message })
    }
}

#[async_trait]
impl XrefClient for XrefDbHttpClient {
    async fn uris_to_eri(
        &self,
        uris: &[String],
        kind: EntityKind,
    ) -> Result<String, FragmentError> {
        let url = format!("{}/urisToERI", self.base_url);
        tracing::debug!(%url, %kind, "resolving native uris to eri");
        let response = self
            .client
            .post(&url)
            .json(&UrisToEriRequest { uris, kind })
            .send()
            .await
            .map_err(|err| FragmentError::XrefHttp(err.to_string()))?;
        let response = Self::handle_status(response).await?;
        let body: UrisToEriResponse = response
            .json()
            .await
            .map_err(|err| FragmentError::XrefHttp(err.to_string()))?;
        Ok(body.eri)
    }

    async fn eri_to_uris(&self, eri: &str) -> Result<Vec<String>, FragmentError> {
        let url = format!("{}/eriToURIs", self.base_url);
        tracing::debug!(%url, eri, "resolving eri to native uris");
        let response = self
            .client
            .post(&url)
            .json(&EriToUrisRequest { eri })
            .send()
            .await
            .map_err(|err| FragmentError::XrefHttp(err.to_string()))?;
        let response = Self::handle_status(response).await?;
        let body: EriToUrisResponse = response
            .json()
            .await
            .map_err(|err| FragmentError::XrefHttp(err.to_string()))?;
        Ok(body.uris)
    }
}
