use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::domain::{ReactionId, UniprotAccession};
use crate::error::FragmentError;
use crate::xml::XmlElement;

/// Rhea's two read-only endpoints: CML document fetch by reaction id and
/// reaction search by protein accession. Both return raw XML text.
#[async_trait]
pub trait RheaClient: Send + Sync {
    async fn fetch_reaction(&self, id: &ReactionId) -> Result<String, FragmentError>;

    async fn search_reactions(&self, accession: &UniprotAccession)
    -> Result<String, FragmentError>;
}

/// A parsed search response: the declared match count and the native
/// reaction URIs in the order the service listed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub matched: u64,
    pub reaction_uris: Vec<String>,
}

/// Extracts the result set from a search response. The `resultset` element
/// may sit anywhere below the response root.
pub fn parse_search_results(root: &XmlElement) -> Result<SearchResults, FragmentError> {
    let resultset = root
        .find_descendant("resultset")
        .ok_or_else(|| FragmentError::Structure("search response without resultset".to_string()))?;

    let matched = resultset
        .attribute("numberofrecordsmatched")
        .ok_or_else(|| {
            FragmentError::Lookup("resultset missing numberofrecordsmatched".to_string())
        })?
        .parse::<u64>()
        .map_err(|_| FragmentError::Lookup("numberofrecordsmatched is not numeric".to_string()))?;

    let mut reaction_uris = Vec::new();
    for reaction in resultset
        .child_elements()
        .filter(|element| element.name == "rheaReaction")
    {
        let uri = reaction
            .child_elements()
            .find(|element| element.name == "rheaid")
            .and_then(|rheaid| {
                rheaid
                    .child_elements()
                    .find(|element| element.name == "rheaUri")
            })
            .and_then(|rhea_uri| {
                rhea_uri
                    .child_elements()
                    .find(|element| element.name == "uri")
            })
            .ok_or_else(|| {
                FragmentError::Lookup("rheaReaction without rheaid/rheaUri/uri".to_string())
            })?;
        reaction_uris.push(uri.text());
    }

    Ok(SearchResults {
        matched,
        reaction_uris,
    })
}

#[derive(Clone)]
pub struct RheaHttpClient {
    client: Client,
    cml_prefix: String,
    ws_url: String,
}

impl RheaHttpClient {
    pub fn new(cml_prefix: &str, ws_url: &str) -> Result<Self, FragmentError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("rhea-fragments/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| FragmentError::RheaHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| FragmentError::RheaHttp(err.to_string()))?;
        Ok(Self {
            client,
            cml_prefix: cml_prefix.to_string(),
            ws_url: ws_url.trim_end_matches('/').to_string(),
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
            .unwrap_or_else(|_| "Rhea request failed".to_string());
        Err(FragmentError::RheaStatus { status, message })
    }
}

#[async_trait]
impl RheaClient for RheaHttpClient {
    async fn fetch_reaction(&self, id: &ReactionId) -> Result<String, FragmentError> {
        let url = format!("{}{}", self.cml_prefix, id);
        tracing::debug!(%url, "fetching reaction document");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| FragmentError::RheaHttp(err.to_string()))?;
        let response = Self::handle_status(response).await?;
        response
            .text()
            .await
            .map_err(|err| FragmentError::RheaHttp(err.to_string()))
    }

    async fn search_reactions(
        &self,
        accession: &UniprotAccession,
    ) -> Result<String, FragmentError> {
        let url = format!("{}/reaction/cmlreact", self.ws_url);
        tracing::debug!(%url, %accession, "searching reactions by accession");
        let response = self
            .client
            .get(&url)
            .query(&[("q", accession.as_str())])
            .send()
            .await
            .map_err(|err| FragmentError::RheaHttp(err.to_string()))?;
        let response = Self::handle_status(response).await?;
        response
            .text()
            .await
            .map_err(|err| FragmentError::RheaHttp(err.to_string()))
    }
}
