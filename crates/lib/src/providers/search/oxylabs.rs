use super::{SearchProvider, SearchQuery};
use crate::errors::ScoutError;
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_OXYLABS_API_URL: &str = "https://realtime.oxylabs.io/v1/queries";

/// Provider-side search settings that do not change per query.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SearchOptions {
    pub source: String,
    pub domain: String,
    pub geo_location: String,
    pub locale: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            source: "google_search".to_string(),
            domain: "de".to_string(),
            geo_location: "Germany".to_string(),
            locale: "en-us".to_string(),
        }
    }
}

#[derive(Serialize)]
struct RealtimeQuery<'a> {
    source: &'a str,
    query: &'a str,
    domain: &'a str,
    geo_location: &'a str,
    locale: &'a str,
    parse: bool,
    start_page: u32,
    pages: u32,
    limit: u32,
}

/// A search provider backed by the Oxylabs realtime scraper API.
#[derive(Clone, Debug)]
pub struct OxylabsSearchProvider {
    client: ReqwestClient,
    api_url: String,
    username: String,
    password: String,
    options: SearchOptions,
}

impl OxylabsSearchProvider {
    pub fn new(
        api_url: String,
        username: String,
        password: String,
        options: SearchOptions,
    ) -> Result<Self, ScoutError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(ScoutError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            username,
            password,
            options,
        })
    }
}

#[async_trait]
impl SearchProvider for OxylabsSearchProvider {
    async fn search(&self, query: &SearchQuery) -> Result<Value, ScoutError> {
        let body = RealtimeQuery {
            source: &self.options.source,
            query: &query.text,
            domain: &self.options.domain,
            geo_location: &self.options.geo_location,
            locale: &self.options.locale,
            parse: true,
            start_page: 1,
            pages: query.pages,
            limit: query.limit,
        };

        debug!(query = %query.text, "Sending search request");
        let response = self
            .client
            .post(&self.api_url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&body)
            .send()
            .await
            .map_err(ScoutError::SearchRequest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoutError::SearchApi {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(ScoutError::SearchDeserialization)
    }
}
