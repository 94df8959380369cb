use thiserror::Error;

/// Custom error types for the enrichment pipeline.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to search API: {0}")]
    SearchRequest(reqwest::Error),
    #[error("Search API returned status {status}: {body}")]
    SearchApi { status: u16, body: String },
    #[error("Failed to deserialize search API response: {0}")]
    SearchDeserialization(reqwest::Error),
    #[error("Failed to send request to profile API: {0}")]
    ProfileRequest(reqwest::Error),
    #[error("Profile API returned status {status}: {body}")]
    ProfileApi { status: u16, body: String },
    #[error("Failed to deserialize profile API response: {0}")]
    ProfileDeserialization(reqwest::Error),
    #[error("Profile session authentication failed: {0}")]
    ProfileAuth(String),
    #[error("Failed to read cookie export '{path}': {source}")]
    CookieFile {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse cookie export: {0}")]
    CookieParse(#[from] serde_json::Error),
    #[error("Invalid cookie domain '{0}'")]
    CookieDomain(String),
    #[error("Failed to send request to AI API: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI API response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI API returned an error: {0}")]
    AiApi(String),
    #[error("AI API returned no completion choices")]
    EmptyCompletion,
    #[error("{0} provider is missing")]
    MissingProvider(&'static str),
    #[error("Missing required field: {0}")]
    MissingArgs(&'static str),
}
