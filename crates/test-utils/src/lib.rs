//! Mock providers shared by the server integration tests.
//!
//! Every mock records its calls so tests can assert on what the pipeline
//! actually asked for, and answers from responses registered up front.

use async_trait::async_trait;
use profilescout::{
    providers::{
        ai::AiProvider,
        profile::ProfileProvider,
        search::{SearchProvider, SearchQuery},
    },
    ScoutError,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// --- Test-Specific Helpers ---

/// Builds a search payload shaped like a parsed search-engine response,
/// including one engine-internal URL that must never be picked.
pub fn search_payload(urls: &[&str]) -> Value {
    let organic: Vec<Value> = urls.iter().map(|url| json!({ "url": url })).collect();
    json!({
        "results": [{
            "content": {
                "url": "https://www.google.de/search?q=profile",
                "results": { "organic": organic }
            }
        }]
    })
}

/// Returns the canonical profile URL for `profile_id`.
pub fn profile_url(profile_id: &str) -> String {
    format!("https://www.linkedin.com/in/{profile_id}/")
}

// --- Mock Search Provider ---

#[derive(Clone, Debug, Default)]
pub struct MockSearchProvider {
    responses: Arc<Mutex<Vec<(String, Value)>>>,
    failures: Arc<Mutex<Vec<String>>>,
    delays: Arc<Mutex<Vec<(String, Duration)>>>,
    calls: Arc<Mutex<Vec<SearchQuery>>>,
}

impl MockSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-programs a payload for every query containing `key`.
    /// Queries matching no key fail with a search API error.
    pub fn add_response(&self, key: &str, payload: Value) {
        let mut responses = self.responses.lock().unwrap();
        responses.push((key.to_string(), payload));
    }

    /// Makes every query containing `key` fail, even if a response is registered.
    pub fn add_failure(&self, key: &str) {
        self.failures.lock().unwrap().push(key.to_string());
    }

    /// Delays the answer to every query containing `key`.
    pub fn add_delay(&self, key: &str, delay: Duration) {
        self.delays.lock().unwrap().push((key.to_string(), delay));
    }

    /// Retrieves the recorded query texts for assertion.
    pub fn get_calls(&self) -> Vec<String> {
        self.get_queries().into_iter().map(|q| q.text).collect()
    }

    /// Retrieves the recorded queries, including paging options.
    pub fn get_queries(&self) -> Vec<SearchQuery> {
        self.calls.lock().unwrap().clone()
    }

    fn matches<T: Clone>(entries: &Mutex<Vec<(String, T)>>, text: &str) -> Option<T> {
        entries
            .lock()
            .unwrap()
            .iter()
            .find(|(key, _)| text.contains(key.as_str()))
            .map(|(_, value)| value.clone())
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, query: &SearchQuery) -> Result<Value, ScoutError> {
        self.calls.lock().unwrap().push(query.clone());

        if let Some(delay) = Self::matches(&self.delays, &query.text) {
            tokio::time::sleep(delay).await;
        }

        let failing = self
            .failures
            .lock()
            .unwrap()
            .iter()
            .any(|key| query.text.contains(key.as_str()));
        if failing {
            return Err(ScoutError::SearchApi {
                status: 500,
                body: "MockSearchProvider: programmed failure".to_string(),
            });
        }

        Self::matches(&self.responses, &query.text).ok_or_else(|| ScoutError::SearchApi {
            status: 503,
            body: format!("MockSearchProvider: no response for '{}'", query.text),
        })
    }
}

// --- Mock Profile Provider ---

#[derive(Clone, Debug, Default)]
pub struct MockProfileProvider {
    profiles: Arc<Mutex<HashMap<String, Value>>>,
    contacts: Arc<Mutex<HashMap<String, Value>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockProfileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the profile and contact documents served for `profile_id`.
    /// Identifiers without a registration fail with a profile API error.
    pub fn add_profile(&self, profile_id: &str, profile: Value, contact_info: Value) {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile_id.to_string(), profile);
        self.contacts
            .lock()
            .unwrap()
            .insert(profile_id.to_string(), contact_info);
    }

    /// Registers a profile whose contact lookup fails.
    pub fn add_profile_without_contact(&self, profile_id: &str, profile: Value) {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile_id.to_string(), profile);
    }

    /// Retrieves the recorded calls as `profile:<id>` and `contact:<id>`.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn lookup(
        &self,
        store: &Mutex<HashMap<String, Value>>,
        profile_id: &str,
    ) -> Result<Value, ScoutError> {
        store
            .lock()
            .unwrap()
            .get(profile_id)
            .cloned()
            .ok_or_else(|| ScoutError::ProfileApi {
                status: 404,
                body: format!("MockProfileProvider: unknown profile '{profile_id}'"),
            })
    }
}

#[async_trait]
impl ProfileProvider for MockProfileProvider {
    async fn get_profile(&self, profile_id: &str) -> Result<Value, ScoutError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("profile:{profile_id}"));
        self.lookup(&self.profiles, profile_id)
    }

    async fn get_contact_info(&self, profile_id: &str) -> Result<Value, ScoutError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("contact:{profile_id}"));
        self.lookup(&self.contacts, profile_id)
    }
}

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs a response for a specific prompt.
    /// The key should be a unique substring of the user prompt.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ScoutError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((system_prompt.to_string(), user_prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if user_prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        Err(ScoutError::AiApi(format!(
            "MockAiProvider: No response programmed for user prompt. Got: '{user_prompt}'"
        )))
    }
}
