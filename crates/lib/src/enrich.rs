//! # Enrichment Orchestrator
//!
//! Runs the per-participant pipeline (search, resolve, fetch, summarize) and
//! fans it out across all participants of a request with bounded concurrency.
//! Every failure inside a pipeline is converted into a [`ParticipantOutcome`];
//! nothing a single participant does can fail the whole request.

use crate::{
    errors::ScoutError,
    extract::{
        extract_urls, resolve_profile_id, DEFAULT_BLOCKED_URL_FRAGMENT, DEFAULT_PROFILE_MARKER,
    },
    prompts::{render_summary_prompt, SUMMARY_SYSTEM_PROMPT, SUMMARY_USER_PROMPT},
    providers::{
        ai::AiProvider,
        profile::ProfileProvider,
        search::{SearchProvider, SearchQuery},
    },
    types::{
        EnrichmentRequest, EnrichmentResponse, ParticipantOutcome, ProfileRecord, Stage, Summary,
    },
};
use futures::{stream, StreamExt};
use serde_json::Value;
use std::{fmt, sync::Arc};
use tracing::{debug, error, info, warn};

/// Upper bound on concurrent pipelines when nothing else is configured.
pub fn default_max_concurrency() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cpus + 4).min(32)
}

/// Tunables for the enrichment pipeline.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    pub pages: u32,
    pub limit: u32,
    pub blocked_url_fragment: String,
    pub profile_marker: String,
    pub max_concurrency: usize,
    pub system_prompt: String,
    pub user_prompt: String,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            pages: 1,
            limit: 5,
            blocked_url_fragment: DEFAULT_BLOCKED_URL_FRAGMENT.to_string(),
            profile_marker: DEFAULT_PROFILE_MARKER.to_string(),
            max_concurrency: default_max_concurrency(),
            system_prompt: SUMMARY_SYSTEM_PROMPT.to_string(),
            user_prompt: SUMMARY_USER_PROMPT.to_string(),
        }
    }
}

/// Runs enrichment requests against a fixed set of providers.
#[derive(Clone)]
pub struct Enricher {
    search_provider: Arc<dyn SearchProvider>,
    profile_provider: Arc<dyn ProfileProvider>,
    ai_provider: Arc<dyn AiProvider>,
    options: EnrichOptions,
}

impl fmt::Debug for Enricher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enricher")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// A builder for creating `Enricher` instances.
#[derive(Default)]
pub struct EnricherBuilder {
    search_provider: Option<Box<dyn SearchProvider>>,
    profile_provider: Option<Box<dyn ProfileProvider>>,
    ai_provider: Option<Box<dyn AiProvider>>,
    options: EnrichOptions,
}

impl EnricherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_provider(mut self, provider: Box<dyn SearchProvider>) -> Self {
        self.search_provider = Some(provider);
        self
    }

    pub fn profile_provider(mut self, provider: Box<dyn ProfileProvider>) -> Self {
        self.profile_provider = Some(provider);
        self
    }

    pub fn ai_provider(mut self, provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    pub fn options(mut self, options: EnrichOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the `Enricher`, failing if any provider was not set.
    pub fn build(self) -> Result<Enricher, ScoutError> {
        let search_provider = self
            .search_provider
            .ok_or(ScoutError::MissingProvider("search"))?;
        let profile_provider = self
            .profile_provider
            .ok_or(ScoutError::MissingProvider("profile"))?;
        let ai_provider = self.ai_provider.ok_or(ScoutError::MissingProvider("AI"))?;

        Ok(Enricher {
            search_provider: Arc::from(search_provider),
            profile_provider: Arc::from(profile_provider),
            ai_provider: Arc::from(ai_provider),
            options: self.options,
        })
    }
}

impl Enricher {
    pub fn options(&self) -> &EnrichOptions {
        &self.options
    }

    /// Enriches every participant of `request`.
    ///
    /// Pipelines run concurrently, at most `max_concurrency` at a time, and the
    /// results come back in the same order as `request.participants`.
    pub async fn enrich(&self, request: &EnrichmentRequest) -> EnrichmentResponse {
        let concurrency = request
            .participants
            .len()
            .min(self.options.max_concurrency)
            .max(1);
        info!(
            company = %request.company,
            participants = request.participants.len(),
            concurrency,
            "Starting enrichment"
        );

        let company = request.company.as_str();
        let results = stream::iter(request.participants.iter().cloned())
            .map(|participant| async move { self.enrich_participant(&participant, company).await })
            .buffered(concurrency)
            .collect::<Vec<_>>()
            .await;

        EnrichmentResponse { results }
    }

    /// Runs the full pipeline for one participant.
    pub async fn enrich_participant(&self, participant: &str, company: &str) -> ParticipantOutcome {
        let failed = |error: String, stage: Stage| ParticipantOutcome::Failed {
            participant: participant.to_string(),
            error,
            stage,
        };

        // Searching
        info!(%participant, stage = %Stage::Searching, "Enriching participant");
        let query = SearchQuery {
            text: format!("{participant} {company} LinkedIn"),
            pages: self.options.pages,
            limit: self.options.limit,
        };
        let search_result = match self.search_provider.search(&query).await {
            Ok(result) => result,
            Err(e) => {
                error!(%participant, error = %e, "Search failed");
                return failed(format!("Failed to search for {participant}"), Stage::Searching);
            }
        };

        // Resolving
        info!(%participant, stage = %Stage::Resolving, "Search complete");
        let urls = extract_urls(&search_result, &self.options.blocked_url_fragment);
        debug!(%participant, ?urls, "Extracted candidate urls");
        // A bare marker such as `linkedin.com/in/` yields an empty id, which counts as no match.
        let Some(profile_id) = resolve_profile_id(&urls, &self.options.profile_marker)
            .filter(|id| !id.is_empty())
        else {
            info!(%participant, "No profile url in search results");
            return ParticipantOutcome::NotFound {
                participant: participant.to_string(),
            };
        };

        // Fetching
        info!(%participant, %profile_id, stage = %Stage::Fetching, "Resolved profile id");
        let record = match self.fetch_record(&profile_id).await {
            Ok(record) => record,
            Err(e) => {
                error!(%participant, %profile_id, error = %e, "Error fetching profile information");
                return failed(
                    ParticipantOutcome::FETCH_FAILURE_MESSAGE.to_string(),
                    Stage::Fetching,
                );
            }
        };

        // Summarizing
        info!(%participant, %profile_id, stage = %Stage::Summarizing, "Profile fetched");
        let summary = self.summarize(&record.profile).await;
        info!(%participant, stage = %Stage::Done, "Participant enriched");

        ParticipantOutcome::Found {
            participant: participant.to_string(),
            record,
            summary,
        }
    }

    async fn fetch_record(&self, profile_id: &str) -> Result<ProfileRecord, ScoutError> {
        let profile = self.profile_provider.get_profile(profile_id).await?;
        let contact_info = self.profile_provider.get_contact_info(profile_id).await?;
        Ok(ProfileRecord {
            profile_id: profile_id.to_string(),
            profile,
            contact_info,
        })
    }

    /// Asks the AI provider for a profile summary. Never fails.
    pub async fn summarize(&self, profile: &Value) -> Summary {
        let profile_text =
            serde_json::to_string_pretty(profile).unwrap_or_else(|_| profile.to_string());
        let user_prompt = render_summary_prompt(&self.options.user_prompt, &profile_text);

        match self
            .ai_provider
            .generate(&self.options.system_prompt, &user_prompt)
            .await
        {
            Ok(chatgpt_content) => Summary::Generated { chatgpt_content },
            Err(e) => {
                warn!(error = %e, "Error generating profile summary");
                Summary::failed()
            }
        }
    }
}
