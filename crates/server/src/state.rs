//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The provider clients are constructed once here
//! and handed to the [`Enricher`], which every request handler shares.

use crate::config::AppConfig;
use anyhow::{anyhow, Context};
use profilescout::{
    providers::{
        ai::openai::OpenAiProvider,
        profile::{
            cookies::load_cookie_export, linkedin::LinkedinProfileProvider, ProfileProvider,
        },
        search::oxylabs::OxylabsSearchProvider,
    },
    Enricher, EnricherBuilder,
};
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// The enrichment pipeline with its provider clients.
    pub enricher: Arc<Enricher>,
}

impl AppState {
    pub fn new(config: AppConfig, enricher: Enricher) -> Self {
        Self {
            config: Arc::new(config),
            enricher: Arc::new(enricher),
        }
    }
}

/// Builds the shared application state from the configuration.
///
/// This function initializes all external clients:
/// - the search provider, which requires API credentials;
/// - the profile provider session, restored from a cookie export or
///   established with a credential login;
/// - the chat-completion provider.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let search = &config.search;
    let (username, password) = search
        .username
        .clone()
        .zip(search.password.clone())
        .ok_or_else(|| anyhow!("search.username and search.password are required"))?;
    let search_provider = OxylabsSearchProvider::new(
        search.api_url.clone(),
        username,
        password,
        search.search_options(),
    )?;

    let profile_provider = build_profile_provider(&config).await?;

    let ai_provider = OpenAiProvider::new(
        config.ai.api_url.clone(),
        config.ai.api_key.clone(),
        config.ai.model_name.clone(),
    )?
    .with_temperature(config.ai.temperature);
    info!(model = %config.ai.model_name, "Initialized completion provider.");

    let enricher = EnricherBuilder::new()
        .search_provider(Box::new(search_provider))
        .profile_provider(profile_provider)
        .ai_provider(Box::new(ai_provider))
        .options(config.enrich_options())
        .build()?;

    Ok(AppState::new(config, enricher))
}

async fn build_profile_provider(config: &AppConfig) -> anyhow::Result<Box<dyn ProfileProvider>> {
    let profile = &config.profile;

    if let Some(path) = &profile.cookies_path {
        let cookies = load_cookie_export(path)
            .with_context(|| format!("Failed to load profile session cookies from '{path}'"))?;
        let provider =
            LinkedinProfileProvider::from_cookie_export(profile.api_url.clone(), &cookies)?;
        info!(cookies_path = %path, "Initialized profile provider from cookie export.");
        return Ok(Box::new(provider));
    }

    match (&profile.username, &profile.password) {
        (Some(username), Some(password)) => {
            let provider = LinkedinProfileProvider::login(
                profile.api_url.clone(),
                &profile.auth_url,
                username,
                password,
            )
            .await?;
            info!("Initialized profile provider with credential login.");
            Ok(Box::new(provider))
        }
        _ => Err(anyhow!(
            "profile.cookies_path or profile.username and profile.password must be set"
        )),
    }
}
