//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port with mock providers from
//! `profilescout-test-utils`. Tests that need the real chat-completion client
//! point it at the bundled `httpmock::MockServer` instead.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use httpmock::MockServer;
use profilescout::{providers::ai::AiProvider, EnrichOptions, EnricherBuilder};
use profilescout_server::{config::AppConfig, router, state::AppState};
use profilescout_test_utils::{MockAiProvider, MockProfileProvider, MockSearchProvider};
use reqwest::Client;
use std::net::SocketAddr;
use tokio::{net::TcpListener, task::JoinHandle};

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub search: MockSearchProvider,
    pub profile: MockProfileProvider,
    pub ai: MockAiProvider,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server with mock search, profile, and AI providers.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(|_, ai| Ok(Box::new(ai.clone())), EnrichOptions::default()).await
    }

    /// Spawns the server with a custom AI provider and pipeline options.
    ///
    /// `make_ai` receives the mock server and the mock AI provider so a test
    /// can pick either one.
    pub async fn spawn_with<F>(make_ai: F, options: EnrichOptions) -> Result<Self>
    where
        F: FnOnce(&MockServer, &MockAiProvider) -> Result<Box<dyn AiProvider>>,
    {
        dotenvy::dotenv().ok();
        // `try_init` is used to prevent panic if the logger is already initialized.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start_async().await;
        let search = MockSearchProvider::new();
        let profile = MockProfileProvider::new();
        let ai = MockAiProvider::new();

        let enricher = EnricherBuilder::new()
            .search_provider(Box::new(search.clone()))
            .profile_provider(Box::new(profile.clone()))
            .ai_provider(make_ai(&mock_server, &ai)?)
            .options(options)
            .build()?;

        let config: AppConfig = serde_json::from_value(serde_json::json!({}))?;
        let app_state = AppState::new(config, enricher);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            search,
            profile,
            ai,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Posts `body` to the profile endpoint.
    pub async fn post_profile(&self, body: &serde_json::Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}/get_profile", self.address))
            .json(body)
            .send()
            .await?)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            // The receiver might already be gone if the server task panicked,
            // so we ignore the result of send.
            let _ = tx.send(());
        }
    }
}
