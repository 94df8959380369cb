#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Tracing setup and registration helpers on top of the shared mock providers.

use dotenvy::dotenv;
use profilescout_test_utils::{profile_url, search_payload, MockProfileProvider, MockSearchProvider};
use serde_json::json;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Makes `participant` resolve to `profile_id` with a profile and contact record.
pub fn register_profile(
    search: &MockSearchProvider,
    profile: &MockProfileProvider,
    participant: &str,
    profile_id: &str,
) {
    search.add_response(participant, search_payload(&[&profile_url(profile_id)]));
    profile.add_profile(
        profile_id,
        json!({ "public_id": profile_id, "headline": format!("Headline of {profile_id}") }),
        json!({ "email_address": format!("{profile_id}@example.com") }),
    );
}
