//! # Profile Endpoint Tests
//!
//! End-to-end tests of `POST /get_profile` against mock providers, plus one
//! run through the real chat-completion client backed by `httpmock`.

mod common;

use anyhow::Result;
use common::TestApp;
use httpmock::Method::POST;
use profilescout::{providers::ai::openai::OpenAiProvider, EnrichOptions};
use profilescout_test_utils::{profile_url, search_payload};
use reqwest::StatusCode;
use serde_json::{json, Value};

fn register_profile(app: &TestApp, participant: &str, profile_id: &str, headline: &str) {
    app.search
        .add_response(participant, search_payload(&[&profile_url(profile_id)]));
    app.profile.add_profile(
        profile_id,
        json!({ "public_id": profile_id, "headline": headline }),
        json!({ "email_address": format!("{profile_id}@example.com") }),
    );
}

async fn results_of(response: reqwest::Response) -> Result<Vec<Value>> {
    assert_eq!(response.status(), StatusCode::OK);
    let mut body: Value = response.json().await?;
    let results = body["results"].take();
    Ok(serde_json::from_value(results)?)
}

#[tokio::test]
async fn test_get_profile_isolates_participant_failures() -> Result<()> {
    let app = TestApp::spawn().await?;

    register_profile(&app, "Ada Lovelace", "ada-lovelace", "Mathematician");
    app.ai.add_response("ada-lovelace", "Basics: Analytical Engine");
    // A result page without any profile URL.
    app.search.add_response(
        "Bob Builder",
        search_payload(&["https://example.com/bob", "https://www.google.de/url?q=bob"]),
    );
    // "Carl Sagan" has no search response, so the search fails.
    // Dora resolves to an id the profile provider does not know.
    app.search.add_response(
        "Dora Explorer",
        search_payload(&[&profile_url("dora-explorer")]),
    );

    let response = app
        .post_profile(&json!({
            "company": "Acme",
            "participants": ["Ada Lovelace", "Bob Builder", "Carl Sagan", "Dora Explorer"],
            "purpose": "intro call"
        }))
        .await?;
    let results = results_of(response).await?;

    assert_eq!(results.len(), 4);
    assert_eq!(
        results[0],
        json!({
            "participant": "Ada Lovelace",
            "profile_id": "ada-lovelace",
            "profile": { "public_id": "ada-lovelace", "headline": "Mathematician" },
            "contact_info": { "email_address": "ada-lovelace@example.com" },
            "chatgpt_info": { "chatgpt_content": "Basics: Analytical Engine" }
        })
    );
    assert_eq!(
        results[1],
        json!({
            "participant": "Bob Builder",
            "error": "No LinkedIn profile found for Bob Builder"
        })
    );
    assert_eq!(
        results[2],
        json!({
            "participant": "Carl Sagan",
            "error": "Failed to search for Carl Sagan"
        })
    );
    assert_eq!(
        results[3],
        json!({
            "participant": "Dora Explorer",
            "error": "Failed to fetch profile information"
        })
    );

    let mut queries = app.search.get_calls();
    queries.sort();
    assert_eq!(
        queries,
        vec![
            "Ada Lovelace Acme LinkedIn",
            "Bob Builder Acme LinkedIn",
            "Carl Sagan Acme LinkedIn",
            "Dora Explorer Acme LinkedIn",
        ]
    );
    // Only the successfully fetched profile reaches the AI provider.
    assert_eq!(app.ai.get_calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_get_profile_accepts_comma_separated_participants() -> Result<()> {
    let app = TestApp::spawn().await?;
    register_profile(&app, "Ada Lovelace", "ada-lovelace", "Mathematician");
    register_profile(&app, "Alan Turing", "alan-turing", "Computer Scientist");
    app.ai.add_response("ada-lovelace", "Ada summary");
    app.ai.add_response("alan-turing", "Alan summary");

    let response = app
        .client
        .post(format!("{}/get_profile/", app.address))
        .json(&json!({
            "company": "Acme",
            "participants": " Ada Lovelace ,Alan Turing,",
            "purpose": "intro call"
        }))
        .send()
        .await?;
    let results = results_of(response).await?;

    let participants: Vec<&str> = results
        .iter()
        .filter_map(|r| r["participant"].as_str())
        .collect();
    assert_eq!(participants, vec!["Ada Lovelace", "Alan Turing"]);
    assert_eq!(results[0]["chatgpt_info"]["chatgpt_content"], "Ada summary");
    assert_eq!(results[1]["chatgpt_info"]["chatgpt_content"], "Alan summary");
    Ok(())
}

#[tokio::test]
async fn test_get_profile_keeps_profile_when_summary_fails() -> Result<()> {
    let app = TestApp::spawn().await?;
    register_profile(&app, "Ada Lovelace", "ada-lovelace", "Mathematician");
    // No AI response is registered, so generation fails.

    let response = app
        .post_profile(&json!({
            "company": "Acme",
            "participants": ["Ada Lovelace"],
            "purpose": "intro call"
        }))
        .await?;
    let results = results_of(response).await?;

    assert_eq!(results[0]["profile_id"], "ada-lovelace");
    assert_eq!(results[0]["profile"]["headline"], "Mathematician");
    assert_eq!(
        results[0]["contact_info"]["email_address"],
        "ada-lovelace@example.com"
    );
    assert_eq!(
        results[0]["chatgpt_info"],
        json!({ "error": "Failed to generate ChatGPT info" })
    );
    Ok(())
}

#[tokio::test]
async fn test_get_profile_preserves_order_under_bounded_concurrency() -> Result<()> {
    let options = EnrichOptions {
        max_concurrency: 2,
        ..EnrichOptions::default()
    };
    let app = TestApp::spawn_with(|_, ai| Ok(Box::new(ai.clone())), options).await?;

    let names: Vec<String> = (0..9).map(|i| format!("Person {i}")).collect();
    for (i, name) in names.iter().enumerate() {
        // Every third participant has no search response.
        if i % 3 != 2 {
            register_profile(&app, name, &format!("person-{i}"), "Engineer");
            app.ai.add_response(&format!("person-{i}"), &format!("summary {i}"));
        }
    }

    let response = app
        .post_profile(&json!({
            "company": "Acme",
            "participants": names,
            "purpose": "intro call"
        }))
        .await?;
    let results = results_of(response).await?;

    assert_eq!(results.len(), names.len());
    for (i, (result, name)) in results.iter().zip(&names).enumerate() {
        assert_eq!(result["participant"], name.as_str());
        if i % 3 == 2 {
            assert_eq!(result["error"], format!("Failed to search for {name}"));
        } else {
            assert_eq!(result["profile_id"], format!("person-{i}"));
            assert_eq!(
                result["chatgpt_info"]["chatgpt_content"],
                format!("summary {i}")
            );
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_get_profile_with_openai_compatible_provider() -> Result<()> {
    let app = TestApp::spawn_with(
        |server, _| {
            let provider = OpenAiProvider::new(
                server.url("/v1/chat/completions"),
                Some("test-key".to_string()),
                "gpt-4o".to_string(),
            )?;
            Ok(Box::new(provider))
        },
        EnrichOptions::default(),
    )
    .await?;
    register_profile(&app, "Ada Lovelace", "ada-lovelace", "Mathematician");

    let completion = app
        .mock_server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer test-key")
                .body_contains("\"model\":\"gpt-4o\"")
                .body_contains("ada-lovelace");
            then.status(200).json_body(json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": "Basics: Mathematician\nTopics: Engines\nNo-gos: None"
                    }
                }]
            }));
        })
        .await;

    let response = app
        .post_profile(&json!({
            "company": "Acme",
            "participants": ["Ada Lovelace"],
            "purpose": "intro call"
        }))
        .await?;
    let results = results_of(response).await?;

    completion.assert_hits_async(1).await;
    assert_eq!(
        results[0]["chatgpt_info"]["chatgpt_content"],
        "Basics: Mathematician\nTopics: Engines\nNo-gos: None"
    );
    Ok(())
}
