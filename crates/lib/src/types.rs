//! # Request and Outcome Types
//!
//! The wire payload accepted by the profile endpoint, the validated request the
//! orchestrator consumes, and the per-participant outcomes it produces.

use crate::errors::ScoutError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Participants as sent by the client: either a list or a comma-separated string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Participants {
    List(Vec<String>),
    Csv(String),
}

impl Participants {
    /// Flattens the payload into an ordered list of names.
    ///
    /// Comma-separated input is split, trimmed, and empty pieces are dropped.
    pub fn into_names(self) -> Vec<String> {
        match self {
            Participants::List(names) => names,
            Participants::Csv(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

/// The raw request body of `POST /get_profile`.
///
/// Every field is optional here so that absence surfaces as
/// [`ScoutError::MissingArgs`] instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub participants: Option<Participants>,
    #[serde(default)]
    pub purpose: Option<String>,
}

impl ProfileRequest {
    /// Checks that all required fields are present.
    pub fn validate(self) -> Result<EnrichmentRequest, ScoutError> {
        let company = self.company.ok_or(ScoutError::MissingArgs("company"))?;
        let participants = self
            .participants
            .ok_or(ScoutError::MissingArgs("participants"))?;
        let purpose = self.purpose.ok_or(ScoutError::MissingArgs("purpose"))?;

        Ok(EnrichmentRequest {
            company,
            participants: participants.into_names(),
            purpose,
        })
    }
}

/// A validated enrichment request.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentRequest {
    pub company: String,
    pub participants: Vec<String>,
    /// Accepted for compatibility; it does not influence the pipeline.
    pub purpose: String,
}

/// A fetched profile together with its contact details.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRecord {
    pub profile_id: String,
    pub profile: Value,
    pub contact_info: Value,
}

/// The result of asking the AI provider for a profile summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Summary {
    Generated { chatgpt_content: String },
    Failed { error: String },
}

impl Summary {
    pub const FAILURE_MESSAGE: &'static str = "Failed to generate ChatGPT info";

    pub fn failed() -> Self {
        Summary::Failed {
            error: Self::FAILURE_MESSAGE.to_string(),
        }
    }
}

/// The pipeline stage a participant was in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Searching,
    Resolving,
    Fetching,
    Summarizing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Searching => "searching",
            Stage::Resolving => "resolving",
            Stage::Fetching => "fetching",
            Stage::Summarizing => "summarizing",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// The terminal result of one participant's pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ParticipantOutcome {
    Found {
        participant: String,
        record: ProfileRecord,
        summary: Summary,
    },
    NotFound {
        participant: String,
    },
    Failed {
        participant: String,
        error: String,
        stage: Stage,
    },
}

impl ParticipantOutcome {
    pub const FETCH_FAILURE_MESSAGE: &'static str = "Failed to fetch profile information";

    pub fn participant(&self) -> &str {
        match self {
            ParticipantOutcome::Found { participant, .. }
            | ParticipantOutcome::NotFound { participant }
            | ParticipantOutcome::Failed { participant, .. } => participant,
        }
    }

    /// The client-facing error message, if this outcome carries one.
    pub fn error_message(&self) -> Option<String> {
        match self {
            ParticipantOutcome::Found { .. } => None,
            ParticipantOutcome::NotFound { participant } => {
                Some(format!("No LinkedIn profile found for {participant}"))
            }
            ParticipantOutcome::Failed { error, .. } => Some(error.clone()),
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum OutcomeWire<'a> {
    Found {
        participant: &'a str,
        profile_id: &'a str,
        profile: &'a Value,
        contact_info: &'a Value,
        chatgpt_info: &'a Summary,
    },
    Error {
        participant: &'a str,
        error: String,
    },
}

impl Serialize for ParticipantOutcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            ParticipantOutcome::Found {
                participant,
                record,
                summary,
            } => OutcomeWire::Found {
                participant,
                profile_id: &record.profile_id,
                profile: &record.profile,
                contact_info: &record.contact_info,
                chatgpt_info: summary,
            },
            other => OutcomeWire::Error {
                participant: other.participant(),
                error: other.error_message().unwrap_or_default(),
            },
        };
        wire.serialize(serializer)
    }
}

/// The response body of `POST /get_profile`, in participant input order.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichmentResponse {
    pub results: Vec<ParticipantOutcome>,
}
