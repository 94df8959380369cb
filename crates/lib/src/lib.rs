//! # Participant Profile Enrichment
//!
//! This crate locates the professional profiles of meeting participants and
//! enriches them: a web search finds candidate profile URLs, the first profile
//! identifier among them is fetched from the profile provider together with its
//! contact details, and an AI provider writes a short summary of the result.
//!
//! All three external services sit behind traits in [`providers`], so the
//! [`Enricher`] can be assembled from real HTTP clients or from test doubles.

pub mod enrich;
pub mod errors;
pub mod extract;
pub mod prompts;
pub mod providers;
pub mod types;

pub use enrich::{EnrichOptions, Enricher, EnricherBuilder};
pub use errors::ScoutError;
pub use types::{
    EnrichmentRequest, EnrichmentResponse, ParticipantOutcome, Participants, ProfileRecord,
    ProfileRequest, Stage, Summary,
};
