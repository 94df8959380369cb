//! # External Providers
//!
//! Traits and HTTP implementations for the three remote services the pipeline
//! talks to: web search, profile data, and chat completion.

pub mod ai;
pub mod profile;
pub mod search;
