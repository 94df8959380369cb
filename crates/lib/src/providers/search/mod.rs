pub mod oxylabs;

use crate::errors::ScoutError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde_json::Value;
use std::fmt::Debug;

/// A single web search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub pages: u32,
    pub limit: u32,
}

/// A trait for web search backends.
///
/// Implementations return the decoded response body untouched; interpreting it
/// is left to [`crate::extract`].
#[async_trait]
pub trait SearchProvider: Send + Sync + Debug + DynClone {
    async fn search(&self, query: &SearchQuery) -> Result<Value, ScoutError>;
}

dyn_clone::clone_trait_object!(SearchProvider);
