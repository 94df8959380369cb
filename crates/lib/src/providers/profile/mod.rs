pub mod cookies;
pub mod linkedin;

use crate::errors::ScoutError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde_json::Value;
use std::fmt::Debug;

/// A trait for professional-profile data sources.
///
/// Both calls take the public profile identifier resolved from search results.
#[async_trait]
pub trait ProfileProvider: Send + Sync + Debug + DynClone {
    async fn get_profile(&self, profile_id: &str) -> Result<Value, ScoutError>;

    async fn get_contact_info(&self, profile_id: &str) -> Result<Value, ScoutError>;
}

dyn_clone::clone_trait_object!(ProfileProvider);
