pub mod openai;

use crate::errors::ScoutError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a chat-completion provider.
///
/// The pipeline only needs a single completion per profile, so the interface is a
/// system prompt and a user prompt in, generated text out.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, ScoutError>;
}

dyn_clone::clone_trait_object!(AiProvider);
