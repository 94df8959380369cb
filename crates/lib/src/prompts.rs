//! # Default Prompts
//!
//! Prompt templates for the profile summary task. Both can be overridden from
//! the server configuration.

pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// `{profile}` is replaced with the pretty-printed profile JSON.
pub const SUMMARY_USER_PROMPT: &str = "Please generate a profile summary using the following data. Include sections for Basics, Topics, and No-gos. \n{profile}";

/// Fills the `{profile}` placeholder of a summary template.
pub fn render_summary_prompt(template: &str, profile: &str) -> String {
    template.replace("{profile}", profile)
}
