//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for `profilescout-server`.

pub mod general;
pub mod profile;

// Re-export all handlers so the router can reach them under a single `handlers::` path.
pub use general::*;
pub use profile::*;

use super::{errors::AppError, state::AppState};
