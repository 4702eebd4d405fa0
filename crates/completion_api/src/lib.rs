//! Transport-only chat-completion client primitives.
//!
//! This crate owns prompt construction and the request/response exchange with
//! the external completion endpoint. It intentionally contains no transcript
//! state and no UI coupling; callers decide how failures surface.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod prompt;

pub use client::{
    augment_with_publish_affordance, strip_publish_affordance, CompletionApiClient,
    PUBLISH_AFFORDANCE_MARKER, STRUCTURE_MARKER,
};
pub use config::CompletionApiConfig;
pub use error::CompletionApiError;
pub use payload::{ChatMessage, ChatRequest, ChatResponse};
