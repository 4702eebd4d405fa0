//! Transport-only wiki content client primitives.
//!
//! This crate owns the payload shape and request/response exchange for
//! creating pages in an external Confluence-style content store. It contains
//! no transcript state and no markup conversion; callers hand it finished
//! storage markup.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;

pub use client::PublishApiClient;
pub use config::PublishApiConfig;
pub use error::PublishApiError;
pub use payload::{PageRequest, ANCESTOR_PAGE_ID};
