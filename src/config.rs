//! Environment-driven application configuration.
//!
//! Absence of a value is never validated up front; a missing key or
//! credential surfaces when the corresponding call is attempted.

use completion_api::CompletionApiConfig;
use publish_api::PublishApiConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub completion: CompletionApiConfig,
    /// Present only when a wiki base URL is configured.
    pub publish: Option<PublishApiConfig>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            completion: CompletionApiConfig::from_env(),
            publish: PublishApiConfig::from_env(),
        }
    }

    /// Extended mode adds the publish flow and rich markdown rendering.
    pub fn extended_mode(&self) -> bool {
        self.publish.is_some()
    }
}
