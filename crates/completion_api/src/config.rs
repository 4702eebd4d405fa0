use std::time::Duration;

/// Default chat-completion endpoint.
pub const DEFAULT_COMPLETION_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model identifier sent in the request payload.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Environment variable carrying the bearer token.
pub const API_KEY_ENV_VAR: &str = "DOCDESK_COMPLETION_API_KEY";

/// Transport configuration for completion requests.
#[derive(Debug, Clone)]
pub struct CompletionApiConfig {
    /// Bearer token passed to `Authorization`.
    pub api_key: String,
    /// Full URL of the chat-completion resource.
    pub endpoint: String,
    /// Model identifier sent in the request payload.
    pub model: String,
    /// Optional request timeout.
    pub timeout: Option<Duration>,
}

impl Default for CompletionApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_COMPLETION_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }
}

impl CompletionApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Reads configuration from the environment.
    ///
    /// A missing key is not an error here; it surfaces when a request is
    /// attempted.
    pub fn from_env() -> Self {
        Self::new(std::env::var(API_KEY_ENV_VAR).unwrap_or_default())
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
