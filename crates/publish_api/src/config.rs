use std::time::Duration;

/// Environment variable carrying the wiki base URL. Its presence selects
/// extended mode.
pub const BASE_URL_ENV_VAR: &str = "DOCDESK_WIKI_BASE_URL";

/// Environment variable carrying the target space key.
pub const SPACE_KEY_ENV_VAR: &str = "DOCDESK_WIKI_SPACE_KEY";

/// Environment variable carrying the account username.
pub const USERNAME_ENV_VAR: &str = "DOCDESK_WIKI_USERNAME";

/// Environment variable carrying the account API token.
pub const API_KEY_ENV_VAR: &str = "DOCDESK_WIKI_API_KEY";

/// Transport configuration for wiki content requests.
#[derive(Debug, Clone)]
pub struct PublishApiConfig {
    /// Base URL of the wiki instance, without the REST path.
    pub base_url: String,
    /// Space key new pages are created under.
    pub space_key: String,
    /// Username half of the basic credential pair.
    pub username: String,
    /// API token half of the basic credential pair.
    pub api_token: String,
    /// Optional request timeout.
    pub timeout: Option<Duration>,
}

impl PublishApiConfig {
    pub fn new(base_url: impl Into<String>, space_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            space_key: space_key.into(),
            username: String::new(),
            api_token: String::new(),
            timeout: None,
        }
    }

    /// Reads configuration from the environment.
    ///
    /// Returns `None` when no base URL is set (minimal mode). Missing
    /// credentials are not an error here; they surface when a call is
    /// attempted.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var(BASE_URL_ENV_VAR).ok()?;
        if base_url.trim().is_empty() {
            return None;
        }

        Some(
            Self::new(base_url, std::env::var(SPACE_KEY_ENV_VAR).unwrap_or_default())
                .with_credentials(
                    std::env::var(USERNAME_ENV_VAR).unwrap_or_default(),
                    std::env::var(API_KEY_ENV_VAR).unwrap_or_default(),
                ),
        )
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.api_token = api_token.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
