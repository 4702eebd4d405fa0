use reqwest::Client;

use crate::config::CompletionApiConfig;
use crate::error::{parse_error_message, CompletionApiError};
use crate::payload::{ChatMessage, ChatRequest, ChatResponse};
use crate::prompt::{analysis_messages, conversion_messages};

/// Substring marking a structured (tabular) analysis response.
pub const STRUCTURE_MARKER: &str = "###";

/// Marker appended to structured responses so the render layer can offer a
/// publish action.
pub const PUBLISH_AFFORDANCE_MARKER: &str = "<publish />";

#[derive(Debug)]
pub struct CompletionApiClient {
    http: Client,
    config: CompletionApiConfig,
}

impl CompletionApiClient {
    pub fn new(config: CompletionApiConfig) -> Result<Self, CompletionApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(CompletionApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CompletionApiConfig {
        &self.config
    }

    /// Builds the POST request for one exchange without sending it.
    ///
    /// A missing API key is detected here, not at construction, so that
    /// configuration absence surfaces only when a call is attempted.
    pub fn build_request(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<reqwest::RequestBuilder, CompletionApiError> {
        let api_key = self.config.api_key.trim();
        if api_key.is_empty() {
            return Err(CompletionApiError::MissingApiKey);
        }

        let payload = ChatRequest::new(self.config.model.clone(), messages);
        Ok(self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&payload))
    }

    /// Performs one request/response exchange.
    ///
    /// In analysis mode (`table_mode == false`) the result gains the publish
    /// affordance marker when it contains the structural marker. Table mode
    /// returns the converted markup untouched.
    pub async fn complete(
        &self,
        text: &str,
        table_mode: bool,
    ) -> Result<String, CompletionApiError> {
        let messages = if table_mode {
            conversion_messages(text)
        } else {
            analysis_messages(text)
        };

        let response = self.build_request(messages)?.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionApiError::Status(
                status,
                parse_error_message(status, &body),
            ));
        }

        let content = response
            .json::<ChatResponse>()
            .await?
            .into_first_content()
            .ok_or(CompletionApiError::EmptyChoices)?;

        if table_mode {
            Ok(content)
        } else {
            Ok(augment_with_publish_affordance(content))
        }
    }
}

/// Appends the publish affordance marker when the response carries tabular
/// structure.
pub fn augment_with_publish_affordance(content: String) -> String {
    if content.contains(STRUCTURE_MARKER) {
        format!("{content}\n\n{PUBLISH_AFFORDANCE_MARKER}")
    } else {
        content
    }
}

/// Splits entry text into display body and publish availability.
pub fn strip_publish_affordance(text: &str) -> (&str, bool) {
    match text.strip_suffix(PUBLISH_AFFORDANCE_MARKER) {
        Some(body) => (body.trim_end(), true),
        None => (text, false),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        augment_with_publish_affordance, strip_publish_affordance, PUBLISH_AFFORDANCE_MARKER,
    };

    #[test]
    fn structured_responses_gain_the_affordance_marker() {
        let augmented = augment_with_publish_affordance("### Imports\n| a |".to_string());
        assert!(augmented.ends_with(PUBLISH_AFFORDANCE_MARKER));
    }

    #[test]
    fn unstructured_responses_pass_through_unchanged() {
        let text = "Please submit javascript code.".to_string();
        assert_eq!(augment_with_publish_affordance(text.clone()), text);
    }

    #[test]
    fn strip_recovers_the_original_body() {
        let augmented = augment_with_publish_affordance("### Imports".to_string());
        let (body, can_publish) = strip_publish_affordance(&augmented);
        assert!(can_publish);
        assert_eq!(body, "### Imports");
    }

    #[test]
    fn strip_reports_plain_text_as_unpublishable() {
        let (body, can_publish) = strip_publish_affordance("plain words");
        assert!(!can_publish);
        assert_eq!(body, "plain words");
    }
}
