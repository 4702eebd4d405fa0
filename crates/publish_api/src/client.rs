use base64::{engine::general_purpose, Engine as _};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;

use crate::config::PublishApiConfig;
use crate::error::{parse_error_message, PublishApiError};
use crate::payload::PageRequest;

const CONTENT_PATH: &str = "/rest/api/content";

#[derive(Debug)]
pub struct PublishApiClient {
    http: Client,
    config: PublishApiConfig,
}

impl PublishApiClient {
    pub fn new(config: PublishApiConfig) -> Result<Self, PublishApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(PublishApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &PublishApiConfig {
        &self.config
    }

    pub fn content_endpoint(&self) -> String {
        format!("{}{CONTENT_PATH}", self.config.base_url.trim_end_matches('/'))
    }

    fn basic_credentials(&self) -> Result<String, PublishApiError> {
        let username = self.config.username.trim();
        let api_token = self.config.api_token.trim();
        if username.is_empty() || api_token.is_empty() {
            return Err(PublishApiError::MissingCredentials);
        }

        Ok(general_purpose::STANDARD.encode(format!("{username}:{api_token}")))
    }

    /// Builds the page-creation request without sending it.
    ///
    /// An empty title and missing credentials are rejected here, before any
    /// network work happens.
    pub fn build_request(
        &self,
        title: &str,
        body_markup: &str,
    ) -> Result<reqwest::RequestBuilder, PublishApiError> {
        if title.trim().is_empty() {
            return Err(PublishApiError::EmptyTitle);
        }
        let credentials = self.basic_credentials()?;

        let payload = PageRequest::page(title, &self.config.space_key, body_markup);
        Ok(self
            .http
            .post(self.content_endpoint())
            .header(AUTHORIZATION, format!("Basic {credentials}"))
            .json(&payload))
    }

    /// Performs one page-creation exchange.
    ///
    /// Non-success statuses carry the store's message; a duplicate title is
    /// the usual cause of a 400 but is not distinguished programmatically.
    pub async fn create_page(
        &self,
        title: &str,
        body_markup: &str,
    ) -> Result<(), PublishApiError> {
        let response = self.build_request(title, body_markup)?.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(PublishApiError::Status(
            status,
            parse_error_message(status, &body),
        ))
    }
}
