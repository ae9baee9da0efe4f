//! Webhook recorder
//!
//! Sends each search as a JSON POST to an external analytics endpoint.

use super::recorder::SearchRecorder;
use crate::error::{AnalyticsError, Error, Result};
use crate::types::Movie;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Body of a webhook call
#[derive(Debug, Clone, Serialize)]
pub struct SearchEvent<'a> {
    pub search_term: &'a str,
    pub movie: &'a Movie,
}

/// Recorder that POSTs searches to a URL
#[derive(Debug, Clone)]
pub struct WebhookRecorder {
    client: Client,
    url: Url,
}

impl WebhookRecorder {
    /// Create a recorder for the given endpoint
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::config(format!("Failed to build webhook client: {e}")))?;
        Ok(Self { client, url })
    }

    /// Endpoint searches are sent to
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl SearchRecorder for WebhookRecorder {
    async fn record(
        &self,
        search_term: &str,
        movie: &Movie,
    ) -> std::result::Result<(), AnalyticsError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&SearchEvent { search_term, movie })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyticsError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
