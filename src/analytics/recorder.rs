//! The search recorder seam

use super::counter::SearchCountStore;
use super::webhook::WebhookRecorder;
use crate::config::AnalyticsConfig;
use crate::error::{AnalyticsError, Result};
use crate::types::Movie;
use async_trait::async_trait;
use std::sync::Arc;

/// Records a search term together with its first result
#[async_trait]
pub trait SearchRecorder: Send + Sync {
    /// Record one search
    async fn record(
        &self,
        search_term: &str,
        movie: &Movie,
    ) -> std::result::Result<(), AnalyticsError>;
}

/// Recorder that drops every search
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

#[async_trait]
impl SearchRecorder for NoopRecorder {
    async fn record(
        &self,
        _search_term: &str,
        _movie: &Movie,
    ) -> std::result::Result<(), AnalyticsError> {
        Ok(())
    }
}

/// Build the recorder selected by the analytics config
pub async fn recorder_from_config(config: &AnalyticsConfig) -> Result<Arc<dyn SearchRecorder>> {
    let recorder: Arc<dyn SearchRecorder> = match config {
        AnalyticsConfig::None => Arc::new(NoopRecorder),
        AnalyticsConfig::File { path } => Arc::new(SearchCountStore::open(path).await?),
        AnalyticsConfig::Webhook { url } => Arc::new(WebhookRecorder::new(url)?),
    };
    Ok(recorder)
}
