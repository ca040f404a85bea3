//! Client for the record status update endpoint.

use crate::config::Config;
use hotspot_common::{RecordId, Status};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum UpdateStatusError {
    /// The request never completed (connect failure, timeout, reset).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The server answered with a non-success status code.
    #[error("server rejected update (HTTP {status})")]
    Rejected { status: u16 },
}

/// Trait for status updates (allows mocking for tests)
#[async_trait::async_trait]
pub trait StatusUpdater: Send + Sync {
    async fn update_status(&self, record_id: RecordId, status: Status)
        -> Result<(), UpdateStatusError>;
}

#[derive(Debug, Serialize)]
struct UpdateStatusBody {
    status: Status,
}

/// Production HTTP implementation
pub struct HttpStatusClient {
    server_url: String,
    http: reqwest::Client,
}

impl HttpStatusClient {
    pub fn new(config: &Config) -> Result<Self, UpdateStatusError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(config.server_base(), http))
    }

    pub fn with_client(server_url: &str, http: reqwest::Client) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn update_status_url(&self, record_id: RecordId) -> String {
        format!(
            "{}/api/server/records/{}/update_status/",
            self.server_url, record_id
        )
    }
}

#[async_trait::async_trait]
impl StatusUpdater for HttpStatusClient {
    async fn update_status(
        &self,
        record_id: RecordId,
        status: Status,
    ) -> Result<(), UpdateStatusError> {
        let url = self.update_status_url(record_id);
        debug!("POST {} status={}", url, status.as_str());

        let resp = self
            .http
            .post(&url)
            .json(&UpdateStatusBody { status })
            .send()
            .await
            .inspect_err(|e| warn!("Status update for record {} failed: {}", record_id, e))?;

        if resp.status().is_success() {
            debug!("Record {} status set to {}", record_id, status.as_str());
            Ok(())
        } else {
            let code = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            warn!(
                "Status update for record {} rejected with HTTP {}: {}",
                record_id, code, body
            );
            Err(UpdateStatusError::Rejected { status: code })
        }
    }
}
