//! Onboarding submission client

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::error::SubmissionError;
use crate::config::SubmissionConfig;
use crate::wizard::FormState;

/// Sends a completed form snapshot to the onboarding backend
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// POST the snapshot. Any 2xx response is success.
    async fn submit(&self, form: &FormState) -> Result<(), SubmissionError>;
}

/// reqwest-backed client posting JSON to the configured endpoint
pub struct HttpSubmissionClient {
    endpoint: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpSubmissionClient {
    pub fn new(config: &SubmissionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit(&self, form: &FormState) -> Result<(), SubmissionError> {
        tracing::info!(endpoint = %self.endpoint, fields = form.len(), "Submitting onboarding");

        let response = self
            .client
            .post(&self.endpoint)
            .json(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    SubmissionError::encode(e.to_string())
                } else if e.is_timeout() {
                    SubmissionError::timeout(self.timeout_secs)
                } else {
                    SubmissionError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(status = status.as_u16(), "Onboarding submitted");
            return Ok(());
        }

        let status_text = status.canonical_reason().unwrap_or("Unknown");
        let body = response.text().await.unwrap_or_default();
        let err = SubmissionError::from_response(status.as_u16(), status_text, &body);
        tracing::warn!(status = status.as_u16(), error = %err, "Onboarding submission rejected");
        Err(err)
    }
}

/// Client that records what it was asked to send, for tests and dry runs
#[derive(Default)]
pub struct RecordingSubmissionClient {
    submitted: std::sync::Mutex<Vec<FormState>>,
    fail_with: std::sync::Mutex<Option<SubmissionError>>,
}

impl RecordingSubmissionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next submission fail with `err`
    pub fn fail_next(&self, err: SubmissionError) {
        if let Ok(mut slot) = self.fail_with.lock() {
            *slot = Some(err);
        }
    }

    pub fn submitted(&self) -> Vec<FormState> {
        self.submitted
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SubmissionClient for RecordingSubmissionClient {
    async fn submit(&self, form: &FormState) -> Result<(), SubmissionError> {
        if let Some(err) = self.fail_with.lock().ok().and_then(|mut s| s.take()) {
            return Err(err);
        }
        if let Ok(mut submitted) = self.submitted.lock() {
            submitted.push(form.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_uses_configured_endpoint() {
        let config = SubmissionConfig {
            endpoint: "http://127.0.0.1:9/api/onboarding/brand".to_string(),
            timeout_secs: 5,
            user_agent: "onboard-test".to_string(),
        };
        let client = HttpSubmissionClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/api/onboarding/brand");
    }

    #[tokio::test]
    async fn test_recording_client_fails_once() {
        let client = RecordingSubmissionClient::new();
        client.fail_next(SubmissionError::network("down"));

        let form = FormState::new();
        assert!(client.submit(&form).await.is_err());
        assert!(client.submit(&form).await.is_ok());
        assert_eq!(client.submitted().len(), 1);
    }
}
