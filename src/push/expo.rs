//! Expo push service client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;

use super::PushGateway;
use crate::domain::PushMessage;
use crate::error::NotifierError;

/// Default Expo push endpoint.
pub const EXPO_PUSH_URL: &str = "https://exp.host/--/api/v2/push/send";

/// [`PushGateway`] that POSTs a JSON array of messages to the Expo push
/// API.
#[derive(Debug, Clone)]
pub struct ExpoPushGateway {
    client: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
}

impl ExpoPushGateway {
    /// Creates a gateway for `endpoint`.
    ///
    /// `access_token` is sent as a bearer token when the Expo project has
    /// enhanced push security enabled.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::Internal`] if the HTTP client cannot be
    /// built.
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        access_token: Option<String>,
    ) -> Result<Self, NotifierError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("campus-notifier/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NotifierError::Internal(format!("push client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            access_token,
        })
    }
}

#[async_trait]
impl PushGateway for ExpoPushGateway {
    async fn send(&self, messages: &[PushMessage]) -> Result<(), NotifierError> {
        if messages.is_empty() {
            return Ok(());
        }

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(messages);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                NotifierError::Dispatch("push gateway timed out".to_string())
            } else {
                NotifierError::Dispatch(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(NotifierError::Dispatch(format!(
                "push gateway returned HTTP {status}: {body}"
            )));
        }

        tracing::debug!(count = messages.len(), response = %body, "push gateway response");
        Ok(())
    }
}
