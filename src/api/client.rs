//! HTTP client for the chat/lead service.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

use super::types::{
    ChatRequest, ChatResponse, ConfigResponse, LeadResponse, LeadSubmission, WidgetSettings,
};

pub const CONFIG_PATH: &str = "/api/config";
pub const CHAT_PATH: &str = "/api/chat";
pub const LEAD_PATH: &str = "/api/lead";

/// The three service calls the widget makes.
///
/// Implementations report `success: false` as [`ApiError::Rejected`], so a
/// returned `Ok` always carries a successful reply.
#[async_trait]
pub trait LeadApi: Send + Sync {
    /// Fetch the tenant's widget settings.
    async fn fetch_settings(&self, client_id: &str) -> Result<WidgetSettings, ApiError>;

    /// Send one chat turn.
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError>;

    /// Submit a collected lead.
    async fn submit_lead(&self, lead: &LeadSubmission) -> Result<LeadResponse, ApiError>;
}

/// [`LeadApi`] over HTTP/JSON with reqwest.
pub struct HttpLeadApi {
    api_base: String,
    client: reqwest::Client,
}

impl HttpLeadApi {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self::with_client(api_base, reqwest::Client::new())
    }

    /// Use a preconfigured reqwest client (proxies, default headers, ...).
    ///
    /// Trailing slashes on `api_base` are dropped here, so configuration can
    /// pass the value through as written.
    pub fn with_client(api_base: impl Into<String>, client: reqwest::Client) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { api_base, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    /// Decode a response body, turning error statuses into `Rejected` when the
    /// service explained itself and `Status` otherwise.
    async fn read_json<T: DeserializeOwned>(
        endpoint: &str,
        resp: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = resp.status();
        let body = resp.text().await.map_err(|e| ApiError::Transport {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        if !status.is_success() {
            let reason = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from));
            tracing::warn!(endpoint, status = status.as_u16(), "Service returned error status");
            return Err(match reason {
                Some(reason) => ApiError::Rejected {
                    endpoint: endpoint.to_string(),
                    reason,
                },
                None => ApiError::Status {
                    endpoint: endpoint.to_string(),
                    status: status.as_u16(),
                },
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                endpoint: path.to_string(),
                reason: e.to_string(),
            })?;
        Self::read_json(path, resp).await
    }
}

fn rejected(endpoint: &str, error: Option<String>) -> ApiError {
    ApiError::Rejected {
        endpoint: endpoint.to_string(),
        reason: error.unwrap_or_else(|| "success: false".to_string()),
    }
}

#[async_trait]
impl LeadApi for HttpLeadApi {
    async fn fetch_settings(&self, client_id: &str) -> Result<WidgetSettings, ApiError> {
        let resp = self
            .client
            .get(self.url(CONFIG_PATH))
            .query(&[("client_id", client_id)])
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                endpoint: CONFIG_PATH.to_string(),
                reason: e.to_string(),
            })?;
        let parsed: ConfigResponse = Self::read_json(CONFIG_PATH, resp).await?;
        match (parsed.success, parsed.config) {
            (true, Some(settings)) => Ok(settings),
            (true, None) => Ok(WidgetSettings::default()),
            (false, _) => Err(rejected(CONFIG_PATH, parsed.error)),
        }
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        let parsed: ChatResponse = self.post_json(CHAT_PATH, request).await?;
        if !parsed.success {
            return Err(rejected(CHAT_PATH, parsed.error));
        }
        Ok(parsed)
    }

    async fn submit_lead(&self, lead: &LeadSubmission) -> Result<LeadResponse, ApiError> {
        let parsed: LeadResponse = self.post_json(LEAD_PATH, lead).await?;
        if !parsed.success {
            return Err(rejected(LEAD_PATH, parsed.error));
        }
        Ok(parsed)
    }
}
