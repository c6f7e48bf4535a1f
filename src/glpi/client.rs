use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};
use url::Url;

use super::{ItemType, SearchPage, SessionCredentials, Upstream, UpstreamError, Window};
use crate::config::UpstreamConfig;

/// reqwest-backed GLPI REST client
#[derive(Debug, Clone)]
pub struct GlpiClient {
    http: Client,
    base_url: String,
    user_token: String,
}

impl GlpiClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let parsed = Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(UpstreamError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                config.base_url,
                parsed.scheme()
            )));
        }

        if config.accept_invalid_certs {
            tracing::warn!(
                "TLS certificate verification is DISABLED for {} (GLPI_ACCEPT_INVALID_CERTS)",
                config.base_url
            );
        }

        let http = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_token: config.user_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn with_session(request: RequestBuilder, credentials: &SessionCredentials) -> RequestBuilder {
        request
            .header("App-Token", &credentials.app_token)
            .header("Session-Token", &credentials.session_token)
    }

    /// Turns non-2xx responses into `UpstreamError::Status` carrying the body, then decodes JSON
    async fn read_json(response: Response) -> Result<Value, UpstreamError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<Value>(&body).unwrap_or_else(|_| Value::String(body));
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Upstream for GlpiClient {
    async fn init_session(&self, authorization: &str, app_token: &str) -> Result<String, UpstreamError> {
        let response = self
            .http
            .post(self.url("initSession"))
            .header("Authorization", authorization)
            .header("App-Token", app_token)
            .json(&json!({}))
            .send()
            .await?;

        let body = Self::read_json(response).await?;
        body.get("session_token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| UpstreamError::Decode("initSession response has no session_token".into()))
    }

    async fn search(
        &self,
        item_type: &ItemType,
        window: Window,
        credentials: &SessionCredentials,
    ) -> Result<SearchPage, UpstreamError> {
        let request = self
            .http
            .post(self.url(&format!("search/{}", item_type)))
            .header("Authorization", format!("user_token {}", self.user_token))
            .query(&[("range", window.to_range())]);

        let response = Self::with_session(request, credentials).send().await?;
        let body = Self::read_json(response).await?;
        if body.is_null() {
            return Ok(SearchPage::default());
        }
        serde_json::from_value(body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }

    async fn get_item(
        &self,
        item_type: &ItemType,
        id: &str,
        credentials: &SessionCredentials,
    ) -> Result<Value, UpstreamError> {
        let request = self.http.get(self.url(&format!("{}/{}", item_type, id)));
        let response = Self::with_session(request, credentials).send().await?;
        Self::read_json(response).await
    }
}
