use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use glpi_adapter::app::{app, AppState};
use glpi_adapter::config::UpstreamConfig;
use glpi_adapter::fetch::FetchOptions;
use glpi_adapter::glpi::GlpiClient;
use glpi_adapter::services::DirectoryService;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::Value;

pub const USER_TOKEN: &str = "user-token-xyz";
pub const SESSION_TOKEN: &str = "session-123";
pub const APP_TOKEN: &str = "app-456";

/// Adapter served on a free port, talking to a mockito stand-in for GLPI
pub struct TestApp {
    pub base_url: String,
    pub upstream: ServerGuard,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_timeout(5).await
    }

    /// Same as `spawn`, with a custom upstream request timeout
    pub async fn spawn_with_timeout(request_timeout_secs: u64) -> Result<Self> {
        let upstream = mockito::Server::new_async().await;

        let glpi = GlpiClient::new(&UpstreamConfig {
            base_url: upstream.url(),
            user_token: USER_TOKEN.to_string(),
            accept_invalid_certs: false,
            request_timeout_secs,
        })?;
        let directory = DirectoryService::new(Arc::new(glpi), FetchOptions::default(), 2);

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        let router = app(AppState::new(directory), true);
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            upstream,
            client,
        })
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<(reqwest::StatusCode, Value)> {
        let res = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        let status = res.status();
        let body = res.json::<Value>().await?;
        Ok((status, body))
    }

    /// One `POST /search/{item_type}` page for the given range
    pub async fn mock_search_page(&mut self, item_type: &str, range: &str, data: Value, totalcount: u64) -> Mock {
        let body = serde_json::json!({ "totalcount": totalcount, "count": data.as_array().map(Vec::len).unwrap_or(0), "data": data });
        self.upstream
            .mock("POST", format!("/search/{}", item_type).as_str())
            .match_query(Matcher::UrlEncoded("range".into(), range.into()))
            .match_header("Authorization", format!("user_token {}", USER_TOKEN).as_str())
            .match_header("App-Token", APP_TOKEN)
            .match_header("Session-Token", SESSION_TOKEN)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(1)
            .create_async()
            .await
    }
}

pub fn tokens_body() -> Value {
    serde_json::json!({ "sessionToken": SESSION_TOKEN, "AppToken": APP_TOKEN })
}
