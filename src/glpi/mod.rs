pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;
use serde_json::Value;

pub use client::GlpiClient;
pub use error::UpstreamError;
pub use types::{ItemType, RawRecord, SearchPage, SessionCredentials, Window};

/// Operations the adapter needs from the remote GLPI service
#[async_trait]
pub trait Upstream: Send + Sync {
    /// `POST /initSession`, returns the new session token
    async fn init_session(&self, authorization: &str, app_token: &str) -> Result<String, UpstreamError>;

    /// `POST /search/{itemType}?range=start-end`
    async fn search(
        &self,
        item_type: &ItemType,
        window: Window,
        credentials: &SessionCredentials,
    ) -> Result<SearchPage, UpstreamError>;

    /// `GET /{itemType}/{id}`
    async fn get_item(
        &self,
        item_type: &ItemType,
        id: &str,
        credentials: &SessionCredentials,
    ) -> Result<Value, UpstreamError>;
}
