use std::sync::Arc;

use crate::config::AppConfig;
use crate::fetch::{fetch_all, FetchOptions};
use crate::format::{format_tickets, format_users, FormattedTicket, FormattedUser, UpstreamAuthorResolver};
use crate::glpi::{GlpiClient, ItemType, RawRecord, SessionCredentials, Upstream, UpstreamError};
use crate::services::ServiceError;

/// Request-scoped operations over the GLPI directory. Holds no per-user state.
#[derive(Clone)]
pub struct DirectoryService {
    upstream: Arc<dyn Upstream>,
    fetch: FetchOptions,
    author_lookup_concurrency: usize,
}

impl DirectoryService {
    pub fn new(upstream: Arc<dyn Upstream>, fetch: FetchOptions, author_lookup_concurrency: usize) -> Self {
        Self {
            upstream,
            fetch,
            author_lookup_concurrency: author_lookup_concurrency.max(1),
        }
    }

    /// Build the service against the configured GLPI instance
    pub fn from_config(config: &AppConfig) -> Result<Self, UpstreamError> {
        let client = GlpiClient::new(&config.upstream)?;
        Ok(Self::new(
            Arc::new(client),
            FetchOptions::from(&config.fetch),
            config.fetch.author_lookup_concurrency,
        ))
    }

    /// Validate caller tokens; empty strings count as missing
    pub fn credentials(
        session_token: Option<&str>,
        app_token: Option<&str>,
    ) -> Result<SessionCredentials, ServiceError> {
        match (non_empty(session_token), non_empty(app_token)) {
            (Some(session), Some(app)) => Ok(SessionCredentials::new(session, app)),
            (session, app) => {
                let mut missing = Vec::new();
                if session.is_none() {
                    missing.push("sessionToken");
                }
                if app.is_none() {
                    missing.push("AppToken");
                }
                Err(ServiceError::Validation {
                    message: "Session-Token e App-Token são necessários".to_string(),
                    missing,
                })
            }
        }
    }

    /// Open a GLPI session with the caller's authorization header value
    pub async fn open_session(
        &self,
        authorization: Option<&str>,
        app_token: Option<&str>,
    ) -> Result<String, ServiceError> {
        let (authorization, app_token) = match (non_empty(authorization), non_empty(app_token)) {
            (Some(authorization), Some(app_token)) => (authorization, app_token),
            (authorization, app_token) => {
                let mut missing = Vec::new();
                if authorization.is_none() {
                    missing.push("Authorization");
                }
                if app_token.is_none() {
                    missing.push("AppToken");
                }
                return Err(ServiceError::Validation {
                    message: "Authorization e App-Token são necessários".to_string(),
                    missing,
                });
            }
        };

        let token = self
            .upstream
            .init_session(authorization, app_token)
            .await
            .map_err(|e| ServiceError::upstream("Erro ao iniciar sessão", e))?;
        tracing::info!("GLPI session opened");
        Ok(token)
    }

    /// Every record of `item_type`, untransformed
    pub async fn fetch_raw(
        &self,
        item_type: &ItemType,
        credentials: &SessionCredentials,
    ) -> Result<Vec<RawRecord>, UpstreamError> {
        fetch_all(self.upstream.as_ref(), item_type, credentials, &self.fetch).await
    }

    pub async fn list_users(&self, credentials: &SessionCredentials) -> Result<Vec<FormattedUser>, ServiceError> {
        let raw = self
            .fetch_raw(&ItemType::User, credentials)
            .await
            .map_err(|e| ServiceError::upstream("Erro ao buscar dados dos usuários", e))?;
        if raw.is_empty() {
            return Err(ServiceError::NotFound("Nenhum usuário encontrado".to_string()));
        }

        let users = format_users(&raw);
        if users.is_empty() {
            return Err(ServiceError::NotFound("Nenhum usuário válido encontrado".to_string()));
        }

        tracing::info!("Listed {} of {} users", users.len(), raw.len());
        Ok(users)
    }

    pub async fn list_tickets(&self, credentials: &SessionCredentials) -> Result<Vec<FormattedTicket>, ServiceError> {
        let raw = self
            .fetch_raw(&ItemType::Ticket, credentials)
            .await
            .map_err(|e| ServiceError::upstream("Erro ao buscar dados dos tickets", e))?;
        if raw.is_empty() {
            return Err(ServiceError::NotFound("Nenhum ticket encontrado".to_string()));
        }

        let resolver = UpstreamAuthorResolver::new(self.upstream.as_ref(), credentials);
        let tickets = format_tickets(&raw, &resolver, self.author_lookup_concurrency).await;

        tracing::info!("Listed {} tickets", tickets.len());
        Ok(tickets)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glpi::{SearchPage, Window};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    /// Single-page upstream with canned records and users
    struct CannedUpstream {
        records: Vec<Value>,
        users: Value,
    }

    #[async_trait]
    impl Upstream for CannedUpstream {
        async fn init_session(&self, authorization: &str, _: &str) -> Result<String, UpstreamError> {
            if authorization == "user_token good" {
                Ok("session-123".to_string())
            } else {
                Err(UpstreamError::Status {
                    status: 401,
                    detail: json!(["ERROR_LOGIN_PARAMETERS_MISSING"]),
                })
            }
        }

        async fn search(&self, _: &ItemType, _: Window, _: &SessionCredentials) -> Result<SearchPage, UpstreamError> {
            Ok(SearchPage {
                data: self
                    .records
                    .iter()
                    .map(|r| serde_json::from_value(r.clone()).unwrap())
                    .collect(),
                totalcount: self.records.len() as u64,
            })
        }

        async fn get_item(&self, _: &ItemType, id: &str, _: &SessionCredentials) -> Result<Value, UpstreamError> {
            self.users.get(id).cloned().ok_or(UpstreamError::Status {
                status: 404,
                detail: json!(["ERROR_ITEM_NOT_FOUND"]),
            })
        }
    }

    fn service(records: Vec<Value>) -> DirectoryService {
        let upstream = CannedUpstream {
            records,
            users: json!({ "7": { "firstname": "Ana", "realname": "Silva" } }),
        };
        DirectoryService::new(Arc::new(upstream), FetchOptions::default(), 1)
    }

    fn creds() -> SessionCredentials {
        SessionCredentials::new("session", "app")
    }

    #[test]
    fn credentials_report_missing_fields() {
        let err = DirectoryService::credentials(Some(""), None).unwrap_err();
        match err {
            ServiceError::Validation { missing, .. } => assert_eq!(missing, vec!["sessionToken", "AppToken"]),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(DirectoryService::credentials(Some("s"), Some("a")).is_ok());
    }

    #[tokio::test]
    async fn open_session_requires_both_values() {
        let svc = service(vec![]);
        assert!(matches!(
            svc.open_session(None, Some("app")).await,
            Err(ServiceError::Validation { .. })
        ));
        assert_eq!(svc.open_session(Some("user_token good"), Some("app")).await.unwrap(), "session-123");
        assert!(matches!(
            svc.open_session(Some("user_token bad"), Some("app")).await,
            Err(ServiceError::Upstream { .. })
        ));
    }

    #[tokio::test]
    async fn no_users_is_not_found() {
        let err = service(vec![]).list_users(&creds()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(msg) if msg == "Nenhum usuário encontrado"));
    }

    #[tokio::test]
    async fn no_valid_users_is_not_found() {
        let err = service(vec![json!({ "9": "Ana" })]).list_users(&creds()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(msg) if msg == "Nenhum usuário válido encontrado"));
    }

    #[tokio::test]
    async fn tickets_resolve_authors_through_upstream() {
        let svc = service(vec![
            json!({ "id": 1, "1": "Printer jam", "4": 7, "12": 5, "19": "2024-01-01 09:00:00" }),
            json!({ "id": 2, "1": "VPN down", "4": 99, "12": 1, "19": "2024-02-01 09:00:00" }),
        ]);
        let tickets = svc.list_tickets(&creds()).await.unwrap();
        assert_eq!(tickets[0].id, Some(json!(2)));
        assert_eq!(tickets[0].autor, "Desconhecido");
        assert_eq!(tickets[1].autor, "Ana Silva");
        assert_eq!(tickets[1].status, "Solucionado");
    }
}
