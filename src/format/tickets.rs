use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::ticket;
use crate::glpi::{ItemType, RawRecord, SessionCredentials, Upstream, UpstreamError};

/// Label used when a status code or author cannot be resolved
pub const UNKNOWN: &str = "Desconhecido";

/// Ticket lifecycle as reported in search option 12
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    New,
    Assigned,
    Planned,
    Pending,
    Solved,
    Closed,
    Unknown,
}

impl TicketStatus {
    pub fn from_code(code: Option<&Value>) -> Self {
        let code = match code {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        match code {
            Some(1) => TicketStatus::New,
            Some(2) => TicketStatus::Assigned,
            Some(3) => TicketStatus::Planned,
            Some(4) => TicketStatus::Pending,
            Some(5) => TicketStatus::Solved,
            Some(6) => TicketStatus::Closed,
            _ => TicketStatus::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::New => "Novo",
            TicketStatus::Assigned => "Em atendimento (atribuído)",
            TicketStatus::Planned => "Em atendimento (planejado)",
            TicketStatus::Pending => "Pendente",
            TicketStatus::Solved => "Solucionado",
            TicketStatus::Closed => "Fechado",
            TicketStatus::Unknown => UNKNOWN,
        }
    }
}

/// Looks up the display name of a ticket author
#[async_trait]
pub trait AuthorResolver: Send + Sync {
    async fn resolve(&self, user_id: &Value) -> Result<String, UpstreamError>;
}

/// Resolves authors with `GET /User/{id}` using the caller's session
pub struct UpstreamAuthorResolver<'a, U: ?Sized> {
    upstream: &'a U,
    credentials: &'a SessionCredentials,
}

impl<'a, U: Upstream + ?Sized> UpstreamAuthorResolver<'a, U> {
    pub fn new(upstream: &'a U, credentials: &'a SessionCredentials) -> Self {
        Self { upstream, credentials }
    }
}

#[async_trait]
impl<'a, U: Upstream + ?Sized> AuthorResolver for UpstreamAuthorResolver<'a, U> {
    async fn resolve(&self, user_id: &Value) -> Result<String, UpstreamError> {
        let id = match user_id {
            Value::Number(n) => n.to_string(),
            Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
            other => return Err(UpstreamError::Decode(format!("ticket has no usable author id: {}", other))),
        };

        let user = self.upstream.get_item(&ItemType::User, &id, self.credentials).await?;
        let part = |key: &str| user.get(key).and_then(Value::as_str).unwrap_or("").trim().to_string();
        let name = format!("{} {}", part("firstname"), part("realname"));
        let name = name.trim();
        if name.is_empty() {
            return Ok(UNKNOWN.to_string());
        }
        Ok(name.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedTicket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titulo: Option<Value>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grupo_responsavel: Option<Value>,
    pub autor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_criacao: Option<Value>,
}

impl FormattedTicket {
    fn from_raw(raw: &RawRecord, autor: String) -> Self {
        Self {
            id: raw.get(ticket::ID).cloned(),
            titulo: raw.get(ticket::TITULO).cloned(),
            status: TicketStatus::from_code(raw.get(ticket::STATUS)).label().to_string(),
            grupo_responsavel: raw.get(ticket::GRUPO_RESPONSAVEL).cloned(),
            autor,
            data_criacao: raw.get(ticket::DATA_CRIACAO).cloned(),
        }
    }

    /// Parsed creation time; `None` orders before every real date
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        self.data_criacao.as_ref().and_then(Value::as_str).and_then(parse_timestamp)
    }
}

/// Accepts the GLPI `YYYY-MM-DD HH:MM:SS` form, ISO 8601 / RFC 3339 and bare dates.
/// Offsets are normalised to UTC.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Resolve authors, decode statuses and order tickets newest first.
///
/// Up to `concurrency` author lookups run at once; results keep input order before
/// the final sort. A failed lookup only affects its own ticket.
pub async fn format_tickets<R>(raw: &[RawRecord], resolver: &R, concurrency: usize) -> Vec<FormattedTicket>
where
    R: AuthorResolver + ?Sized,
{
    // Futures are built up front so the stream does not hold the iterator's borrow
    let lookups: Vec<_> = raw
        .iter()
        .map(|record| async move {
            let author_id = record.get(ticket::AUTOR).cloned().unwrap_or(Value::Null);
            let autor = match resolver.resolve(&author_id).await {
                Ok(name) => name,
                Err(e) => {
                    tracing::warn!("Could not resolve author {} of ticket {:?}: {}", author_id, record.get(ticket::ID), e);
                    UNKNOWN.to_string()
                }
            };
            FormattedTicket::from_raw(record, autor)
        })
        .collect();

    let mut tickets: Vec<FormattedTicket> = stream::iter(lookups)
        .buffered(concurrency.max(1))
        .collect()
        .await;

    tickets.sort_by_cached_key(|t| Reverse(t.created_at()));
    tickets
}
