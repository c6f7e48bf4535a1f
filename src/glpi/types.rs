use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Per-request tokens supplied by the caller. Never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    pub session_token: String,
    pub app_token: String,
}

impl SessionCredentials {
    pub fn new(session_token: impl Into<String>, app_token: impl Into<String>) -> Self {
        Self {
            session_token: session_token.into(),
            app_token: app_token.into(),
        }
    }
}

// Tokens stay out of logs
impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("session_token", &"<redacted>")
            .field("app_token", &"<redacted>")
            .finish()
    }
}

/// Upstream collection selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemType {
    User,
    Ticket,
    Other(String),
}

impl ItemType {
    pub fn as_str(&self) -> &str {
        match self {
            ItemType::User => "User",
            ItemType::Ticket => "Ticket",
            ItemType::Other(name) => name,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!("invalid item type '{}'", s));
        }
        Ok(match s {
            "User" => ItemType::User,
            "Ticket" => ItemType::Ticket,
            other => ItemType::Other(other.to_string()),
        })
    }
}

/// Inclusive index range requested for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: u64,
    pub end: u64,
}

impl Window {
    pub fn first(page_size: u64) -> Self {
        Self {
            start: 0,
            end: page_size.max(1) - 1,
        }
    }

    pub fn next(self) -> Self {
        let size = self.end - self.start + 1;
        let start = self.end + 1;
        Self {
            start,
            end: start + size - 1,
        }
    }

    /// True once this window reaches the last valid index of a collection of `total` records
    pub fn covers(&self, total: u64) -> bool {
        self.end + 1 >= total
    }

    /// Value of the `range` query parameter
    pub fn to_range(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

/// Upstream object keyed by numeric field ID (as string), shape owned by the remote schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Field as a string; absent, null and object values become `""`.
    /// Multi-valued fields (JSON arrays) yield their first non-empty scalar.
    pub fn text(&self, field: &str) -> String {
        match self.0.get(field) {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(scalar_text)
                .find(|s| !s.is_empty())
                .unwrap_or_default(),
            Some(value) => scalar_text(value).unwrap_or_default(),
            None => String::new(),
        }
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// One page of `POST /search/{itemType}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default, deserialize_with = "nullable_records")]
    pub data: Vec<RawRecord>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub totalcount: u64,
}

fn nullable_records<'de, D>(deserializer: D) -> Result<Vec<RawRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RawRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

// GLPI versions disagree on whether totalcount is a number or a numeric string
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
