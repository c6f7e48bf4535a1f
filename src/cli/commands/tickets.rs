use serde_json::Value;

use super::TokenArgs;
use crate::cli::utils::{output_collection, output_empty_collection};
use crate::cli::OutputFormat;
use crate::services::{DirectoryService, ServiceError};

pub async fn tickets(directory: &DirectoryService, tokens: &TokenArgs, output_format: &OutputFormat) -> anyhow::Result<()> {
    let credentials = tokens.credentials()?;

    match directory.list_tickets(&credentials).await {
        Ok(tickets) => output_collection(output_format, "tickets", &tickets, |t| {
            format!(
                "{}  {:<28} {} ({})",
                display(t.data_criacao.as_ref()),
                t.status,
                display(t.titulo.as_ref()),
                t.autor
            )
        }),
        Err(ServiceError::NotFound(msg)) => output_empty_collection(output_format, "tickets", &msg),
        Err(e) => Err(e.into()),
    }
}

fn display(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}
