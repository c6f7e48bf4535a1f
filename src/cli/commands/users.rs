use super::TokenArgs;
use crate::cli::utils::{output_collection, output_empty_collection};
use crate::cli::OutputFormat;
use crate::services::{DirectoryService, ServiceError};

pub async fn users(directory: &DirectoryService, tokens: &TokenArgs, output_format: &OutputFormat) -> anyhow::Result<()> {
    let credentials = tokens.credentials()?;

    match directory.list_users(&credentials).await {
        Ok(users) => output_collection(output_format, "users", &users, |u| {
            let mut line = format!("{} {} <{}>", u.nome, u.sobrenome, u.email);
            if !u.setor.is_empty() {
                line.push_str(&format!(" [{}]", u.setor));
            }
            line
        }),
        Err(ServiceError::NotFound(msg)) => output_empty_collection(output_format, "users", &msg),
        Err(e) => Err(e.into()),
    }
}
