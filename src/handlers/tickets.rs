// handlers/tickets.rs - POST /tickets

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::TokensBody;
use crate::app::AppState;
use crate::error::ApiError;
use crate::format::FormattedTicket;
use crate::services::DirectoryService;

/// POST /tickets - every GLPI ticket with decoded status and author name, newest first
pub async fn tickets_post(
    State(state): State<AppState>,
    payload: Result<Json<TokensBody>, JsonRejection>,
) -> Result<Json<Vec<FormattedTicket>>, ApiError> {
    let Json(body) = payload?;
    let credentials = DirectoryService::credentials(body.session_token.as_deref(), body.app_token.as_deref())?;

    let tickets = state.directory.list_tickets(&credentials).await?;
    Ok(Json(tickets))
}
